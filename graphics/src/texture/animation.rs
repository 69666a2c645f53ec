//! Tile animation: images that cycle through a range of their atlas tiles.

use facedraw_core::image::{Image, TexPageFlags};
use facedraw_core::{Face, ImageRegistry};

/// Advance every tile-animated image by one frame.
pub fn update_images_framechange(images: &mut ImageRegistry) {
    for (_, image) in images.iter_mut() {
        if !image.tpage_flags.contains(TexPageFlags::TWIN_ANIM) {
            continue;
        }
        clamp_anim_end(image);
        image.last_frame += 1;
        if image.last_frame > image.anim_end {
            image.last_frame = image.anim_start;
        }
    }
}

/// Step the tile animation of `face`'s image to `time` seconds.
///
/// Returns the number of frames advanced. Time that does not add up to a
/// whole frame is kept for the next call.
pub fn update_image_time(images: &mut ImageRegistry, face: &Face, time: f64) -> u32 {
    let Some(image) = face.image.and_then(|id| images.get_mut(id)) else {
        return 0;
    };

    let time = time as f32;
    image.last_update = image.last_update.clamp(0.0, time.max(0.0));

    if !image.tpage_flags.contains(TexPageFlags::TWIN_ANIM) || image.anim_speed == 0 {
        return 0;
    }
    clamp_anim_end(image);

    let speed = image.anim_speed as f32;
    let advanced = ((time - image.last_update) * speed) as u32;
    image.last_update += advanced as f32 / speed;

    let mut frame = image.last_frame + advanced;
    if frame > image.anim_end {
        frame = if image.anim_end > image.anim_start {
            let span = image.anim_end - image.anim_start + 1;
            image.anim_start + (frame - image.anim_start) % span
        } else {
            image.anim_start
        };
    }
    image.last_frame = frame;
    advanced
}

fn clamp_anim_end(image: &mut Image) {
    let last_tile = image.tile_count().saturating_sub(1);
    if image.anim_end > last_tile {
        image.anim_end = last_tile;
    }
}
