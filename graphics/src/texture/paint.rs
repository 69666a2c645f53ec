//! Filtering changes around texture painting.
//!
//! Painting edits level 0 only, so mip levels would show stale pixels.
//! While painting, every texture samples level 0 with linear filtering.

use facedraw_core::ImageRegistry;

use crate::backend::{GlBackend, TextureFilter};
use crate::GpuDraw;

impl<B: GlBackend> GpuDraw<B> {
    /// Turn mip-mapped sampling of uploaded textures on or off.
    ///
    /// Only acts when mipmapping is enabled. Turning it back on frees the
    /// textures that were uploaded without a complete mip chain.
    pub fn paint_set_mipmap(&mut self, images: &mut ImageRegistry, enabled: bool) {
        if !self.texture.mipmap() {
            return;
        }

        let mut rebound = false;
        for (id, image) in images.iter_mut() {
            let Some(name) = image.bindings.bind else {
                continue;
            };
            if !enabled {
                self.backend.bind_texture(name);
                self.backend
                    .texture_filter(TextureFilter::Linear, TextureFilter::Linear);
                rebound = true;
            } else if image.mipmap_complete() {
                self.backend.bind_texture(name);
                let filter = TextureFilter::mipmap(self.texture.linear_mipmap());
                self.backend.texture_filter(filter, TextureFilter::Linear);
                rebound = true;
            } else {
                self.release_image(id, image);
            }
        }

        // The bound texture is whichever image came last.
        if rebound {
            self.texture.current_image = None;
        }
    }

    /// Enter or leave texture paint mode.
    pub fn set_texture_paint(&mut self, images: &mut ImageRegistry, active: bool) {
        log::debug!("Texture paint {}", if active { "on" } else { "off" });
        self.texture_paint = active;
        self.paint_set_mipmap(images, !active);
    }
}
