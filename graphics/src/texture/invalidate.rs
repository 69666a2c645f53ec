//! Releasing uploaded textures and refreshing them after edits.

use facedraw_core::image::{Image, TexPageFlags};
use facedraw_core::{profile_function, ImageId, ImageRegistry};

use super::pow2::is_pow2_limit;
use crate::backend::{GlBackend, PixelUnpack};
use crate::GpuDraw;

impl<B: GlBackend> GpuDraw<B> {
    /// Release every GPU handle cached on image `id`.
    ///
    /// The next face using the image uploads it again.
    pub fn free_texture(&mut self, images: &mut ImageRegistry, id: ImageId) {
        if let Some(image) = images.get_mut(id) {
            self.release_image(id, image);
        }
    }

    /// Release the GPU handles of every image.
    pub fn free_all_textures(&mut self, images: &mut ImageRegistry) {
        profile_function!();
        log::debug!("Freeing textures of {} images", images.len());
        for (id, image) in images.iter_mut() {
            self.release_image(id, image);
        }
    }

    /// Switch mip chain generation on or off.
    ///
    /// A change frees all textures, so they are uploaded again with the new
    /// setting, and is stored in the preferences.
    pub fn invalidate_mipmap_setting(&mut self, images: &mut ImageRegistry, enabled: bool) {
        if self.texture.mipmap == enabled {
            return;
        }
        log::debug!("Mipmapping {}", if enabled { "enabled" } else { "disabled" });
        self.free_all_textures(images);
        self.texture.mipmap = enabled;
        self.prefs.mipmap = enabled;
    }

    /// Switch between nearest and linear mip level selection.
    ///
    /// A change frees all textures and is stored in the preferences.
    pub fn invalidate_linear_mipmap(&mut self, images: &mut ImageRegistry, enabled: bool) {
        if self.texture.linear_mipmap == enabled {
            return;
        }
        self.free_all_textures(images);
        self.texture.linear_mipmap = enabled;
        self.prefs.linear_mipmap = enabled;
    }

    /// Refresh the `width` x `height` rectangle at (`x`, `y`) of image `id`
    /// after its pixels were edited.
    ///
    /// Uploads just the rectangle when the image has a single full-resolution
    /// texture without mip levels. Anything else frees the image's textures
    /// so the next draw uploads it whole.
    pub fn partial_update(
        &mut self,
        images: &mut ImageRegistry,
        id: ImageId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) {
        profile_function!();

        let Some(image) = images.get_mut(id) else {
            return;
        };

        let limit = self.prefs.max_texture_size;
        let name = image.bindings.bind;
        let source = image.buffer.as_ref().and_then(|buffer| buffer.bytes());

        let target = match (name, source) {
            (Some(name), Some(source))
                if image.bindings.tile_binds.is_none()
                    && !self.mipmap_active()
                    && is_pow2_limit(source.width(), limit)
                    && is_pow2_limit(source.height(), limit)
                    && width != 0
                    && height != 0
                    && x.saturating_add(width) <= source.width()
                    && y.saturating_add(height) <= source.height() =>
            {
                Some((name, source))
            }
            _ => None,
        };

        match target {
            Some((name, source)) => {
                let saved = self.backend.pixel_unpack();
                self.backend.bind_texture(name);
                self.backend.set_pixel_unpack(PixelUnpack {
                    row_length: source.width(),
                    skip_pixels: x,
                    skip_rows: y,
                });
                self.backend
                    .tex_sub_image_2d(x, y, width, height, source.as_raw());
                self.backend.set_pixel_unpack(saved);
                image.tpage_flags.remove(TexPageFlags::MIPMAP_COMPLETE);
                self.texture.forget_binding(id);
            }
            None => {
                log::trace!("Full reupload of {} after edit", image.name);
                self.release_image(id, image);
                image.tpage_flags.remove(TexPageFlags::MIPMAP_COMPLETE);
            }
        }
    }

    pub(crate) fn release_image(&mut self, id: ImageId, image: &mut Image) {
        let bindings = &mut image.bindings;

        if let Some(name) = bindings.bind.take() {
            self.backend.delete_textures(&[name]);
            image.tpage_flags.remove(TexPageFlags::MIPMAP_COMPLETE);
        }
        if let Some(handle) = bindings.gpu_texture.take() {
            self.backend.free_gpu_texture(handle);
        }
        if let Some(binds) = bindings.tile_binds.take() {
            let names: Vec<_> = binds.into_iter().flatten().collect();
            if !names.is_empty() {
                self.backend.delete_textures(&names);
            }
            image.tpage_flags.remove(TexPageFlags::MIPMAP_COMPLETE);
        }

        if self.texture.current_image == Some(id) {
            self.texture.current_image = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use facedraw_core::{Face, ImageBuffer, UserPreferences};

    use super::*;
    use crate::backend::{DummyBackend, GlCall};

    fn draw_without_mipmaps() -> GpuDraw<DummyBackend> {
        GpuDraw::new(
            DummyBackend::new(),
            UserPreferences::default().with_mipmap(false, false),
        )
    }

    #[test]
    fn test_free_texture_forgets_current_image() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let id = images.add(Image::new("wall", ImageBuffer::solid(8, 8, [0; 4])));
        let face = Face::textured(id);

        draw.set_face_texture(&mut images, Some(&face));
        draw.free_texture(&mut images, id);
        assert!(images.get(id).unwrap().bindings.is_empty());
        assert_eq!(draw.texture_state().current_image(), None);
        assert_eq!(draw.backend().live_textures(), 0);

        draw.set_face_texture(&mut images, Some(&face));
        assert_eq!(draw.backend().texture_uploads(), 2);
    }

    #[test]
    fn test_free_tiles_and_shader_texture() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let id = images.add(Image::new("atlas", ImageBuffer::solid(8, 8, [0; 4])).with_tiles(2, 1));
        draw.set_face_texture(&mut images, Some(&Face::textured(id).with_tile(1)));
        images.get_mut(id).unwrap().bindings.gpu_texture =
            Some(facedraw_core::image::GpuTextureHandle(7));

        draw.free_texture(&mut images, id);

        let calls = draw.backend().calls();
        assert!(calls.contains(&GlCall::FreeGpuTexture(
            facedraw_core::image::GpuTextureHandle(7)
        )));
        assert_eq!(draw.backend().live_textures(), 0);
    }

    #[test]
    fn test_invalidate_linear_mipmap_persists() {
        let mut draw = GpuDraw::new(DummyBackend::new(), UserPreferences::default());
        let mut images = ImageRegistry::new();

        draw.invalidate_linear_mipmap(&mut images, true);

        assert!(draw.texture_state().linear_mipmap());
        assert!(draw.prefs().linear_mipmap);
    }

    #[test]
    fn test_partial_update_uploads_rectangle() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let id = images.add(Image::new("canvas", ImageBuffer::solid(64, 32, [0; 4])));
        draw.set_face_texture(&mut images, Some(&Face::textured(id)));
        draw.backend_mut().clear_calls();

        draw.partial_update(&mut images, id, 4, 8, 10, 12);

        let expected_unpack = PixelUnpack {
            row_length: 64,
            skip_pixels: 4,
            skip_rows: 8,
        };
        assert!(draw.backend().calls().contains(&GlCall::TexSubImage2D {
            x: 4,
            y: 8,
            width: 10,
            height: 12,
            unpack: expected_unpack,
        }));
        // Unpack state is restored afterwards.
        assert_eq!(draw.backend().pixel_unpack(), PixelUnpack::default());
        assert!(images.get(id).unwrap().bindings.bind.is_some());
    }

    #[test]
    fn test_partial_update_of_other_image_rebinds_current() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let canvas = images.add(Image::new("canvas", ImageBuffer::solid(16, 16, [0; 4])));
        let brush = images.add(Image::new("brush", ImageBuffer::solid(16, 16, [0; 4])));
        draw.set_face_texture(&mut images, Some(&Face::textured(canvas)));
        draw.set_face_texture(&mut images, Some(&Face::textured(brush)));

        draw.partial_update(&mut images, canvas, 0, 0, 4, 4);
        draw.backend_mut().clear_calls();
        assert!(draw.set_face_texture(&mut images, Some(&Face::textured(brush))));

        let name = images.get(brush).unwrap().bindings.bind.unwrap();
        assert!(draw.backend().calls().contains(&GlCall::BindTexture(name)));
        assert_eq!(draw.backend().texture_uploads(), 0);
    }

    #[test]
    fn test_partial_update_of_current_image_keeps_binding() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let id = images.add(Image::new("canvas", ImageBuffer::solid(16, 16, [0; 4])));
        let face = Face::textured(id);
        draw.set_face_texture(&mut images, Some(&face));

        draw.partial_update(&mut images, id, 2, 2, 4, 4);
        draw.backend_mut().clear_calls();
        draw.set_face_texture(&mut images, Some(&face));

        assert_eq!(draw.backend().count(|c| matches!(c, GlCall::BindTexture(_))), 0);
        assert_eq!(draw.texture_state().current_image(), Some(id));
    }

    #[test]
    fn test_partial_update_fallback_clears_mipmap_flag() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let id = images.add(
            Image::new("canvas", ImageBuffer::solid(16, 16, [0; 4]))
                .with_tpage_flags(TexPageFlags::MIPMAP_COMPLETE),
        );

        draw.partial_update(&mut images, id, 0, 0, 4, 4);

        assert!(!images.get(id).unwrap().mipmap_complete());
    }

    #[test]
    fn test_partial_update_falls_back_to_free() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let id = images.add(Image::new("odd", ImageBuffer::solid(30, 30, [0; 4])));
        draw.set_face_texture(&mut images, Some(&Face::textured(id)));

        draw.partial_update(&mut images, id, 0, 0, 4, 4);

        assert!(images.get(id).unwrap().bindings.is_empty());
        assert!(!draw
            .backend()
            .calls()
            .iter()
            .any(|c| matches!(c, GlCall::TexSubImage2D { .. })));
    }

    #[test]
    fn test_partial_update_zero_area_frees() {
        let mut draw = draw_without_mipmaps();
        let mut images = ImageRegistry::new();
        let id = images.add(Image::new("canvas", ImageBuffer::solid(16, 16, [0; 4])));
        draw.set_face_texture(&mut images, Some(&Face::textured(id)));

        draw.partial_update(&mut images, id, 0, 0, 0, 4);

        assert!(images.get(id).unwrap().bindings.bind.is_none());
    }

    #[test]
    fn test_partial_update_with_mipmaps_frees() {
        let mut draw = GpuDraw::new(DummyBackend::new(), UserPreferences::default());
        let mut images = ImageRegistry::new();
        let id = images.add(Image::new("canvas", ImageBuffer::solid(16, 16, [0; 4])));
        draw.set_face_texture(&mut images, Some(&Face::textured(id)));
        assert!(images.get(id).unwrap().mipmap_complete());

        draw.partial_update(&mut images, id, 0, 0, 4, 4);

        let image = images.get(id).unwrap();
        assert!(image.bindings.bind.is_none());
        assert!(!image.mipmap_complete());
    }
}
