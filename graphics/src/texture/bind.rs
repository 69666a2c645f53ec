//! Per-face texture binding.

use facedraw_core::image::{Image, TexPageFlags};
use facedraw_core::{profile_function, profile_plot, profile_scope};
use facedraw_core::{Face, ImageFlags, ImageId, ImageRegistry, TextureName, Transparency};
use glam::{Mat4, Vec3};
use image::RgbaImage;

use super::upload::{mip_chain, prepare_pixels, TileWindow};
use crate::backend::{
    BlendFactor, Capability, CompareFunction, GlBackend, TextureFilter, TextureWrap,
};
use crate::GpuDraw;

/// Alpha-test threshold for [`Transparency::Clip`] faces.
const CLIP_ALPHA_THRESHOLD: f32 = 0.5;

impl<B: GlBackend> GpuDraw<B> {
    /// Bind the texture page of `face`, or clear all texture state for `None`.
    ///
    /// Returns whether a texture is bound afterwards. Repeated calls with the
    /// same image, tile and layout neither rebind nor upload.
    pub fn set_face_texture(&mut self, images: &mut ImageRegistry, face: Option<&Face>) -> bool {
        profile_function!();

        let Some(face) = face else {
            self.clear();
            return false;
        };

        self.texture.last_face = Some(face.clone());
        self.verify_alpha_mode(face.transparency);
        let image = face.image.and_then(|id| images.get(id));
        let reflect = image.is_some_and(|image| image.flags.contains(ImageFlags::REFLECT));
        self.verify_reflection(reflect);

        if !self.verify_image(images, face) {
            self.backend.disable(Capability::Texture2D);
            self.texture.commit(None);
            return false;
        }

        self.texture.commit(face.image);
        self.backend.enable(Capability::Texture2D);

        let clamp = face
            .image
            .and_then(|id| images.get(id))
            .map_or(TexPageFlags::empty(), |image| image.tpage_flags);
        self.verify_repeat(clamp);
        true
    }

    /// Reset all texture state, as after drawing the last textured face.
    ///
    /// Does nothing when no face was set since the previous clear.
    pub fn clear(&mut self) {
        if self.texture.last_face.is_none() {
            return;
        }

        if self.texture.current_tile_mode {
            self.backend.load_texture_matrix(Mat4::IDENTITY);
        }
        self.texture.reset();

        self.backend.disable(Capability::Blend);
        self.backend.disable(Capability::Texture2D);
        self.backend.disable(Capability::TextureGenS);
        self.backend.disable(Capability::TextureGenT);
        self.backend.disable(Capability::AlphaTest);
    }

    fn verify_alpha_mode(&mut self, transparency: Transparency) {
        if self.texture.alpha_mode == Some(transparency) {
            return;
        }

        match transparency {
            Transparency::Solid => {
                self.backend.disable(Capability::Blend);
                self.backend.disable(Capability::AlphaTest);
            }
            Transparency::Add => {
                self.backend.enable(Capability::Blend);
                self.backend.blend_func(BlendFactor::One, BlendFactor::One);
                self.backend.disable(Capability::AlphaTest);
            }
            Transparency::Alpha => {
                self.backend.enable(Capability::Blend);
                self.backend
                    .blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
                // Some drivers draw nothing with an alpha test at exactly 1.0.
                if self.prefs.alpha_clip == 1.0 {
                    self.backend.disable(Capability::AlphaTest);
                } else {
                    self.backend.enable(Capability::AlphaTest);
                    self.backend
                        .alpha_func(CompareFunction::Greater, self.prefs.alpha_clip);
                }
            }
            Transparency::Clip => {
                self.backend.disable(Capability::Blend);
                self.backend.enable(Capability::AlphaTest);
                self.backend
                    .alpha_func(CompareFunction::Greater, CLIP_ALPHA_THRESHOLD);
            }
        }
        self.texture.alpha_mode = Some(transparency);
    }

    fn verify_reflection(&mut self, reflect: bool) {
        if reflect {
            self.backend.enable(Capability::TextureGenT);
            self.backend.enable(Capability::TextureGenS);
            self.backend.sphere_map_texgen();
        } else {
            self.backend.disable(Capability::TextureGenT);
            self.backend.disable(Capability::TextureGenS);
        }
    }

    fn verify_repeat(&mut self, flags: TexPageFlags) {
        let wrap = |clamp: bool| {
            if clamp {
                TextureWrap::ClampToEdge
            } else {
                TextureWrap::Repeat
            }
        };
        self.backend.texture_wrap(
            wrap(flags.contains(TexPageFlags::CLAMP_U)),
            wrap(flags.contains(TexPageFlags::CLAMP_V)),
        );
    }

    /// Make the texture for `face` current. Returns whether one is bound.
    fn verify_image(&mut self, images: &mut ImageRegistry, face: &Face) -> bool {
        let image = face.image.and_then(|id| images.get(id));
        let animated = image.is_some_and(|image| image.tpage_flags.contains(TexPageFlags::TWIN_ANIM));

        self.texture.tile_mode = face.is_tiled() || animated;
        self.texture.tile = match image {
            Some(image) if animated => image.last_frame,
            _ => face.tile,
        };
        self.texture.repeat = image.map_or((0, 0), |image| (image.x_rep, image.y_rep));

        if self.texture.matches_request(face.image) {
            return face.image.is_some();
        }

        if self.texture.layout_changed() {
            let matrix = match image {
                Some(image) if face.is_tiled() => {
                    Mat4::from_scale(Vec3::new(image.x_rep as f32, image.y_rep as f32, 1.0))
                }
                _ => Mat4::IDENTITY,
            };
            self.backend.load_texture_matrix(matrix);
        }

        let Some(id) = face.image else {
            return false;
        };
        let Some(image) = images.get_mut(id) else {
            log::warn!("Face references unknown image {:?}", id);
            return false;
        };
        if !image.ok {
            return false;
        }
        self.bind_image(id, image)
    }

    fn bind_image(&mut self, id: ImageId, image: &mut Image) -> bool {
        let tile_count = image.tile_count();
        let Some(buffer) = image.buffer.as_mut() else {
            return false;
        };
        let Some(pixels) = buffer.ensure_bytes() else {
            return false;
        };

        let mut window = None;
        let slot = if self.texture.tile_mode {
            let bindings = &mut image.bindings;
            if bindings.tile_binds.is_none() {
                bindings.total_binds = tile_count;
                if bindings.total_binds > 1 {
                    bindings.tile_binds = Some(vec![None; bindings.total_binds as usize]);
                }
            }
            // Repeat counts changed since the tile slots were made.
            if self.texture.tile >= bindings.total_binds {
                self.texture.tile = 0;
            }

            let existing = match &bindings.tile_binds {
                Some(binds) => binds.get(self.texture.tile as usize).copied().flatten(),
                None => bindings.bind,
            };
            if existing.is_none() {
                let tile_window = TileWindow::for_tile(
                    pixels.width(),
                    pixels.height(),
                    image.x_rep,
                    image.y_rep,
                    self.texture.tile,
                );
                self.texture.tile = self.texture.tile.min(tile_count - 1);
                self.texture.window = tile_window;
                window = Some(tile_window);
            }
            existing
        } else {
            image.bindings.bind
        };

        if let Some(name) = slot {
            self.backend.bind_texture(name);
            return true;
        }

        let Some(name) = self.upload_texture(&image.name, pixels, window) else {
            return false;
        };
        let mipmapped = self.mipmap_active();

        match image.bindings.tile_binds.as_mut() {
            Some(binds) if self.texture.tile_mode => {
                if let Some(entry) = binds.get_mut(self.texture.tile as usize) {
                    *entry = Some(name);
                }
            }
            _ => image.bindings.bind = Some(name),
        }
        if mipmapped {
            image.tpage_flags |= TexPageFlags::MIPMAP_COMPLETE;
        }
        log::debug!("Uploaded {:?} ({}) as texture {:?}", id, image.name, name);
        true
    }

    /// Generate a texture name and upload `source` (or its `window`) into it.
    fn upload_texture(
        &mut self,
        label: &str,
        source: &RgbaImage,
        window: Option<TileWindow>,
    ) -> Option<TextureName> {
        profile_scope!("upload_texture");

        let Some(pixels) = prepare_pixels(source, window, self.prefs.max_texture_size) else {
            log::warn!("Image {} has an empty tile window, not uploading", label);
            return None;
        };

        let name = match self.backend.gen_texture() {
            Ok(name) => name,
            Err(err) => {
                log::warn!("Cannot create texture for image {}: {}", label, err);
                return None;
            }
        };
        self.backend.bind_texture(name);

        let (width, height) = pixels.dimensions();
        self.backend.tex_image_2d(0, width, height, pixels.as_raw());
        profile_plot!("texture upload bytes", pixels.as_raw().len());

        if self.mipmap_active() {
            for (level, mip) in mip_chain(&pixels).iter().enumerate() {
                self.backend
                    .tex_image_2d(level as u32 + 1, mip.width(), mip.height(), mip.as_raw());
            }
            let filter = TextureFilter::mipmap(self.texture.linear_mipmap());
            self.backend.texture_filter(filter, TextureFilter::Linear);
        } else {
            self.backend
                .texture_filter(TextureFilter::Linear, TextureFilter::Linear);
        }

        self.backend.texture_env_modulate();
        Some(name)
    }
}
