//! The draw-state context owning both caches.

use facedraw_core::UserPreferences;
use static_assertions::assert_impl_all;

use crate::backend::{DummyBackend, GlBackend};
use crate::materials::MaterialState;
use crate::texture::TextureState;

/// GPU draw state of one GL context.
///
/// Holds the backend together with the texture and material caches. Create
/// one per context on the thread that owns it and pass it to every draw
/// call; `&mut self` on each operation keeps the calls strictly ordered.
///
/// # Example
///
/// ```
/// use facedraw_core::{Face, Image, ImageBuffer, ImageRegistry, UserPreferences};
/// use facedraw_graphics::{DummyBackend, GpuDraw};
///
/// let mut images = ImageRegistry::new();
/// let brick = images.add(Image::new("brick", ImageBuffer::solid(64, 64, [200, 80, 60, 255])));
///
/// let mut draw = GpuDraw::new(DummyBackend::new(), UserPreferences::default());
/// assert!(draw.set_face_texture(&mut images, Some(&Face::textured(brick))));
/// assert!(draw.set_face_texture(&mut images, Some(&Face::textured(brick))));
/// assert_eq!(draw.backend().texture_uploads(), 1);
/// ```
#[derive(Debug)]
pub struct GpuDraw<B: GlBackend> {
    pub(crate) backend: B,
    pub(crate) prefs: UserPreferences,
    pub(crate) texture: TextureState,
    pub(crate) material: MaterialState,
    pub(crate) texture_paint: bool,
}

assert_impl_all!(GpuDraw<DummyBackend>: Send);

impl<B: GlBackend> GpuDraw<B> {
    /// Create the context state. Mipmap settings are taken from `prefs`.
    pub fn new(backend: B, prefs: UserPreferences) -> Self {
        log::debug!(
            "Creating draw state on {} (mipmap: {}, linear: {}, max texture size: {})",
            backend.name(),
            prefs.mipmap,
            prefs.linear_mipmap,
            prefs.max_texture_size
        );
        Self {
            texture: TextureState::new(prefs.mipmap, prefs.linear_mipmap),
            material: MaterialState::new(),
            backend,
            prefs,
            texture_paint: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the context, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn prefs(&self) -> &UserPreferences {
        &self.prefs
    }

    /// Mutable preferences.
    ///
    /// Mipmap settings changed here are not seen by the cache; use
    /// [`invalidate_mipmap_setting`](Self::invalidate_mipmap_setting) and
    /// [`invalidate_linear_mipmap`](Self::invalidate_linear_mipmap) instead.
    pub fn prefs_mut(&mut self) -> &mut UserPreferences {
        &mut self.prefs
    }

    pub fn texture_state(&self) -> &TextureState {
        &self.texture
    }

    pub fn material_state(&self) -> &MaterialState {
        &self.material
    }

    /// Whether texture painting is active.
    pub fn texture_paint(&self) -> bool {
        self.texture_paint
    }

    /// Whether new uploads get a mip chain. Painting turns mipmapping off.
    pub fn mipmap_active(&self) -> bool {
        self.texture.mipmap() && !self.texture_paint
    }
}
