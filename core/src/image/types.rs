//! Image data types.

use bitflags::bitflags;
use ::image::{DynamicImage, Rgba32FImage, RgbaImage};

/// Stable index of an [`Image`] inside an [`ImageRegistry`](super::ImageRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub(crate) usize);

impl ImageId {
    /// Raw registry index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Name of a texture object allocated by the graphics API.
///
/// Zero is never a valid name, so "no texture" is spelled `Option<TextureName>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureName(pub u32);

/// Handle to a texture owned by a compiled shader material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuTextureHandle(pub u64);

bitflags! {
    /// General image flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ImageFlags: u32 {
        /// Draw with sphere-mapped reflection coordinates instead of UVs.
        const REFLECT = 1 << 0;
    }
}

bitflags! {
    /// Texture-page flags controlling how the image is bound for drawing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TexPageFlags: u32 {
        /// Animate through the tiles between `anim_start` and `anim_end`.
        const TWIN_ANIM = 1 << 0;
        /// Clamp texture coordinates horizontally.
        const CLAMP_U = 1 << 1;
        /// Clamp texture coordinates vertically.
        const CLAMP_V = 1 << 2;
        /// The uploaded texture carries a complete mip chain.
        const MIPMAP_COMPLETE = 1 << 3;
    }
}

/// CPU pixel storage of an image.
///
/// Drawing needs 8-bit RGBA. Images that only carry float pixels are
/// converted on demand with [`ensure_bytes`](Self::ensure_bytes).
#[derive(Debug, Clone, Default)]
pub struct ImageBuffer {
    bytes: Option<RgbaImage>,
    floats: Option<Rgba32FImage>,
}

impl ImageBuffer {
    /// Buffer backed by 8-bit RGBA pixels.
    pub fn from_bytes(pixels: RgbaImage) -> Self {
        Self {
            bytes: Some(pixels),
            floats: None,
        }
    }

    /// Buffer backed by float RGBA pixels only.
    pub fn from_floats(pixels: Rgba32FImage) -> Self {
        Self {
            bytes: None,
            floats: Some(pixels),
        }
    }

    /// Solid-colour buffer, mostly useful in tests and placeholders.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_bytes(RgbaImage::from_pixel(width, height, ::image::Rgba(color)))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        match (&self.bytes, &self.floats) {
            (Some(bytes), _) => bytes.width(),
            (None, Some(floats)) => floats.width(),
            (None, None) => 0,
        }
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        match (&self.bytes, &self.floats) {
            (Some(bytes), _) => bytes.height(),
            (None, Some(floats)) => floats.height(),
            (None, None) => 0,
        }
    }

    /// Byte pixels, if present.
    pub fn bytes(&self) -> Option<&RgbaImage> {
        self.bytes.as_ref()
    }

    /// Mutable byte pixels, if present. Painting writes through this.
    pub fn bytes_mut(&mut self) -> Option<&mut RgbaImage> {
        self.bytes.as_mut()
    }

    /// Float pixels, if present.
    pub fn floats(&self) -> Option<&Rgba32FImage> {
        self.floats.as_ref()
    }

    /// Make sure byte pixels exist, deriving them from the float pixels.
    ///
    /// Returns the byte pixels, or `None` when the buffer holds no pixels at all.
    pub fn ensure_bytes(&mut self) -> Option<&RgbaImage> {
        if self.bytes.is_none() {
            if let Some(floats) = &self.floats {
                log::debug!(
                    "Converting {}x{} float buffer to bytes",
                    floats.width(),
                    floats.height()
                );
                self.bytes = Some(DynamicImage::ImageRgba32F(floats.clone()).to_rgba8());
            }
        }
        self.bytes.as_ref()
    }
}

/// GPU handles cached on an image by the draw-state cache.
///
/// The image owns these for its lifetime. They are created lazily on first
/// draw and released only through the cache's explicit free operations.
#[derive(Debug, Clone, Default)]
pub struct ImageBindings {
    /// Texture for the whole image (or the single tile of a 1x1 layout).
    pub bind: Option<TextureName>,
    /// One texture per tile when the image is drawn as a tile atlas.
    pub tile_binds: Option<Vec<Option<TextureName>>>,
    /// Number of tile slots the current layout was allocated for.
    pub total_binds: u32,
    /// Texture owned by a compiled shader material.
    pub gpu_texture: Option<GpuTextureHandle>,
}

impl ImageBindings {
    /// Whether any GPU handle is cached.
    pub fn is_empty(&self) -> bool {
        self.bind.is_none() && self.tile_binds.is_none() && self.gpu_texture.is_none()
    }
}

/// An image that faces can reference as their texture page.
#[derive(Debug, Clone)]
pub struct Image {
    /// Display name.
    pub name: String,
    /// Cleared when loading failed; invalid images are never bound.
    pub ok: bool,
    /// Decoded pixels, if loaded.
    pub buffer: Option<ImageBuffer>,
    /// Number of tiles along X when used as a tile atlas.
    pub x_rep: u32,
    /// Number of tiles along Y when used as a tile atlas.
    pub y_rep: u32,
    /// General flags.
    pub flags: ImageFlags,
    /// Texture-page flags.
    pub tpage_flags: TexPageFlags,
    /// Cached GPU handles.
    pub bindings: ImageBindings,
    /// First tile of the tile animation.
    pub anim_start: u32,
    /// Last tile of the tile animation.
    pub anim_end: u32,
    /// Tiles per second of the tile animation.
    pub anim_speed: u32,
    /// Tile currently shown by the tile animation.
    pub last_frame: u32,
    /// Time of the last tile-animation step, in seconds.
    pub last_update: f32,
}

impl Image {
    /// Create an image with the given pixels and a 1x1 tile layout.
    pub fn new(name: impl Into<String>, buffer: ImageBuffer) -> Self {
        Self {
            name: name.into(),
            ok: true,
            buffer: Some(buffer),
            x_rep: 1,
            y_rep: 1,
            flags: ImageFlags::empty(),
            tpage_flags: TexPageFlags::empty(),
            bindings: ImageBindings::default(),
            anim_start: 0,
            anim_end: 0,
            anim_speed: 1,
            last_frame: 0,
            last_update: 0.0,
        }
    }

    /// Create an image whose pixels have not been loaded.
    pub fn unloaded(name: impl Into<String>) -> Self {
        Self {
            buffer: None,
            ..Self::new(name, ImageBuffer::default())
        }
    }

    /// Set the tile layout.
    #[must_use]
    pub fn with_tiles(mut self, x_rep: u32, y_rep: u32) -> Self {
        self.x_rep = x_rep.max(1);
        self.y_rep = y_rep.max(1);
        self
    }

    /// Add general flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ImageFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Add texture-page flags.
    #[must_use]
    pub fn with_tpage_flags(mut self, flags: TexPageFlags) -> Self {
        self.tpage_flags |= flags;
        self
    }

    /// Configure a tile animation over `start..=end` at `speed` tiles per second.
    #[must_use]
    pub fn with_tile_animation(mut self, start: u32, end: u32, speed: u32) -> Self {
        self.tpage_flags |= TexPageFlags::TWIN_ANIM;
        self.anim_start = start;
        self.anim_end = end;
        self.anim_speed = speed;
        self.last_frame = start;
        self
    }

    /// Number of tiles in the atlas layout, at least one.
    pub fn tile_count(&self) -> u32 {
        self.x_rep.max(1).saturating_mul(self.y_rep.max(1))
    }

    /// Whether an uploaded texture carries a complete mip chain.
    pub fn mipmap_complete(&self) -> bool {
        self.tpage_flags.contains(TexPageFlags::MIPMAP_COMPLETE)
    }
}
