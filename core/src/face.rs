//! Textured faces.

use bitflags::bitflags;

use crate::image::ImageId;

/// How a face's texture combines with what is already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transparency {
    /// Opaque.
    #[default]
    Solid,
    /// Additive blending.
    Add,
    /// Alpha blending.
    Alpha,
    /// Alpha-tested cutout at 0.5.
    Clip,
}

bitflags! {
    /// Face drawing flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaceMode: u32 {
        /// Draw one tile of the image atlas, repeated over the face.
        const TILES = 1 << 0;
        /// Draw text from a bitmap font image.
        const BMFONT = 1 << 1;
        /// Use the object colour instead of vertex colours.
        const OBCOL = 1 << 2;
    }
}

/// A drawable primitive carrying UV coordinates, a texture page and a
/// transparency mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Texture page.
    pub image: Option<ImageId>,
    /// Tile of the image atlas, as a linear index.
    pub tile: u32,
    pub transparency: Transparency,
    pub mode: FaceMode,
    /// Texture coordinates of the (up to) four corners.
    pub uv: [[f32; 2]; 4],
}

impl Default for Face {
    fn default() -> Self {
        Self {
            image: None,
            tile: 0,
            transparency: Transparency::Solid,
            mode: FaceMode::empty(),
            uv: [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        }
    }
}

impl Face {
    /// A face textured with `image`.
    pub fn textured(image: ImageId) -> Self {
        Self {
            image: Some(image),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_tile(mut self, tile: u32) -> Self {
        self.mode |= FaceMode::TILES;
        self.tile = tile;
        self
    }

    #[must_use]
    pub fn with_transparency(mut self, transparency: Transparency) -> Self {
        self.transparency = transparency;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: FaceMode) -> Self {
        self.mode |= mode;
        self
    }

    /// Whether the face draws a single tile of its image.
    pub fn is_tiled(&self) -> bool {
        self.mode.contains(FaceMode::TILES)
    }
}
