//! Texture state cache.
//!
//! Tracks which image, tile, tiling layout and blend mode are currently
//! bound so that drawing many faces with the same texture page costs one
//! bind and at most one upload.
//!
//! # Binding
//!
//! [`GpuDraw::set_face_texture`](crate::GpuDraw::set_face_texture) is the
//! per-face entry point. It walks the same steps every time:
//!
//! 1. blend and alpha-test state from the face transparency
//! 2. reflection mapping from the image flags
//! 3. tiling layout and texture matrix
//! 4. bind the cached texture, or upload it
//! 5. wrap mode from the image clamp flags
//!
//! Each step compares against the cached state and skips redundant calls.
//!
//! # Lifetime
//!
//! Texture names live on the [`Image`](facedraw_core::Image) that owns them.
//! They are only released by the explicit free and invalidation operations.

mod animation;
mod bind;
mod invalidate;
mod paint;
pub mod pow2;
pub mod upload;

use facedraw_core::{Face, ImageId, Transparency};

pub use animation::{update_image_time, update_images_framechange};
pub use pow2::{is_pow2, is_pow2_limit, smaller_pow2, smaller_pow2_limit};
pub use upload::TileWindow;

/// Texture binding state of one GL context.
#[derive(Debug, Clone, Default)]
pub struct TextureState {
    // Committed after a face was bound.
    current_image: Option<ImageId>,
    current_tile: u32,
    current_tile_mode: bool,
    current_repeat: (u32, u32),

    // Requested by the face being bound.
    tile: u32,
    tile_mode: bool,
    repeat: (u32, u32),
    window: TileWindow,

    alpha_mode: Option<Transparency>,
    last_face: Option<Face>,

    mipmap: bool,
    linear_mipmap: bool,
}

impl TextureState {
    pub(crate) fn new(mipmap: bool, linear_mipmap: bool) -> Self {
        Self {
            mipmap,
            linear_mipmap,
            ..Default::default()
        }
    }

    /// Image whose texture is bound.
    pub fn current_image(&self) -> Option<ImageId> {
        self.current_image
    }

    /// Tile of the bound image.
    pub fn current_tile(&self) -> u32 {
        self.current_tile
    }

    /// Whether the texture matrix is set up for tile repetition.
    pub fn tile_mode(&self) -> bool {
        self.current_tile_mode
    }

    /// Repeat counts the texture matrix was set up for.
    pub fn repeat(&self) -> (u32, u32) {
        self.current_repeat
    }

    /// Atlas window of the last tile extracted for upload.
    pub fn tile_window(&self) -> TileWindow {
        self.window
    }

    /// Blend mode in effect, `None` after a clear.
    pub fn alpha_mode(&self) -> Option<Transparency> {
        self.alpha_mode
    }

    /// Face most recently passed to `set_face_texture`.
    pub fn last_face(&self) -> Option<&Face> {
        self.last_face.as_ref()
    }

    /// Whether new uploads carry mip chains (unless texture paint is active).
    pub fn mipmap(&self) -> bool {
        self.mipmap
    }

    /// Whether mip levels are blended linearly.
    pub fn linear_mipmap(&self) -> bool {
        self.linear_mipmap
    }

    fn matches_request(&self, image: Option<ImageId>) -> bool {
        self.current_image == image
            && self.current_tile == self.tile
            && self.current_tile_mode == self.tile_mode
            && self.current_repeat == self.repeat
    }

    fn layout_changed(&self) -> bool {
        self.current_tile_mode != self.tile_mode || self.current_repeat != self.repeat
    }

    fn commit(&mut self, image: Option<ImageId>) {
        self.current_image = image;
        self.current_tile = self.tile;
        self.current_tile_mode = self.tile_mode;
        self.current_repeat = self.repeat;
    }

    /// Image `rebound` was bound outside `set_face_texture`.
    fn forget_binding(&mut self, rebound: ImageId) {
        if self.current_image != Some(rebound) {
            self.current_image = None;
        }
    }

    pub(crate) fn reset(&mut self) {
        self.last_face = None;
        self.current_image = None;
        self.current_tile = 0;
        self.current_tile_mode = false;
        self.current_repeat = (0, 0);
        self.alpha_mode = None;
    }
}
