//! # Facedraw Graphics
//!
//! Draw-state cache for immediate-mode drawing on a fixed-function graphics
//! API.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GpuDraw`] - The per-context state owning both caches
//! - [`GlBackend`] - Trait the host implements on top of its GL binding
//! - [`texture`] - Texture state cache: binds, uploads and frees texture pages
//! - [`materials`] - Material state cache: per-object material slots
//! - Baseline state, solid-view and scene lights, bitmap font text
//! - [`DummyBackend`] for testing
//!
//! ## Example
//!
//! ```
//! use facedraw_core::{Face, Image, ImageBuffer, ImageRegistry, MaterialRegistry, Object};
//! use facedraw_core::{Scene, UserPreferences, View};
//! use facedraw_graphics::{DummyBackend, GpuDraw, ShadingMode};
//!
//! let mut images = ImageRegistry::new();
//! let mut materials = MaterialRegistry::new();
//! let scene = Scene::new();
//! let grid = images.add(Image::new("grid", ImageBuffer::solid(128, 128, [90; 4])));
//!
//! let mut draw = GpuDraw::new(DummyBackend::new(), UserPreferences::default());
//! draw.state_init();
//!
//! let object = Object::mesh("plane");
//! draw.begin_object(&mut materials, &scene, &object, &View::default(), ShadingMode::FixedFunction, true);
//! if draw.enable_slot(1, None) {
//!     draw.set_face_texture(&mut images, Some(&Face::textured(grid)));
//!     // submit geometry...
//! }
//! draw.set_face_texture(&mut images, None);
//! draw.disable();
//! ```

pub mod backend;
mod context;
pub mod defaults;
pub mod lights;
pub mod materials;
pub mod text;
pub mod texture;

// Re-export main types for convenience
pub use backend::{BackendError, BackendResult, DummyBackend, GlBackend, GlCall};
pub use context::GpuDraw;
pub use lights::MAX_LIGHTS;
pub use materials::{
    FixedColors, MaterialSlot, MaterialState, ShadingMode, SlotShading, MAX_MATERIALS,
    MAX_MATERIAL_BUFFERS,
};
pub use text::{BitmapFont, GlyphMetrics};
pub use texture::{
    is_pow2, is_pow2_limit, smaller_pow2, smaller_pow2_limit, update_image_time,
    update_images_framechange, TextureState, TileWindow,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once at startup.
pub fn init() {
    log::info!("Facedraw Graphics v{} initialized", VERSION);
}
