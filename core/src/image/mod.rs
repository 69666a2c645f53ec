//! Images used as texture pages.
//!
//! Provides [`Image`] with its CPU [`ImageBuffer`] and the GPU
//! [`ImageBindings`] the draw-state cache stores on it, plus the
//! [`ImageRegistry`] that owns all images.

mod registry;
mod types;

pub use registry::ImageRegistry;
pub use types::{
    GpuTextureHandle, Image, ImageBindings, ImageBuffer, ImageFlags, ImageId, TexPageFlags,
    TextureName,
};
