//! # Facedraw Core
//!
//! Scene data read and written by the facedraw GPU state cache: images with
//! their cached texture handles, materials, objects, lamps, scenes, views,
//! textured faces and user preferences.
//!
//! The cache does not own any of this. Images keep their GPU handles for
//! their whole lifetime; freeing them is the cache's explicit job.

pub mod error;
pub mod face;
pub mod image;
pub mod material;
pub mod object;
pub mod preferences;
pub mod profiling;
pub mod scene;

pub use error::ConfigError;
pub use face::{Face, FaceMode, Transparency};
pub use image::{Image, ImageBuffer, ImageFlags, ImageId, ImageRegistry, TexPageFlags, TextureName};
pub use material::{CompiledMaterialHandle, Material, MaterialFlags, MaterialId, MaterialRegistry};
pub use object::{Lamp, LampKind, Object, ObjectData};
pub use preferences::{SolidLight, UserPreferences};
pub use scene::{Base, ObjectId, Scene, View};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once at startup.
pub fn init() {
    log::info!("Facedraw Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
