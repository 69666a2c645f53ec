//! Shared fixtures for the state cache integration tests.

use facedraw_core::{Image, ImageBuffer, ImageId, ImageRegistry, UserPreferences};
use facedraw_graphics::{DummyBackend, GpuDraw};

/// Draw state on a recording backend.
pub fn new_draw(prefs: UserPreferences) -> GpuDraw<DummyBackend> {
    let _ = env_logger::builder().is_test(true).try_init();
    GpuDraw::new(DummyBackend::new(), prefs)
}

/// Draw state with mip chains turned off, so every upload is one level.
pub fn draw_without_mipmaps() -> GpuDraw<DummyBackend> {
    new_draw(UserPreferences::default().with_mipmap(false, false))
}

/// Register a solid grey image of the given size.
pub fn add_image(images: &mut ImageRegistry, name: &str, width: u32, height: u32) -> ImageId {
    images.add(Image::new(name, ImageBuffer::solid(width, height, [128, 128, 128, 255])))
}
