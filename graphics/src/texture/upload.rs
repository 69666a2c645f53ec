//! CPU-side preparation of texture pixels: tile extraction, power-of-two
//! rescaling and mip chains.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::pow2::{is_pow2_limit, smaller_pow2_limit};

/// Rectangle of an image atlas holding one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileWindow {
    /// Window of tile `tile` in a `x_rep` by `y_rep` atlas of `width` by `height` pixels.
    ///
    /// Tiles are numbered row by row. `tile` is clamped to the last tile.
    pub fn for_tile(width: u32, height: u32, x_rep: u32, y_rep: u32, tile: u32) -> Self {
        let x_rep = x_rep.max(1);
        let y_rep = y_rep.max(1);
        let tile = tile.min(x_rep.saturating_mul(y_rep) - 1);
        let tile_width = width / x_rep;
        let tile_height = height / y_rep;
        Self {
            x: (tile % x_rep) * tile_width,
            y: (tile / x_rep) * tile_height,
            width: tile_width,
            height: tile_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Pixels to upload for `window` of `source` (or all of it), sized for the GPU.
///
/// Returns `None` for an empty area. Sources that already have power-of-two
/// sides within `limit` are borrowed untouched.
pub fn prepare_pixels(
    source: &RgbaImage,
    window: Option<TileWindow>,
    limit: u32,
) -> Option<Cow<'_, RgbaImage>> {
    let pixels = match window {
        Some(window) if window.is_empty() => return None,
        Some(window) => Cow::Owned(
            imageops::crop_imm(source, window.x, window.y, window.width, window.height)
                .to_image(),
        ),
        None if source.width() == 0 || source.height() == 0 => return None,
        None => Cow::Borrowed(source),
    };

    let (width, height) = pixels.dimensions();
    if is_pow2_limit(width, limit) && is_pow2_limit(height, limit) {
        return Some(pixels);
    }

    let target_width = smaller_pow2_limit(width, limit);
    let target_height = smaller_pow2_limit(height, limit);
    log::debug!(
        "Rescaling texture {}x{} -> {}x{}",
        width,
        height,
        target_width,
        target_height
    );
    Some(Cow::Owned(imageops::resize(
        pixels.as_ref(),
        target_width,
        target_height,
        FilterType::Triangle,
    )))
}

/// Mip levels below `base`, halving each side down to 1x1.
pub fn mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let mut levels = Vec::new();
    let (mut width, mut height) = base.dimensions();

    while width > 1 || height > 1 {
        width = (width / 2).max(1);
        height = (height / 2).max(1);
        let previous = levels.last().unwrap_or(base);
        let level = imageops::resize(previous, width, height, FilterType::Triangle);
        levels.push(level);
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn test_pow2_source_is_borrowed() {
        let source = checker(64, 32);
        let pixels = prepare_pixels(&source, None, 0).unwrap();
        assert!(matches!(pixels, Cow::Borrowed(_)));
        assert_eq!(pixels.dimensions(), (64, 32));
    }

    #[test]
    fn test_non_pow2_source_is_rescaled_down() {
        let source = checker(300, 100);
        let pixels = prepare_pixels(&source, None, 0).unwrap();
        assert_eq!(pixels.dimensions(), (256, 64));
    }

    #[test]
    fn test_limit_clamps_oversized_source() {
        let source = checker(128, 16);
        let pixels = prepare_pixels(&source, None, 64).unwrap();
        assert_eq!(pixels.dimensions(), (64, 16));
    }

    #[test]
    fn test_tile_window() {
        let window = TileWindow::for_tile(64, 32, 4, 2, 5);
        assert_eq!(
            window,
            TileWindow {
                x: 16,
                y: 16,
                width: 16,
                height: 16
            }
        );

        let clamped = TileWindow::for_tile(64, 32, 4, 2, 99);
        assert_eq!((clamped.x, clamped.y), (48, 16));
    }

    #[test]
    fn test_tile_is_cropped() {
        let mut source = RgbaImage::new(4, 4);
        source.put_pixel(2, 2, Rgba([10, 20, 30, 40]));
        let window = TileWindow::for_tile(4, 4, 2, 2, 3);

        let pixels = prepare_pixels(&source, Some(window), 0).unwrap();
        assert_eq!(pixels.dimensions(), (2, 2));
        assert_eq!(pixels.get_pixel(0, 0), &Rgba([10, 20, 30, 40]));
    }

    #[test]
    fn test_empty_window() {
        let source = checker(3, 3);
        let window = TileWindow::for_tile(3, 3, 4, 4, 0);
        assert!(window.is_empty());
        assert!(prepare_pixels(&source, Some(window), 0).is_none());
    }

    #[test]
    fn test_mip_chain_reaches_one_pixel() {
        let base = checker(8, 2);
        let sizes: Vec<_> = mip_chain(&base).iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(4, 1), (2, 1), (1, 1)]);
        assert!(mip_chain(&checker(1, 1)).is_empty());
    }
}
