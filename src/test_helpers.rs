//! Shared test utilities: synthetic image fixtures and decode helpers.
//!
//! Fixtures are generated on the fly with the `image` crate so no binary
//! files need to live in the repository.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Write a textured RGB image; the format follows the extension.
pub fn write_test_image(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x * 7 + y * 13) % 256) as u8,
        ])
    });
    img.save(path)
        .unwrap_or_else(|e| panic!("failed to write fixture {}: {e}", path.display()));
}

/// Write a PNG with a varying alpha channel.
pub fn write_rgba_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, 64, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save(path)
        .unwrap_or_else(|e| panic!("failed to write fixture {}: {e}", path.display()));
}

/// Decode `path` and return its `(width, height)`.
pub fn read_dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path)
        .unwrap_or_else(|e| panic!("failed to decode {}: {e}", path.display()));
    (img.width(), img.height())
}
