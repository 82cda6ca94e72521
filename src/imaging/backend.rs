//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, convert, and resize. Decode, encode and resampling all
//! live behind it; nothing outside this module touches pixels.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::{ConvertParams, Dimensions, ResizeParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("Failed to resize {}: {message}", .path.display())]
    Resample { path: PathBuf, message: String },
    #[error("Failed to write image to {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },
}

/// Trait for image processing backends.
///
/// Implementations must not leave a file at the output path when an
/// operation fails before or during encoding.
pub trait ImageBackend {
    /// Read image dimensions. Fails on anything that is not a decodable image.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source and re-encode it with the requested encoder.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;

    /// Decode, resample to exact dimensions, and encode.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
