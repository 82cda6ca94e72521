//! Image processing behind a swappable backend.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` (header only) |
//! | **Decode** | `image` crate, format sniffed from content |
//! | **Resample** | `fast_image_resize`: box filter (area) or bilinear |
//! | **Encode PNG / JPEG** | `image::codecs::{png, jpeg}` |
//! | **Encode TIFF** | `tiff` encoder (none / LZW / Deflate) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for resize decisions (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::choose_interpolation;
pub use params::{
    Axis, ConvertParams, DimensionError, Dimensions, Interpolation, MAX_DIMENSION, ResizeParams,
};
pub use rust_backend::RustBackend;
