//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the operations ([`convert`](crate::convert),
//! [`resize`](crate::resize)), which validate input and decide paths, and the
//! [`backend`](super::backend), which does the pixel work. The split lets
//! tests swap in a mock backend without touching operation logic.
//!
//! ## Types
//!
//! - [`Dimensions`]: width × height in pixels.
//! - [`Interpolation`]: resampling method picked for a resize.
//! - [`ConvertParams`]: source, output and encoder for a format conversion.
//! - [`ResizeParams`]: the same plus target size and interpolation.

use crate::format::EncoderParams;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Largest accepted width or height for a resize.
pub const MAX_DIMENSION: u32 = 4096;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("{axis} must be a positive integer, got {value}")]
    NotPositive { axis: Axis, value: i64 },
    #[error("{axis} must not exceed {max}, got {value}")]
    TooLarge { axis: Axis, value: i64, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Width => "width",
            Axis::Height => "height",
        })
    }
}

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Validate raw CLI values into a resize target in `1..=MAX_DIMENSION`.
    ///
    /// Width is checked first, so a request bad on both axes reports width.
    pub fn validated(width: i64, height: i64) -> Result<Self, DimensionError> {
        Ok(Self {
            width: check_axis(Axis::Width, width)?,
            height: check_axis(Axis::Height, height)?,
        })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn check_axis(axis: Axis, value: i64) -> Result<u32, DimensionError> {
    if value <= 0 {
        return Err(DimensionError::NotPositive { axis, value });
    }
    if value > i64::from(MAX_DIMENSION) {
        return Err(DimensionError::TooLarge {
            axis,
            value,
            max: MAX_DIMENSION,
        });
    }
    Ok(value as u32)
}

/// Resampling method for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Area averaging; used when shrinking on both axes.
    Area,
    /// Linear; used for enlarging or mixed scaling.
    Linear,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interpolation::Area => "area",
            Interpolation::Linear => "linear",
        })
    }
}

/// Parameters for a format conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub encoder: EncoderParams,
    /// Replace an existing file at `output` instead of failing.
    pub overwrite: bool,
}

/// Parameters for a resize to exact dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub size: Dimensions,
    pub interpolation: Interpolation,
    pub encoder: EncoderParams,
    pub overwrite: bool,
}
