//! Reports produced by the operations.
//!
//! These are what the CLI prints, either as text through
//! [`output`](crate::output) or serialized as JSON with `--json`.

use crate::format::OutputFormat;
use crate::imaging::{Dimensions, Interpolation};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub format: OutputFormat,
    /// Encoder level actually used (zlib level, JPEG quality or TIFF tag).
    pub level: u8,
    /// Human-readable form of `level`.
    pub level_description: String,
    /// Set when the requested destination existed and a numbered copy was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renamed_from: Option<PathBuf>,
}

/// Outcome of a successful resize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub format: OutputFormat,
    pub original: Dimensions,
    pub size: Dimensions,
    pub interpolation: Interpolation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renamed_from: Option<PathBuf>,
}

/// Either report, tagged with the operation name when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Report {
    Convert(ConvertReport),
    Resize(ResizeReport),
}
