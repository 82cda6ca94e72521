//! Resize to explicit pixel dimensions.
//!
//! Same shape as [`convert`](crate::convert), with dimension validation in
//! place of the format token:
//!
//! ```text
//! width/height → source → identify → destination → destination format
//!   → parent dirs → collision check → decode + resample + encode → report
//! ```
//!
//! The output is exactly `width × height`; aspect ratio is not preserved.
//! Both values must lie in `1..=4096`. The output format follows the
//! destination extension and is encoded at the `medium` level.

use crate::collision::avoid_collision;
use crate::error::OperationError;
use crate::format::{Compression, EncoderParams, FormatRole, OutputFormat};
use crate::imaging::{Dimensions, ImageBackend, ResizeParams, RustBackend, choose_interpolation};
use crate::paths::{self, RESIZED_SUFFIX};
use crate::types::ResizeReport;
use std::path::PathBuf;
use tracing::info;

/// Input to a resize, built once from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    /// Signed so that zero and negative input reach validation.
    pub width: i64,
    pub height: i64,
    pub overwrite: bool,
}

/// Resize with the production backend.
pub fn resize(request: ResizeRequest) -> Result<ResizeReport, OperationError> {
    resize_with_backend(&RustBackend::new(), request)
}

/// Resize using a specific backend (allows testing with mock).
pub fn resize_with_backend(
    backend: &impl ImageBackend,
    request: ResizeRequest,
) -> Result<ResizeReport, OperationError> {
    let size = Dimensions::validated(request.width, request.height)?;

    let source = paths::resolve_source(&request.source)?;
    OutputFormat::from_path(&source, FormatRole::Source)?;
    let original = backend.identify(&source)?;

    let source_ext = source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let destination = paths::resolve_destination(
        request.destination.as_deref(),
        &source,
        RESIZED_SUFFIX,
        &source_ext,
    )?;
    let format = OutputFormat::from_path(&destination, FormatRole::Destination)?;
    let encoder = EncoderParams::new(format, Compression::Medium);

    paths::prepare_parent(&destination)?;
    let output = avoid_collision(&destination, request.overwrite)?;

    let interpolation = choose_interpolation(original, size);
    info!(
        source = %source.display(),
        output = %output.display(),
        from = %original,
        to = %size,
        %interpolation,
        "resizing"
    );
    backend.resize(&ResizeParams {
        source: source.clone(),
        output: output.clone(),
        size,
        interpolation,
        encoder,
        overwrite: request.overwrite,
    })?;

    let renamed_from = (output != destination).then_some(destination);
    Ok(ResizeReport {
        source,
        destination: output,
        format,
        original,
        size,
        interpolation,
        renamed_from,
    })
}
