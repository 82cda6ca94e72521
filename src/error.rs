//! Operation-level error type.
//!
//! Each module owns its own error enum; [`OperationError`] composes them so
//! the CLI has one type to report and turn into an exit code.

use crate::collision::CollisionError;
use crate::format::FormatError;
use crate::imaging::{BackendError, DimensionError};
use crate::paths::PathError;
use thiserror::Error;

/// Exit code for bad input: missing or unreadable source, unsupported
/// format, bad size.
pub const EXIT_INVALID_INPUT: u8 = 2;
/// Exit code for failures while doing the work: decode, encode, I/O.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Error, Debug)]
pub enum OperationError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    #[error(transparent)]
    Collision(#[from] CollisionError),
    #[error(transparent)]
    Imaging(#[from] BackendError),
}

impl OperationError {
    /// True for errors caused by the request itself rather than the work.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            OperationError::Path(PathError::InvalidSource(_) | PathError::UnreadableSource { .. })
                | OperationError::Format(_)
                | OperationError::Dimension(_)
        )
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_invalid_input() {
            EXIT_INVALID_INPUT
        } else {
            EXIT_FAILURE
        }
    }
}
