//! Collision avoidance for destination paths.
//!
//! Without `--force`, an existing destination is never overwritten. Instead
//! the first free numbered sibling is used:
//!
//! ```text
//! output.jpg    (exists)
//! output_1.jpg  (exists)
//! output_2.jpg  ← chosen
//! ```
//!
//! Probing stops after [`MAX_PROBES`] attempts.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Highest numeric suffix tried before giving up.
pub const MAX_PROBES: u32 = 127;

#[derive(Error, Debug)]
pub enum CollisionError {
    #[error("Could not find a free file name for {} after {attempts} attempts", .path.display())]
    Exhausted { path: PathBuf, attempts: u32 },
}

/// Return `path` itself, or the first free `stem_N.ext` sibling.
///
/// `path` is returned unchanged when `overwrite` is set or nothing occupies it.
pub fn avoid_collision(path: &Path, overwrite: bool) -> Result<PathBuf, CollisionError> {
    if overwrite || !is_occupied(path) {
        return Ok(path.to_path_buf());
    }

    for n in 1..=MAX_PROBES {
        let candidate = numbered_variant(path, n);
        if !is_occupied(&candidate) {
            info!(
                requested = %path.display(),
                chosen = %candidate.display(),
                "destination exists, writing to a numbered copy"
            );
            return Ok(candidate);
        }
        debug!(candidate = %candidate.display(), "occupied");
    }

    Err(CollisionError::Exhausted {
        path: path.to_path_buf(),
        attempts: MAX_PROBES,
    })
}

/// `dir/stem.ext` → `dir/stem_N.ext`; extensionless names get `stem_N`.
pub fn numbered_variant(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{n}"),
    };
    path.with_file_name(name)
}

/// Anything at `path` counts, including dangling symlinks.
fn is_occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
