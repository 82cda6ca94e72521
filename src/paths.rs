//! Source validation and destination derivation.
//!
//! Every path the tool touches goes through here: `~` is expanded, relative
//! paths are made absolute against the current directory, and `.`/`..`
//! components are folded away lexically.
//!
//! ## Default destinations
//!
//! When no destination is given, one is derived next to the source by
//! appending a suffix to the stem:
//!
//! ```text
//! convert  photos/input.png -f jpg  →  photos/input_converted.jpg
//! resize   photos/input.png         →  photos/input_resized.png
//! ```
//!
//! Convert uses the target format's extension; resize keeps the source's.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Stem suffix for derived convert destinations.
pub const CONVERTED_SUFFIX: &str = "_converted";
/// Stem suffix for derived resize destinations.
pub const RESIZED_SUFFIX: &str = "_resized";

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Source file does not exist: {}", .0.display())]
    InvalidSource(PathBuf),
    #[error("Cannot read source file {}: {source}", .path.display())]
    UnreadableSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Expand a leading `~` to the user's home directory.
///
/// Non-UTF-8 paths are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

/// Make `path` absolute and fold `.`/`..` components without touching the
/// filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf, PathError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(PathError::CurrentDir)?
            .join(path)
    };
    Ok(normalize_lexically(&absolute))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve the source to an absolute, canonical path of an existing,
/// readable regular file.
pub fn resolve_source(source: &Path) -> Result<PathBuf, PathError> {
    let expanded = expand_home(source);
    let invalid =
        || PathError::InvalidSource(absolutize(&expanded).unwrap_or_else(|_| expanded.clone()));

    let canonical = expanded.canonicalize().map_err(|_| invalid())?;
    if !canonical.is_file() {
        return Err(invalid());
    }
    std::fs::File::open(&canonical).map_err(|source| PathError::UnreadableSource {
        path: canonical.clone(),
        source,
    })?;
    debug!(source = %canonical.display(), "resolved source");
    Ok(canonical)
}

/// Resolve the destination for an operation on `source`.
///
/// - `Some(dest)`: expanded and made absolute; `extension` is appended when
///   `dest` has none.
/// - `None`: `<source dir>/<source stem><suffix>.<extension>`.
///
/// No directories are created; see [`prepare_parent`].
pub fn resolve_destination(
    destination: Option<&Path>,
    source: &Path,
    suffix: &str,
    extension: &str,
) -> Result<PathBuf, PathError> {
    let resolved = match destination {
        Some(dest) => {
            let mut dest = absolutize(&expand_home(dest))?;
            if dest.extension().is_none() {
                dest.set_extension(extension);
            }
            dest
        }
        None => default_destination(source, suffix, extension),
    };
    debug!(destination = %resolved.display(), "resolved destination");
    Ok(resolved)
}

/// `<dir>/<stem><suffix>.<extension>` next to `source`.
pub fn default_destination(source: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let name = if extension.is_empty() {
        format!("{stem}{suffix}")
    } else {
        format!("{stem}{suffix}.{extension}")
    };
    source.with_file_name(name)
}

/// Create any missing parent directories of `path`.
pub fn prepare_parent(path: &Path) -> Result<(), PathError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| PathError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
