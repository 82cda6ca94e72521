//! # imgconv
//!
//! Convert images between PNG, JPEG and TIFF, or resize them to exact pixel
//! dimensions, without ever touching the source file.
//!
//! # Architecture: Validate, Resolve, Encode
//!
//! Both operations run the same straight-line pipeline:
//!
//! ```text
//! 1. Validate  format token / dimensions, source file   (read-only)
//! 2. Resolve   destination path, parent dirs, collision (creates dirs only)
//! 3. Encode    decode → (resample) → encode → write     (backend)
//! ```
//!
//! Every check that can reject the request happens before the first
//! filesystem mutation, so a typo in `--format` never leaves empty
//! directories behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`convert`] | Convert operation: format selection, compression level, report |
//! | [`resize`] | Resize operation: dimension validation, interpolation choice, report |
//! | [`format`] | Supported formats, compression table, encoder parameters |
//! | [`paths`] | Home expansion, absolute paths, default destination naming |
//! | [`collision`] | Numbered `_N` variants so existing files are never clobbered |
//! | [`imaging`] | Backend trait plus the pure-Rust implementation |
//! | [`error`] | Composed error type and exit codes |
//! | [`types`] | Operation reports, printed as text or JSON |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Never Overwrite by Accident
//!
//! Unless `--force` is given, an existing destination is left alone and the
//! output goes to the first free `name_N.ext` instead. The write itself uses
//! `create_new`, so a file that appears between the check and the write
//! fails the operation rather than being replaced.
//!
//! ## Backend Trait
//!
//! Operations take `&impl ImageBackend`. Production uses
//! [`imaging::RustBackend`]; unit tests use a recording mock so the path and
//! policy logic can be tested without encoding a single pixel.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and encoding use the `image` and `tiff` crates; resampling uses
//! `fast_image_resize`. No system libraries are needed.

pub mod collision;
pub mod convert;
pub mod error;
pub mod format;
pub mod imaging;
pub mod output;
pub mod paths;
pub mod resize;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
