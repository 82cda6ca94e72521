//! Format conversion.
//!
//! Runs a single conversion through these steps, stopping at the first
//! failure:
//!
//! ```text
//! format token → source → destination → destination format
//!   → parent dirs → collision check → decode + encode → report
//! ```
//!
//! Everything up to the destination format check is read-only, so a bad
//! `--format`, a format that contradicts the destination extension, or a
//! missing source never creates directories or files. The
//! source file itself is never written to.

use crate::collision::avoid_collision;
use crate::error::OperationError;
use crate::format::{Compression, EncoderParams, FormatRole, OutputFormat, resolve_format};
use crate::imaging::{ConvertParams, ImageBackend, RustBackend};
use crate::paths::{self, CONVERTED_SUFFIX};
use crate::types::ConvertReport;
use std::path::PathBuf;
use tracing::info;

/// Input to a conversion, built once from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    /// Raw `--format` token; validated here rather than by the parser.
    pub format: Option<String>,
    pub compression: Compression,
    pub overwrite: bool,
}

/// Convert with the production backend.
pub fn convert(request: ConvertRequest) -> Result<ConvertReport, OperationError> {
    convert_with_backend(&RustBackend::new(), request)
}

/// Convert using a specific backend (allows testing with mock).
pub fn convert_with_backend(
    backend: &impl ImageBackend,
    request: ConvertRequest,
) -> Result<ConvertReport, OperationError> {
    let format = resolve_format(request.format.as_deref(), request.destination.as_deref())?;
    let encoder = EncoderParams::new(format, request.compression);

    let source = paths::resolve_source(&request.source)?;
    OutputFormat::from_path(&source, FormatRole::Source)?;

    let destination = paths::resolve_destination(
        request.destination.as_deref(),
        &source,
        CONVERTED_SUFFIX,
        format.extension(),
    )?;
    OutputFormat::from_path(&destination, FormatRole::Destination)?;

    paths::prepare_parent(&destination)?;
    let output = avoid_collision(&destination, request.overwrite)?;

    info!(
        source = %source.display(),
        output = %output.display(),
        format = %format,
        level = encoder.level,
        "converting"
    );
    backend.convert(&ConvertParams {
        source: source.clone(),
        output: output.clone(),
        encoder,
        overwrite: request.overwrite,
    })?;

    let renamed_from = (output != destination).then_some(destination);
    Ok(ConvertReport {
        source,
        destination: output,
        format,
        level: encoder.level,
        level_description: encoder.describe_level(),
        renamed_from,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::BackendError;
    use crate::paths::PathError;
    use std::path::Path;
    use tempfile::TempDir;

    fn request(source: &Path) -> ConvertRequest {
        ConvertRequest {
            source: source.to_path_buf(),
            destination: None,
            format: None,
            compression: Compression::Medium,
            overwrite: false,
        }
    }

    /// A source file whose bytes don't matter: the mock never reads it.
    fn fake_source(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"pixels").unwrap();
        path.canonicalize().unwrap()
    }

    fn converted_output(backend: &MockBackend) -> String {
        match backend.get_operations().as_slice() {
            [RecordedOp::Convert { output, .. }] => output.clone(),
            other => panic!("expected one convert, got {other:?}"),
        }
    }

    #[test]
    fn default_destination_is_converted_png() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let backend = MockBackend::new();

        let report = convert_with_backend(&backend, request(&source)).unwrap();

        let expected = source.with_file_name("input_converted.png");
        assert_eq!(report.destination, expected);
        assert_eq!(report.format, OutputFormat::Png);
        assert_eq!(report.level, 5);
        assert_eq!(report.renamed_from, None);
        assert_eq!(converted_output(&backend), expected.to_string_lossy());
    }

    #[test]
    fn format_token_changes_default_extension() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let backend = MockBackend::new();

        let report = convert_with_backend(
            &backend,
            ConvertRequest {
                format: Some("JPEG".into()),
                compression: Compression::Low,
                ..request(&source)
            },
        )
        .unwrap();

        assert_eq!(
            report.destination,
            source.with_file_name("input_converted.jpeg")
        );
        assert_eq!(report.format, OutputFormat::Jpeg);
        assert_eq!(report.level, 95);
    }

    #[test]
    fn destination_extension_picks_format() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let dest = tmp.path().join("out.tiff");
        let backend = MockBackend::new();

        let report = convert_with_backend(
            &backend,
            ConvertRequest {
                destination: Some(dest),
                compression: Compression::High,
                ..request(&source)
            },
        )
        .unwrap();

        assert_eq!(report.format, OutputFormat::Tiff);
        assert_eq!(report.level, 8);
        assert_eq!(report.level_description, "Deflate");
    }

    #[test]
    fn nested_destination_dirs_are_created() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let dest = tmp.path().join("a/b/out.jpg");
        let backend = MockBackend::new();

        convert_with_backend(
            &backend,
            ConvertRequest {
                destination: Some(dest.clone()),
                ..request(&source)
            },
        )
        .unwrap();

        assert!(tmp.path().join("a/b").is_dir());
    }

    #[test]
    fn existing_destination_gets_numbered_copy() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let dest = tmp.path().join("output.jpg");
        std::fs::write(&dest, b"first run").unwrap();
        let backend = MockBackend::new();

        let report = convert_with_backend(
            &backend,
            ConvertRequest {
                destination: Some(dest.clone()),
                ..request(&source)
            },
        )
        .unwrap();

        assert_eq!(report.destination, tmp.path().join("output_1.jpg"));
        assert_eq!(report.renamed_from, Some(dest.clone()));
        assert_eq!(std::fs::read(&dest).unwrap(), b"first run");
    }

    #[test]
    fn force_targets_existing_destination() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let dest = tmp.path().join("output.jpg");
        std::fs::write(&dest, b"first run").unwrap();
        let backend = MockBackend::new();

        let report = convert_with_backend(
            &backend,
            ConvertRequest {
                destination: Some(dest.clone()),
                overwrite: true,
                ..request(&source)
            },
        )
        .unwrap();

        assert_eq!(report.destination, dest);
        assert!(matches!(
            backend.get_operations().as_slice(),
            [RecordedOp::Convert {
                overwrite: true,
                ..
            }]
        ));
    }

    #[test]
    fn unsupported_token_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let dest = tmp.path().join("new-dir/out.bmp");
        let backend = MockBackend::new();

        let err = convert_with_backend(
            &backend,
            ConvertRequest {
                destination: Some(dest),
                format: Some("bmp".into()),
                ..request(&source)
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            OperationError::Format(FormatError::Unsupported { ref value, .. }) if value == "bmp"
        ));
        assert!(!tmp.path().join("new-dir").exists());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn unsupported_destination_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let backend = MockBackend::new();

        let err = convert_with_backend(
            &backend,
            ConvertRequest {
                destination: Some(tmp.path().join("out.gif")),
                format: Some("png".into()),
                ..request(&source)
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            OperationError::Format(FormatError::Unsupported {
                role: FormatRole::Destination,
                ..
            })
        ));
    }

    #[test]
    fn format_contradicting_destination_extension_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let dest = tmp.path().join("new-dir/out.jpg");
        let backend = MockBackend::new();

        let err = convert_with_backend(
            &backend,
            ConvertRequest {
                destination: Some(dest.clone()),
                format: Some("png".into()),
                ..request(&source)
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            OperationError::Format(FormatError::Conflict {
                format: OutputFormat::Png,
                extension: OutputFormat::Jpg,
            })
        ));
        assert_eq!(err.exit_code(), 2);
        assert!(!tmp.path().join("new-dir").exists());
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn real_backend_contents_match_destination_extension() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("input.png");
        crate::test_helpers::write_test_image(&source, 24, 24);
        let dest = tmp.path().join("out.jpeg");

        let report = convert(ConvertRequest {
            destination: Some(dest.clone()),
            format: Some("jpg".into()),
            ..request(&source)
        })
        .unwrap();

        assert_eq!(report.destination, dest);
        let bytes = std::fs::read(&dest).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn unsupported_source_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.webp");
        let backend = MockBackend::new();

        let err = convert_with_backend(&backend, request(&source)).unwrap_err();
        assert!(matches!(
            err,
            OperationError::Format(FormatError::Unsupported {
                role: FormatRole::Source,
                ..
            })
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn missing_source_is_invalid_source() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();

        let err =
            convert_with_backend(&backend, request(&tmp.path().join("no_such_file.png")))
                .unwrap_err();
        assert!(matches!(
            err,
            OperationError::Path(PathError::InvalidSource(_))
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn backend_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let source = fake_source(tmp.path(), "input.png");
        let backend = MockBackend::failing("not an image");

        let err = convert_with_backend(&backend, request(&source)).unwrap_err();
        assert!(matches!(
            err,
            OperationError::Imaging(BackendError::Decode { .. })
        ));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn real_backend_leaves_source_untouched() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("input.png");
        crate::test_helpers::write_test_image(&source, 48, 32);
        let before = std::fs::read(&source).unwrap();

        let report = convert(request(&source)).unwrap();

        assert_eq!(std::fs::read(&source).unwrap(), before);
        assert!(report.destination.ends_with("input_converted.png"));
        assert_eq!(
            crate::test_helpers::read_dimensions(&report.destination),
            (48, 32)
        );
    }

    #[test]
    fn real_backend_second_run_writes_numbered_copy() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("input.png");
        crate::test_helpers::write_test_image(&source, 16, 16);
        let dest = tmp.path().join("output.jpg");
        let req = ConvertRequest {
            destination: Some(dest.clone()),
            format: Some("jpg".into()),
            ..request(&source)
        };

        convert(req.clone()).unwrap();
        let first = std::fs::read(&dest).unwrap();
        let second = convert(req).unwrap();

        assert_eq!(second.destination, tmp.path().join("output_1.jpg"));
        assert_eq!(std::fs::read(&dest).unwrap(), first);
    }

    #[test]
    fn real_backend_corrupt_source_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("broken.png");
        std::fs::write(&source, b"this is not an image").unwrap();

        let err = convert(request(&source)).unwrap_err();

        assert!(matches!(
            err,
            OperationError::Imaging(BackendError::Decode { .. })
        ));
        assert!(!tmp.path().join("broken_converted.png").exists());
    }
}
