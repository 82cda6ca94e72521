//! Output format policy.
//!
//! Decides which encoder an operation uses and how hard it compresses. The
//! supported set is fixed:
//!
//! | Token | Encoder | low | medium | high | Number means |
//! |---|---|---|---|---|---|
//! | `png` | PNG | 1 | 5 | 9 | zlib level |
//! | `jpg`, `jpeg` | JPEG | 95 | 85 | 70 | quality (inverted) |
//! | `tiff` | TIFF | 1 | 5 | 8 | TIFF compression tag |
//!
//! JPEG is the odd one out: its number is a *quality*, so asking for low
//! compression yields the highest value. TIFF numbers are the values of the
//! TIFF `Compression` tag: 1 = none, 5 = LZW, 8 = Deflate.
//!
//! ## Token precedence
//!
//! 1. An explicit `--format` token.
//! 2. The destination's file extension.
//! 3. `png`.
//!
//! When both a token and a destination extension are given they must name
//! the same encoder, so a file's contents always match its name.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Tokens accepted for `--format` and as file extensions, sorted.
pub const SUPPORTED_FORMATS: &[&str] = &["jpeg", "jpg", "png", "tiff"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error(
        "Unsupported {role} format: {}. Supported formats: {}",
        shown(.value),
        SUPPORTED_FORMATS.join(", ")
    )]
    Unsupported { role: FormatRole, value: String },
    #[error("Requested format {format} does not match destination extension .{extension}")]
    Conflict {
        format: OutputFormat,
        extension: OutputFormat,
    },
}

fn shown(value: &str) -> &str {
    if value.is_empty() { "(none)" } else { value }
}

/// Where a rejected format token came from, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRole {
    Format,
    Source,
    Destination,
}

impl fmt::Display for FormatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatRole::Format => "output",
            FormatRole::Source => "source",
            FormatRole::Destination => "destination",
        })
    }
}

/// A supported format token. `Jpg` and `Jpeg` share an encoder but keep
/// their spelling so derived file names match what the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpg,
    Jpeg,
    Tiff,
}

impl OutputFormat {
    /// Parse a format token, case-insensitively.
    pub fn from_token(token: &str, role: FormatRole) -> Result<Self, FormatError> {
        match token.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" => Ok(OutputFormat::Jpg),
            "jpeg" => Ok(OutputFormat::Jpeg),
            "tiff" => Ok(OutputFormat::Tiff),
            _ => Err(FormatError::Unsupported {
                role,
                value: token.to_string(),
            }),
        }
    }

    /// Parse the extension of `path`. A missing extension is unsupported.
    pub fn from_path(path: &Path, role: FormatRole) -> Result<Self, FormatError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy())
            .unwrap_or_default();
        Self::from_token(&ext, role)
    }

    /// File extension written for this format (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Tiff => "tiff",
        }
    }

    pub fn is_jpeg(self) -> bool {
        matches!(self, OutputFormat::Jpg | OutputFormat::Jpeg)
    }

    /// Whether two tokens go through the same encoder.
    pub fn same_encoder(self, other: OutputFormat) -> bool {
        self == other || (self.is_jpeg() && other.is_jpeg())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// User-facing compression setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compression::Low => "low",
            Compression::Medium => "medium",
            Compression::High => "high",
        })
    }
}

/// Numeric encoder level for a format/compression pair.
pub fn compression_level(format: OutputFormat, compression: Compression) -> u8 {
    match (format, compression) {
        (OutputFormat::Png, Compression::Low) => 1,
        (OutputFormat::Png, Compression::Medium) => 5,
        (OutputFormat::Png, Compression::High) => 9,
        // Quality, not compression: less compression is a bigger number.
        (OutputFormat::Jpg | OutputFormat::Jpeg, Compression::Low) => 95,
        (OutputFormat::Jpg | OutputFormat::Jpeg, Compression::Medium) => 85,
        (OutputFormat::Jpg | OutputFormat::Jpeg, Compression::High) => 70,
        (OutputFormat::Tiff, Compression::Low) => 1,
        (OutputFormat::Tiff, Compression::Medium) => 5,
        (OutputFormat::Tiff, Compression::High) => 8,
    }
}

/// Encoder plus its numeric level, as handed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncoderParams {
    pub format: OutputFormat,
    pub level: u8,
}

impl EncoderParams {
    pub fn new(format: OutputFormat, compression: Compression) -> Self {
        Self {
            format,
            level: compression_level(format, compression),
        }
    }

    /// Human-readable description of the level, e.g. `quality 85`.
    pub fn describe_level(&self) -> String {
        match self.format {
            OutputFormat::Png => format!("zlib level {}", self.level),
            OutputFormat::Jpg | OutputFormat::Jpeg => format!("quality {}", self.level),
            // Same dispatch as the TIFF encoder: anything above LZW is Deflate.
            OutputFormat::Tiff => match self.level {
                1 => "uncompressed".to_string(),
                5 => "LZW".to_string(),
                _ => "Deflate".to_string(),
            },
        }
    }
}

/// Pick the output format: explicit token, then destination extension, then PNG.
///
/// A token and a destination extension must name the same encoder
/// (`jpg` and `jpeg` are interchangeable). A destination without an
/// extension falls through; the path resolver appends the matching
/// extension afterwards.
pub fn resolve_format(
    token: Option<&str>,
    destination: Option<&Path>,
) -> Result<OutputFormat, FormatError> {
    let requested = token
        .map(|t| OutputFormat::from_token(t, FormatRole::Format))
        .transpose()?;
    let from_destination = match destination {
        Some(dest) if dest.extension().is_some() => {
            Some(OutputFormat::from_path(dest, FormatRole::Destination)?)
        }
        _ => None,
    };

    match (requested, from_destination) {
        (Some(format), Some(extension)) if !format.same_encoder(extension) => {
            Err(FormatError::Conflict { format, extension })
        }
        (Some(format), _) => Ok(format),
        (None, Some(extension)) => Ok(extension),
        (None, None) => Ok(OutputFormat::Png),
    }
}
