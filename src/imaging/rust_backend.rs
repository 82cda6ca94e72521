//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Decode (PNG, JPEG, TIFF) | `image` crate, format sniffed from content |
//! | Resample | `fast_image_resize` convolution: `Box` for area, `Bilinear` for linear |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (fast / default / best deflate) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with explicit quality |
//! | Encode → TIFF | `tiff::encoder::TiffEncoder` (uncompressed / LZW / Deflate) |
//!
//! Encoding goes into memory first. The output file is only created once the
//! encoder has succeeded, and is removed again if the write itself fails, so
//! a failed operation never leaves a partial image behind.

use super::backend::{BackendError, ImageBackend};
use super::params::{ConvertParams, Dimensions, Interpolation, ResizeParams};
use crate::format::{EncoderParams, OutputFormat};
use fast_image_resize::{FilterType as ResizeFilter, ResizeAlg, ResizeOptions, Resizer};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ColorType, DynamicImage, ImageReader};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Cursor, Seek, Write};
use std::path::Path;
use tiff::encoder::compression::{Compression as TiffCompression, Deflate, Lzw, Uncompressed};
use tiff::encoder::{TiffEncoder, colortype};
use tracing::debug;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Open an image for reading, sniffing the format from its content.
fn open_image(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    let io_error = |source: std::io::Error| BackendError::Io {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)
}

/// Load and decode an image from disk, trusting content over extension.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_image(path)?
        .decode()
        .map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Resample to exactly `size`; aspect ratio is not preserved.
fn resample(
    img: &DynamicImage,
    size: Dimensions,
    interpolation: Interpolation,
) -> Result<DynamicImage, String> {
    let filter = match interpolation {
        Interpolation::Area => ResizeFilter::Box,
        Interpolation::Linear => ResizeFilter::Bilinear,
    };
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter));

    let mut resized = DynamicImage::new(size.width, size.height, img.color());
    let mut resizer = Resizer::new();
    resizer
        .resize(img, &mut resized, &options)
        .map_err(|e| e.to_string())?;
    Ok(resized)
}

/// Map a zlib-style level (1–9) onto the PNG encoder's presets.
fn png_compression(level: u8) -> CompressionType {
    match level {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

fn encode(img: &DynamicImage, encoder: EncoderParams) -> Result<Vec<u8>, String> {
    match encoder.format {
        OutputFormat::Png => encode_png(img, encoder.level).map_err(|e| e.to_string()),
        OutputFormat::Jpg | OutputFormat::Jpeg => {
            encode_jpeg(img, encoder.level).map_err(|e| e.to_string())
        }
        OutputFormat::Tiff => encode_tiff(img, encoder.level).map_err(|e| e.to_string()),
    }
}

fn encode_png(img: &DynamicImage, level: u8) -> image::ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buf, png_compression(level), PngFilter::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(buf)
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> image::ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    // JPEG has no alpha channel and no 16-bit samples.
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img.write_with_encoder(encoder)?,
        _ => DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?,
    }
    Ok(buf)
}

/// Encode as TIFF; `tag` is the TIFF compression tag (1, 5 or 8).
fn encode_tiff(img: &DynamicImage, tag: u8) -> tiff::TiffResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let mut encoder = TiffEncoder::new(&mut cursor)?;
    match tag {
        1 => write_tiff(&mut encoder, img, Uncompressed)?,
        5 => write_tiff(&mut encoder, img, Lzw)?,
        _ => write_tiff(&mut encoder, img, Deflate::default())?,
    }
    drop(encoder);
    Ok(cursor.into_inner())
}

fn write_tiff<W: Write + Seek, D: TiffCompression>(
    encoder: &mut TiffEncoder<W>,
    img: &DynamicImage,
    compression: D,
) -> tiff::TiffResult<()> {
    let (width, height) = (img.width(), img.height());
    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        encoder
            .new_image_with_compression::<colortype::RGBA8, D>(width, height, compression)?
            .write_data(rgba.as_raw())
    } else {
        let rgb = img.to_rgb8();
        encoder
            .new_image_with_compression::<colortype::RGB8, D>(width, height, compression)?
            .write_data(rgb.as_raw())
    }
}

/// Write encoded bytes in one go; a failed write leaves no file behind.
///
/// Without `overwrite` the file is opened create-new, so a file that
/// appeared after collision probing is an error rather than a clobber.
fn write_output(path: &Path, bytes: &[u8], overwrite: bool) -> Result<(), BackendError> {
    let encode_error = |e: std::io::Error| BackendError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(encode_error)?;
    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    drop(file);

    if let Err(e) = written {
        let _ = std::fs::remove_file(path);
        return Err(encode_error(e));
    }
    debug!(output = %path.display(), bytes = bytes.len(), "wrote image");
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_image(path)?
            .into_dimensions()
            .map_err(|e| BackendError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let bytes = encode(&img, params.encoder).map_err(|message| BackendError::Encode {
            path: params.output.clone(),
            message,
        })?;
        write_output(&params.output, &bytes, params.overwrite)
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = resample(&img, params.size, params.interpolation).map_err(|message| {
            BackendError::Resample {
                path: params.source.clone(),
                message,
            }
        })?;
        let bytes = encode(&resized, params.encoder).map_err(|message| BackendError::Encode {
            path: params.output.clone(),
            message,
        })?;
        write_output(&params.output, &bytes, params.overwrite)
    }
}
