use clap::{ArgAction, Parser, Subcommand};
use imgconv::convert::{self, ConvertRequest};
use imgconv::format::Compression;
use imgconv::output;
use imgconv::resize::{self, ResizeRequest};
use imgconv::types::Report;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::LazyLock;
use tracing::Level;

/// Shared flags for commands that write an image.
#[derive(clap::Args, Clone)]
struct OutputArgs {
    /// Replace an existing destination instead of writing a numbered copy
    #[arg(long)]
    force: bool,
}

static VERSION: LazyLock<String> = LazyLock::new(|| {
    if env!("IMGCONV_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION").to_string();
    }
    match env!("IMGCONV_GIT_HASH") {
        "" => "dev@unknown".to_string(),
        hash => format!("dev@{hash}"),
    }
});

#[derive(Parser)]
#[command(name = "imgconv")]
#[command(about = "Convert and resize PNG, JPEG and TIFF images")]
#[command(long_about = "\
Convert and resize PNG, JPEG and TIFF images

The source file is never modified. Without --destination, the output is
written next to the source:

  convert  photo.png → photo_converted.<format>
  resize   photo.png → photo_resized.png

If the destination already exists, a numbered copy is written instead
(photo_converted_1.png, photo_converted_2.png, ...). Pass --force to
replace it.

Compression levels per format:

           low   medium   high
  png        1        5      9    (zlib level)
  jpg/jpeg  95       85     70    (quality)
  tiff    none      LZW  Deflate")]
#[command(version = VERSION.as_str())]
struct Cli {
    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log progress to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an image to another format
    Convert(ConvertArgs),
    /// Resize an image to exact pixel dimensions
    Resize(ResizeArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Image to convert
    #[arg(short, long)]
    source: PathBuf,

    /// Output path (defaults to <stem>_converted.<format> next to the source)
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Output format: png, jpg, jpeg or tiff
    #[arg(short, long)]
    format: Option<String>,

    /// Compression level
    #[arg(short, long, value_enum, default_value_t = Compression::Medium)]
    compression: Compression,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct ResizeArgs {
    /// Image to resize
    #[arg(short, long)]
    source: PathBuf,

    /// Output path (defaults to <stem>_resized.<ext> next to the source)
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Target width in pixels (1-4096)
    #[arg(long, allow_negative_numbers = true)]
    width: i64,

    /// Target height in pixels (1-4096)
    #[arg(long, allow_negative_numbers = true)]
    height: i64,

    #[command(flatten)]
    output: OutputArgs,
}

impl From<ConvertArgs> for ConvertRequest {
    fn from(args: ConvertArgs) -> Self {
        ConvertRequest {
            source: args.source,
            destination: args.destination,
            format: args.format,
            compression: args.compression,
            overwrite: args.output.force,
        }
    }
}

impl From<ResizeArgs> for ResizeRequest {
    fn from(args: ResizeArgs) -> Self {
        ResizeRequest {
            source: args.source,
            destination: args.destination,
            width: args.width,
            height: args.height,
            overwrite: args.output.force,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Convert(args) => convert::convert(args.into()).map(Report::Convert),
        Command::Resize(args) => resize::resize(args.into()).map(Report::Resize),
    };

    match result {
        Ok(report) => {
            if cli.json {
                match output::format_json(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                output::print_report(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Install the stderr log subscriber. Warnings always show; `-v` adds
/// progress and `-vv` adds path resolution detail.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
