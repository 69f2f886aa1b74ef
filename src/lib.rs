//! bboxcrop: batch-crop images from bounding-box annotations.
//!
//! Every image in a directory is paired with an annotation file of the same
//! stem, and each box in that file becomes its own output image. Two
//! annotation schemes are supported: YOLO-style normalized text and Pascal
//! VOC-style XML with pixel corners.
//!
//! # Modules
//!
//! - [`annotation`]: box types and the two annotation readers
//! - [`resolve`]: conversion to clamped pixel boxes
//! - [`crop`]: cutting resolved boxes out of images
//! - [`batch`]: the directory-level driver and its report
//! - [`config`]: batch configuration
//! - [`error`]: error types for bboxcrop operations

pub mod annotation;
pub mod batch;
pub mod config;
pub mod crop;
pub mod error;
pub mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

pub use batch::{process, BatchDriver, BatchReport};
pub use config::{AnnotationFormat, CropConfig};
pub use error::CropError;

/// The bboxcrop CLI application.
#[derive(Parser)]
#[command(name = "bboxcrop")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Crop every annotated box out of a directory of images.
    Crop(CropArgs),
}

/// Arguments for the crop subcommand.
#[derive(clap::Args)]
struct CropArgs {
    /// YAML file with image_dir, annotation_dir, output_dir and annotation_format.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of input images.
    #[arg(long = "images")]
    image_dir: Option<PathBuf>,

    /// Directory of annotation files named after the image stems.
    #[arg(long = "annotations")]
    annotation_dir: Option<PathBuf>,

    /// Directory for cropped images (created if missing).
    #[arg(long = "output")]
    output_dir: Option<PathBuf>,

    /// Annotation scheme.
    #[arg(long, value_enum)]
    format: Option<AnnotationFormat>,

    /// Report format ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Initialize logging once.
///
/// `RUST_LOG` takes precedence over `default_filter` when set.
pub fn init_logging(default_filter: LevelFilter) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter.as_str()),
    );
    // Already initialized (tests, embedding callers); keep the existing logger.
    let _ = builder.try_init();
}

/// Run the bboxcrop CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CropError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Crop(args)) => run_crop(args),
        None => {
            println!("bboxcrop {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Batch-crop images from bounding-box annotations.");
            println!();
            println!("Run 'bboxcrop --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the crop subcommand.
fn run_crop(args: CropArgs) -> Result<(), CropError> {
    init_logging(LevelFilter::Info);

    let from_file = match &args.config {
        Some(path) => config::PartialCropConfig::from_yaml_file(path)?,
        None => config::PartialCropConfig::default(),
    };
    let from_cli = config::PartialCropConfig {
        image_dir: args.image_dir,
        annotation_dir: args.annotation_dir,
        output_dir: args.output_dir,
        annotation_format: args.format,
    };
    let config = from_file.merge(from_cli).into_config()?;

    let report = process(config)?;

    match args.report.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(CropError::ReportSerialize)?;
            println!("{json}");
        }
        _ => print!("{report}"),
    }

    Ok(())
}
