//! The batch driver: walks an image directory, pairs each image with its
//! annotation file by stem, and writes one output image per box.
//!
//! Images are handled strictly one at a time. An image is decoded at most
//! once, on its first valid box, and dropped before the next image starts.

mod report;

pub use report::{BatchReport, BoxOutcome, BoxReport, ImageReport, ImageStatus};

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use walkdir::WalkDir;

use crate::annotation::{AnnotationReader, RawBox};
use crate::config::CropConfig;
use crate::crop::{crop, ImageRecord};
use crate::error::CropError;
use crate::resolve::resolve;

/// Extensions (compared case-insensitively) that mark a file as an image.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Runs a whole batch described by `config`.
pub fn process(config: CropConfig) -> Result<BatchReport, CropError> {
    BatchDriver::new(config).run()
}

/// Drives reader, resolver and cropper over every image in a directory.
pub struct BatchDriver {
    config: CropConfig,
    reader: Box<dyn AnnotationReader>,
}

impl BatchDriver {
    pub fn new(config: CropConfig) -> Self {
        let reader = config.annotation_format.reader();
        Self { config, reader }
    }

    /// Processes every qualifying image.
    ///
    /// Only environment failures are returned as `Err`: the output directory
    /// cannot be created or the image directory cannot be listed. Everything
    /// else is logged and recorded in the report.
    pub fn run(&self) -> Result<BatchReport, CropError> {
        fs::create_dir_all(&self.config.output_dir).map_err(CropError::Io)?;

        let images = collect_images(&self.config.image_dir)?;
        let mut report = BatchReport::new(&self.config.output_dir);

        for image_path in images {
            report.add(self.process_image(&image_path));
        }

        info!(
            "Finished: {} crop(s), {} fallback(s), {} failure(s) across {} image(s)",
            report.cropped_count(),
            report.fallback_count(),
            report.failed_count(),
            report.images.len()
        );

        Ok(report)
    }

    fn process_image(&self, image_path: &Path) -> ImageReport {
        let file_name = file_name_string(image_path);
        let stem = image_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());
        let extension = image_path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        let annotation_path = self
            .config
            .annotation_dir
            .join(format!("{stem}.{}", self.reader.extension()));

        if !annotation_path.is_file() {
            info!("No coordinates file found for image: {file_name}");
            return ImageReport::new(file_name, ImageStatus::MissingAnnotation);
        }

        info!("Processing image: {file_name}");
        let entries = match self.reader.read_boxes(&annotation_path) {
            Ok(entries) => entries,
            Err(err) => {
                error!("Skipping {file_name}: {err}");
                return ImageReport::new(
                    file_name,
                    ImageStatus::AnnotationUnreadable {
                        message: err.to_string(),
                    },
                );
            }
        };

        let mut image_report = ImageReport::new(file_name.clone(), ImageStatus::Processed);
        let mut record: Option<Result<ImageRecord, CropError>> = None;
        let mut crop_index = 0;

        for entry in entries {
            let raw = match entry {
                Ok(raw) => raw,
                Err(err) => {
                    warn!("{err}");
                    image_report.skipped_entries += 1;
                    continue;
                }
            };

            let output = self
                .config
                .output_dir
                .join(format!("{stem}_crop{crop_index}.{extension}"));

            let loaded = record.get_or_insert_with(|| ImageRecord::open(image_path));
            let outcome = match loaded {
                Ok(record) => crop_and_save(record, &raw, &output),
                Err(err) => Err(err.to_string()),
            };

            let outcome = outcome.unwrap_or_else(|message| {
                error!("Error processing {file_name} with coordinates {raw}. Error: {message}");
                BoxOutcome::Failed { message }
            });

            image_report.boxes.push(BoxReport {
                index: crop_index,
                coordinates: raw.values(),
                output,
                outcome,
            });
            crop_index += 1;
        }

        image_report
    }
}

fn crop_and_save(record: &ImageRecord, raw: &RawBox, output: &Path) -> Result<BoxOutcome, String> {
    info!("Original image size: ({}, {})", record.width, record.height);

    let resolved = resolve(raw, record.width, record.height);
    info!("Requested crop box: {}", resolved.requested);
    info!("Adjusted crop box: {}", resolved.clamped);

    let result = crop(&record.image, &resolved);
    if result.is_fallback() {
        info!("Invalid crop box; saving the original image.");
    }

    let image = result.image();
    image.save(output).map_err(|source| {
        CropError::ImageSave {
            path: output.to_path_buf(),
            source,
        }
        .to_string()
    })?;
    info!("Cropped image saved to: {}", output.display());

    Ok(if result.is_fallback() {
        BoxOutcome::Fallback
    } else {
        BoxOutcome::Cropped {
            width: image.width(),
            height: image.height(),
        }
    })
}

fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, CropError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| CropError::DirectoryRead {
            path: dir.to_path_buf(),
            message: source.to_string(),
        })?;

        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
}

fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
