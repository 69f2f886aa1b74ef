//! Batch configuration: where to read images and annotations, where to write
//! crops, and which annotation scheme to expect.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::annotation::{AbsoluteReader, AnnotationReader, NormalizedReader};
use crate::error::CropError;

/// Which annotation scheme the batch reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationFormat {
    /// YOLO-style `.txt`: class, x_center, y_center, width, height as fractions.
    #[default]
    #[serde(alias = "yolo", alias = "txt")]
    #[value(alias = "yolo", alias = "txt")]
    Normalized,
    /// Pascal VOC-style `.xml`: `<bndbox>` corners in pixels.
    #[serde(alias = "voc", alias = "xml")]
    #[value(alias = "voc", alias = "xml")]
    Absolute,
}

impl AnnotationFormat {
    /// Annotation file extension, without the dot.
    pub fn extension(self) -> &'static str {
        self.reader().extension()
    }

    pub fn reader(self) -> Box<dyn AnnotationReader> {
        match self {
            AnnotationFormat::Normalized => Box::new(NormalizedReader),
            AnnotationFormat::Absolute => Box::new(AbsoluteReader),
        }
    }
}

/// Everything the batch driver needs to run.
#[derive(Clone, Debug, PartialEq)]
pub struct CropConfig {
    pub image_dir: PathBuf,
    pub annotation_dir: PathBuf,
    pub output_dir: PathBuf,
    pub annotation_format: AnnotationFormat,
}

impl CropConfig {
    pub fn new(
        image_dir: impl Into<PathBuf>,
        annotation_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        annotation_format: AnnotationFormat,
    ) -> Self {
        Self {
            image_dir: image_dir.into(),
            annotation_dir: annotation_dir.into(),
            output_dir: output_dir.into(),
            annotation_format,
        }
    }
}

/// A config with every field optional, filled from a file and/or CLI flags.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PartialCropConfig {
    pub image_dir: Option<PathBuf>,
    pub annotation_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub annotation_format: Option<AnnotationFormat>,
}

impl PartialCropConfig {
    /// Loads a YAML config file; any field may be left out.
    pub fn from_yaml_file(path: &Path) -> Result<Self, CropError> {
        let data = fs::read_to_string(path).map_err(CropError::Io)?;
        Self::from_yaml_str(&data, path)
    }

    /// Parses a YAML document; `path` only labels errors.
    pub fn from_yaml_str(yaml: &str, path: &Path) -> Result<Self, CropError> {
        serde_yaml::from_str(yaml).map_err(|source| CropError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fields set in `other` win.
    pub fn merge(self, other: PartialCropConfig) -> Self {
        Self {
            image_dir: other.image_dir.or(self.image_dir),
            annotation_dir: other.annotation_dir.or(self.annotation_dir),
            output_dir: other.output_dir.or(self.output_dir),
            annotation_format: other.annotation_format.or(self.annotation_format),
        }
    }

    pub fn into_config(self) -> Result<CropConfig, CropError> {
        Ok(CropConfig {
            image_dir: self
                .image_dir
                .ok_or(CropError::MissingConfigValue("image_dir"))?,
            annotation_dir: self
                .annotation_dir
                .ok_or(CropError::MissingConfigValue("annotation_dir"))?,
            output_dir: self
                .output_dir
                .ok_or(CropError::MissingConfigValue("output_dir"))?,
            annotation_format: self.annotation_format.unwrap_or_default(),
        })
    }
}
