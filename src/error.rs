use std::path::PathBuf;
use thiserror::Error;

/// The main error type for bboxcrop operations.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid line {line} in {path}: {message}")]
    NormalizedLineParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to parse XML annotation {path}: {message}")]
    AbsoluteXmlParse { path: PathBuf, message: String },

    #[error("Invalid <bndbox> #{element} in {path}: {message}")]
    AbsoluteBoxParse {
        path: PathBuf,
        element: usize,
        message: String,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save image {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read directory {path}: {message}")]
    DirectoryRead { path: PathBuf, message: String },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Missing configuration value: {0}")]
    MissingConfigValue(&'static str),
}
