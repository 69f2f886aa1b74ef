//! Annotation readers and the box types they produce.
//!
//! Two on-disk schemes are supported, each behind the [`AnnotationReader`]
//! trait:
//!
//! - [`io_yolo::NormalizedReader`]: YOLO-style text, one
//!   `<class> <x_center> <y_center> <width> <height>` row per line, expressed
//!   as fractions of the image size.
//! - [`io_voc_xml::AbsoluteReader`]: Pascal VOC-style XML, one `<bndbox>` per
//!   box with integer pixel corners.
//!
//! Readers yield one `Result` per entry so a single malformed row or element
//! is reported and skipped without losing the rest of the file.
//!
//! # Example
//!
//! ```
//! use bboxcrop::annotation::RawBox;
//!
//! let raw = RawBox::Normalized { x_center: 0.5, y_center: 0.5, width: 1.0, height: 1.0 };
//! let bbox = raw.to_pixel(100, 200);
//! assert_eq!(bbox.to_array(), [0.0, 0.0, 100.0, 200.0]);
//! ```

mod bbox;
mod coord;
pub mod io_voc_xml;
pub mod io_yolo;

use std::fmt;
use std::path::Path;

pub use bbox::BBoxXYXY;
pub use coord::{Coord, Normalized, Pixel};
pub use io_voc_xml::AbsoluteReader;
pub use io_yolo::NormalizedReader;

use crate::error::CropError;

/// A bounding box exactly as it was read, tagged by source scheme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawBox {
    /// Center and size as fractions of the image dimensions.
    Normalized {
        x_center: f64,
        y_center: f64,
        width: f64,
        height: f64,
    },
    /// Pixel corners.
    Absolute {
        x_min: i64,
        y_min: i64,
        x_max: i64,
        y_max: i64,
    },
}

impl RawBox {
    /// Converts to pixel-space XYXY without any clamping.
    pub fn to_pixel(&self, image_width: u32, image_height: u32) -> BBoxXYXY<Pixel> {
        match *self {
            RawBox::Normalized {
                x_center,
                y_center,
                width,
                height,
            } => BBoxXYXY::<Normalized>::from_cxcywh(x_center, y_center, width, height)
                .to_pixel(image_width as f64, image_height as f64),
            RawBox::Absolute {
                x_min,
                y_min,
                x_max,
                y_max,
            } => BBoxXYXY::from_xyxy(x_min as f64, y_min as f64, x_max as f64, y_max as f64),
        }
    }

    /// The four source values in file order.
    pub fn values(&self) -> [f64; 4] {
        match *self {
            RawBox::Normalized {
                x_center,
                y_center,
                width,
                height,
            } => [x_center, y_center, width, height],
            RawBox::Absolute {
                x_min,
                y_min,
                x_max,
                y_max,
            } => [x_min as f64, y_min as f64, x_max as f64, y_max as f64],
        }
    }
}

impl fmt::Display for RawBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RawBox::Normalized {
                x_center,
                y_center,
                width,
                height,
            } => write!(f, "({x_center}, {y_center}, {width}, {height})"),
            RawBox::Absolute {
                x_min,
                y_min,
                x_max,
                y_max,
            } => write!(f, "({x_min}, {y_min}, {x_max}, {y_max})"),
        }
    }
}

/// The entries of one annotation file, in encounter order.
pub type BoxEntries = Box<dyn Iterator<Item = Result<RawBox, CropError>>>;

/// Reads per-image annotation files into raw boxes.
pub trait AnnotationReader {
    /// Extension (without the dot) of the annotation files this reader handles.
    fn extension(&self) -> &'static str;

    /// Opens `path` and returns its boxes.
    ///
    /// An `Err` here means the file as a whole could not be used; per-entry
    /// problems are reported through the iterator instead.
    fn read_boxes(&self, path: &Path) -> Result<BoxEntries, CropError>;
}
