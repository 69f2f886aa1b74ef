//! Cutting resolved boxes out of decoded images.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageError, ImageReader};

use crate::error::CropError;
use crate::resolve::ResolvedBox;

/// A decoded image together with its pixel size.
pub struct ImageRecord {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
}

impl ImageRecord {
    /// Decodes the image at `path`.
    ///
    /// The codec is sniffed from the file's leading bytes, falling back to the
    /// extension only when the contents are not recognized.
    pub fn open(path: &Path) -> Result<Self, CropError> {
        let decode_error = |source| CropError::ImageDecode {
            path: path.to_path_buf(),
            source,
        };
        let image = ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(|err| decode_error(ImageError::IoError(err)))?
            .decode()
            .map_err(decode_error)?;
        Ok(Self::from_image(image))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
        }
    }
}

/// Outcome of cropping one box.
#[derive(Debug)]
pub enum CropResult<'a> {
    /// A new image holding just the boxed region.
    Cropped(DynamicImage),
    /// The box was degenerate; this is the source image, untouched.
    Passthrough(&'a DynamicImage),
}

impl CropResult<'_> {
    pub fn image(&self) -> &DynamicImage {
        match self {
            CropResult::Cropped(image) => image,
            CropResult::Passthrough(image) => image,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CropResult::Passthrough(_))
    }
}

/// Crops `[xmin, xmax) x [ymin, ymax)` out of `image`.
///
/// Box edges are rounded to the nearest pixel. Degenerate boxes, and boxes
/// whose rounded region is empty, hand back the original image instead.
pub fn crop<'a>(image: &'a DynamicImage, resolved: &ResolvedBox) -> CropResult<'a> {
    if resolved.is_degenerate() {
        return CropResult::Passthrough(image);
    }

    let (img_w, img_h) = image.dimensions();
    let x0 = to_pixel_edge(resolved.xmin(), img_w);
    let y0 = to_pixel_edge(resolved.ymin(), img_h);
    let x1 = to_pixel_edge(resolved.xmax(), img_w);
    let y1 = to_pixel_edge(resolved.ymax(), img_h);

    if x1 <= x0 || y1 <= y0 {
        return CropResult::Passthrough(image);
    }

    CropResult::Cropped(image.crop_imm(x0, y0, x1 - x0, y1 - y0))
}

fn to_pixel_edge(value: f64, limit: u32) -> u32 {
    // Values are clamped and finite by the time they get here.
    (value.round().max(0.0) as u32).min(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::RawBox;
    use crate::resolve::resolve;
    use image::{Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let buffer = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]));
        DynamicImage::ImageRgb8(buffer)
    }

    #[test]
    fn crop_extracts_the_half_open_region() {
        let image = gradient(64, 48);
        let raw = RawBox::Absolute {
            x_min: 10,
            y_min: 5,
            x_max: 30,
            y_max: 25,
        };
        let result = crop(&image, &resolve(&raw, 64, 48));

        assert!(!result.is_fallback());
        let cropped = result.image();
        assert_eq!(cropped.dimensions(), (20, 20));
        assert_eq!(cropped.to_rgb8().get_pixel(0, 0), &Rgb([10, 5, 0]));
        assert_eq!(cropped.to_rgb8().get_pixel(19, 19), &Rgb([29, 24, 0]));
    }

    #[test]
    fn crop_dimensions_follow_rounded_box_size() {
        let image = gradient(100, 100);
        let raw = RawBox::Normalized {
            x_center: 0.333,
            y_center: 0.5,
            width: 0.25,
            height: 0.4,
        };
        let resolved = resolve(&raw, 100, 100);
        let result = crop(&image, &resolved);

        let (w, h) = result.image().dimensions();
        let expected_w = (resolved.xmax() - resolved.xmin()).round() as i64;
        let expected_h = (resolved.ymax() - resolved.ymin()).round() as i64;
        assert!((w as i64 - expected_w).abs() <= 1);
        assert!((h as i64 - expected_h).abs() <= 1);
    }

    #[test]
    fn full_frame_box_matches_the_original() {
        let image = gradient(100, 200);
        let raw = RawBox::Normalized {
            x_center: 0.5,
            y_center: 0.5,
            width: 1.0,
            height: 1.0,
        };
        let result = crop(&image, &resolve(&raw, 100, 200));

        assert!(!result.is_fallback());
        assert_eq!(result.image().to_rgb8(), image.to_rgb8());
    }

    #[test]
    fn degenerate_box_returns_the_original_image() {
        let image = gradient(40, 40);
        let raw = RawBox::Absolute {
            x_min: 10,
            y_min: 10,
            x_max: 5,
            y_max: 50,
        };
        let result = crop(&image, &resolve(&raw, 40, 40));

        assert!(result.is_fallback());
        assert!(std::ptr::eq(result.image(), &image));
    }

    #[test]
    fn sub_pixel_box_falls_back_instead_of_producing_an_empty_image() {
        let image = gradient(100, 100);
        let raw = RawBox::Normalized {
            x_center: 0.501,
            y_center: 0.5,
            width: 0.002,
            height: 0.5,
        };
        let resolved = resolve(&raw, 100, 100);
        assert!(!resolved.is_degenerate());
        assert!(crop(&image, &resolved).is_fallback());
    }

    #[test]
    fn image_record_reports_dimensions() {
        let record = ImageRecord::from_image(gradient(7, 3));
        assert_eq!((record.width, record.height), (7, 3));
    }

    #[test]
    fn image_record_open_sniffs_format_from_contents() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let png_path = temp.path().join("real.png");
        gradient(12, 9).save(&png_path).expect("write png");
        let misnamed = temp.path().join("really_png.jpg");
        std::fs::rename(&png_path, &misnamed).expect("rename png");

        let record = ImageRecord::open(&misnamed).expect("decode by contents");
        assert_eq!((record.width, record.height), (12, 9));
    }

    #[test]
    fn image_record_open_reports_missing_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = ImageRecord::open(&temp.path().join("absent.png"))
            .err()
            .expect("open should fail");
        assert!(matches!(err, CropError::ImageDecode { .. }));
    }

    #[test]
    fn image_record_open_reports_undecodable_files() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("broken.png");
        std::fs::write(&path, b"not an image").expect("write file");

        let err = ImageRecord::open(&path).err().expect("decode should fail");
        assert!(matches!(err, CropError::ImageDecode { .. }));
    }
}
