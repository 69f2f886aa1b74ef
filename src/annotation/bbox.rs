//! Axis-aligned boxes in XYXY form, parameterized by coordinate space.

use std::fmt;

use super::coord::{Coord, Normalized, Pixel};

/// A bounding box as (xmin, ymin, xmax, ymax).
///
/// The constructor does not require `min < max`. Inverted or out-of-range
/// boxes straight from an annotation file are representable so that the
/// resolver can clamp them and decide whether anything croppable is left.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    /// Builds a box from its center point and size.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::from_xyxy(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Width of the box; negative when `xmax < xmin`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the box; negative when `ymax < ymin`.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the box encloses a positive area on both axes.
    #[inline]
    pub fn has_area(&self) -> bool {
        self.min.x < self.max.x && self.min.y < self.max.y
    }

    /// Returns the four coordinates as `[xmin, ymin, xmax, ymax]`.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }
}

impl BBoxXYXY<Normalized> {
    /// Scales fractional coordinates up to pixels.
    pub fn to_pixel(&self, image_width: f64, image_height: f64) -> BBoxXYXY<Pixel> {
        BBoxXYXY::from_xyxy(
            self.min.x * image_width,
            self.min.y * image_height,
            self.max.x * image_width,
            self.max.y * image_height,
        )
    }
}

impl BBoxXYXY<Pixel> {
    /// Clamps each edge independently to `[0, image_width] x [0, image_height]`.
    ///
    /// Only the lower edges are raised and only the upper edges are lowered,
    /// so a box lying fully outside the image collapses onto the border
    /// instead of being flipped back inside.
    pub fn clamp_to_image(&self, image_width: f64, image_height: f64) -> Self {
        Self::from_xyxy(
            self.min.x.max(0.0),
            self.min.y.max(0.0),
            self.max.x.min(image_width),
            self.max.y.min(image_height),
        )
    }
}

impl<TSpace> fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl<TSpace> fmt::Display for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
