//! Conversion of raw annotation boxes into clamped pixel boxes.
//!
//! Boxes are clamped to the image first and checked second. Annotations that
//! hang partly off the image still yield the visible part, while anything
//! that collapses to zero or negative area is flagged as degenerate for the
//! caller to handle.

use crate::annotation::{BBoxXYXY, Pixel, RawBox};

/// A raw box after conversion to pixels and clamping to the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedBox {
    /// The box in pixels before clamping.
    pub requested: BBoxXYXY<Pixel>,
    /// The box after clamping to `[0, width] x [0, height]`.
    pub clamped: BBoxXYXY<Pixel>,
}

impl ResolvedBox {
    /// Returns true if nothing croppable is left after clamping.
    ///
    /// Non-finite input (a `nan` or `inf` in the annotation) is always
    /// degenerate, since clamping cannot give it a meaningful position.
    pub fn is_degenerate(&self) -> bool {
        !self.requested.is_finite() || !self.clamped.has_area()
    }

    pub fn xmin(&self) -> f64 {
        self.clamped.xmin()
    }

    pub fn ymin(&self) -> f64 {
        self.clamped.ymin()
    }

    pub fn xmax(&self) -> f64 {
        self.clamped.xmax()
    }

    pub fn ymax(&self) -> f64 {
        self.clamped.ymax()
    }
}

/// Resolves `raw` against an image of the given size.
pub fn resolve(raw: &RawBox, image_width: u32, image_height: u32) -> ResolvedBox {
    let requested = raw.to_pixel(image_width, image_height);
    let clamped = requested.clamp_to_image(image_width as f64, image_height as f64);
    ResolvedBox { requested, clamped }
}
