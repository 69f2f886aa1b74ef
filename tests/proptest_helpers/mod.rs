#![allow(dead_code)]

use bboxcrop::annotation::RawBox;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_image_size() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=256, 1u32..=256)
}

/// Normalized boxes, deliberately allowed to stray outside `[0, 1]`.
pub fn arb_normalized_box() -> impl Strategy<Value = RawBox> {
    (-0.5f64..1.5, -0.5f64..1.5, 0.0f64..1.5, 0.0f64..1.5).prop_map(
        |(x_center, y_center, width, height)| RawBox::Normalized {
            x_center,
            y_center,
            width,
            height,
        },
    )
}

/// Pixel boxes in any order, including inverted and off-image corners.
pub fn arb_absolute_box() -> impl Strategy<Value = RawBox> {
    (-300i64..600, -300i64..600, -300i64..600, -300i64..600).prop_map(
        |(x_min, y_min, x_max, y_max)| RawBox::Absolute {
            x_min,
            y_min,
            x_max,
            y_max,
        },
    )
}

pub fn arb_raw_box() -> BoxedStrategy<RawBox> {
    prop_oneof![arb_normalized_box(), arb_absolute_box()].boxed()
}

/// A normalized box whose pixel extent lies strictly inside the image.
pub fn arb_inside_box() -> impl Strategy<Value = RawBox> {
    (0.1f64..0.9, 0.1f64..0.9, 0.05f64..0.95, 0.05f64..0.95).prop_map(
        |(x_center, y_center, w_frac, h_frac)| {
            let max_w = 2.0 * x_center.min(1.0 - x_center);
            let max_h = 2.0 * y_center.min(1.0 - y_center);
            RawBox::Normalized {
                x_center,
                y_center,
                width: max_w * w_frac,
                height: max_h * h_frac,
            }
        },
    )
}
