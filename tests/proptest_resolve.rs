use bboxcrop::annotation::RawBox;
use bboxcrop::crop::crop;
use bboxcrop::resolve::resolve;
use image::{DynamicImage, RgbImage};
use proptest::prelude::*;

mod proptest_helpers;

fn blank(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn clamped_edges_never_leave_the_image(
        raw in proptest_helpers::arb_raw_box(),
        (width, height) in proptest_helpers::arb_image_size(),
    ) {
        let resolved = resolve(&raw, width, height);
        prop_assert!(resolved.xmin() >= 0.0);
        prop_assert!(resolved.ymin() >= 0.0);
        prop_assert!(resolved.xmax() <= width as f64);
        prop_assert!(resolved.ymax() <= height as f64);

        if !resolved.is_degenerate() {
            prop_assert!(resolved.xmin() < resolved.xmax());
            prop_assert!(resolved.ymin() < resolved.ymax());
        }
    }

    #[test]
    fn zero_sized_normalized_boxes_are_always_degenerate(
        x_center in -1.0f64..2.0,
        y_center in -1.0f64..2.0,
        extent in 0.0f64..1.0,
        zero_width in any::<bool>(),
        (width, height) in proptest_helpers::arb_image_size(),
    ) {
        let raw = if zero_width {
            RawBox::Normalized { x_center, y_center, width: 0.0, height: extent }
        } else {
            RawBox::Normalized { x_center, y_center, width: extent, height: 0.0 }
        };
        prop_assert!(resolve(&raw, width, height).is_degenerate());
    }

    #[test]
    fn degenerate_boxes_hand_back_the_original(
        raw in proptest_helpers::arb_raw_box(),
        (width, height) in proptest_helpers::arb_image_size(),
    ) {
        let image = blank(width, height);
        let resolved = resolve(&raw, width, height);
        let result = crop(&image, &resolved);

        if resolved.is_degenerate() {
            prop_assert!(result.is_fallback());
            prop_assert!(std::ptr::eq(result.image(), &image));
        }
    }

    #[test]
    fn inside_boxes_crop_to_their_rounded_size(
        raw in proptest_helpers::arb_inside_box(),
        width in 8u32..=256,
        height in 8u32..=256,
    ) {
        let image = blank(width, height);
        let resolved = resolve(&raw, width, height);
        prop_assert!(!resolved.is_degenerate());
        prop_assert_eq!(resolved.requested, resolved.clamped);

        let result = crop(&image, &resolved);
        let x_span = resolved.xmax().round() - resolved.xmin().round();
        let y_span = resolved.ymax().round() - resolved.ymin().round();

        if x_span < 1.0 || y_span < 1.0 {
            prop_assert!(result.is_fallback());
        } else {
            prop_assert!(!result.is_fallback());
            let cropped = result.image();
            let expected_w = (resolved.xmax() - resolved.xmin()).round();
            let expected_h = (resolved.ymax() - resolved.ymin()).round();
            prop_assert!((cropped.width() as f64 - expected_w).abs() <= 1.0);
            prop_assert!((cropped.height() as f64 - expected_h).abs() <= 1.0);
        }
    }
}
