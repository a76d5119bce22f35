use approx::assert_abs_diff_eq;
use gesture_core::markers::{render_hand, ColorMarkers};
use gesture_core::HAND_LANDMARK_COUNT;
use gesture_normalize::{BoundingBox, NormalizeError, Normalizer, NormalizerParams};
use image::Rgb;

fn normalizer() -> Normalizer<ColorMarkers> {
    Normalizer::new(ColorMarkers { calls: 0 }, NormalizerParams::default()).expect("params")
}

#[test]
fn landmarks_do_not_depend_on_hand_position() {
    let mut n = normalizer();
    let a = n
        .detect_and_normalize(&render_hand(640, 480, (40, 60), 1))
        .expect("hand at top-left");
    let b = n
        .detect_and_normalize(&render_hand(640, 480, (420, 300), 1))
        .expect("hand at bottom-right");

    assert_eq!(a.crop.width, b.crop.width);
    assert_eq!(a.crop.height, b.crop.height);
    assert_ne!(a.crop.x, b.crop.x);
    assert_eq!(a.landmarks.len(), HAND_LANDMARK_COUNT);
    for (pa, pb) in a.landmarks.iter().zip(b.landmarks.iter()) {
        assert_abs_diff_eq!(pa.x, pb.x, epsilon = 1e-6);
        assert_abs_diff_eq!(pa.y, pb.y, epsilon = 1e-6);
    }
    assert_eq!(n.detector_mut().calls, 4);
}

#[test]
fn normalized_landmarks_stay_on_canvas() {
    let mut n = normalizer();
    let params = n.params().clone();
    for base in [(5, 5), (200, 100), (500, 330)] {
        let out = n
            .detect_and_normalize(&render_hand(640, 480, base, 1))
            .expect("normalized");
        let bb = BoundingBox::of_landmarks(&out.landmarks, params.canvas_width, params.canvas_height)
            .expect("bbox");
        assert!(bb.min_x >= 0.0 && bb.min_y >= 0.0);
        assert!(bb.max_x <= params.canvas_width as f32);
        assert!(bb.max_y <= params.canvas_height as f32);
    }
}

#[test]
fn canvas_holds_the_crop_centered() {
    let mut n = normalizer();
    let frame = render_hand(640, 480, (100, 100), 1);
    let out = n.detect_and_normalize(&frame).expect("normalized");
    let p = out.placement;
    assert_eq!(p.offset_x, (400 - out.crop.width) / 2);
    assert_eq!(p.offset_y, (400 - out.crop.height) / 2);
    for dy in 0..p.height {
        for dx in 0..p.width {
            assert_eq!(
                out.canvas.get_pixel(p.offset_x + dx, p.offset_y + dy),
                frame.get_pixel(out.crop.x + dx, out.crop.y + dy)
            );
        }
    }
    assert_eq!(out.canvas.get_pixel(0, 0), &Rgb([0, 0, 0]));
}

#[test]
fn oversized_hand_is_truncated_and_loses_markers() {
    let mut n = normalizer();
    // Spread the markers over ~500 px so the crop exceeds the 400 px canvas.
    let frame = render_hand(1000, 1000, (100, 100), 4);
    let err = n.detect_and_normalize(&frame).expect_err("truncated");
    assert_eq!(err, NormalizeError::HandLostOnCanvas);
}
