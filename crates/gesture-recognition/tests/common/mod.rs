#![allow(dead_code)]

use std::path::Path;

use gesture_recognition::core::{Frame, LandmarkPoint, LandmarkSet, HAND_LANDMARK_COUNT};
use gesture_recognition::dataset::{DatasetWriter, FeatureLayout};

pub use gesture_core::markers::ColorMarkers;

/// A 640x480 frame with the marker hand drawn at `base`, scaled by `spread`.
pub fn render_hand(base: (u32, u32), spread: u32) -> Frame {
    gesture_core::markers::render_hand(640, 480, base, spread)
}

pub fn render_hand_sized(width: u32, height: u32, base: (u32, u32), spread: u32) -> Frame {
    gesture_core::markers::render_hand(width, height, base, spread)
}

/// Synthetic normalized hand for `label` ("open" or anything else), with a
/// small deterministic jitter derived from `seed`.
pub fn synthetic_hand(label: &str, seed: usize) -> LandmarkSet {
    (0..HAND_LANDMARK_COUNT)
        .map(|i| {
            let jitter = 0.02 * ((seed * 31 + i * 7) as f32 * 0.618).sin();
            let (col, row) = ((i % 5) as f32, (i / 5) as f32);
            if label == "open" {
                LandmarkPoint::new(0.2 + 0.15 * col + jitter, 0.1 + 0.2 * row - jitter, -0.05)
            } else {
                LandmarkPoint::new(0.45 + 0.03 * col - jitter, 0.4 + 0.04 * row + jitter, 0.05)
            }
        })
        .collect()
}

/// Write `per_label` synthetic samples for each of "fist" and "open".
pub fn write_synthetic_dataset(path: &Path, per_label: usize) {
    let mut writer = DatasetWriter::open(path, FeatureLayout::Planar).expect("open dataset");
    for i in 0..per_label {
        for label in ["fist", "open"] {
            writer
                .append_landmarks(&synthetic_hand(label, i), label)
                .expect("append");
        }
    }
}

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
