//! Synthetic marker hands for tests (feature `test-support`).
//!
//! A "hand" is drawn as 21 uniquely colored 3x3 squares. [`ColorMarkers`]
//! finds them again by color centroid, so a frame can go through a real
//! detect / crop / re-detect cycle without a learned model.

use image::Rgb;

use crate::{Frame, LandmarkDetector, LandmarkPoint, LandmarkSet, HAND_LANDMARK_COUNT};

/// Green channel shared by every marker color.
const MARKER_GREEN: u8 = 200;

/// Detector for hands drawn by [`render_hand`].
///
/// Reports one hand when all 21 markers are at least partially visible, and
/// nothing otherwise. `calls` counts invocations.
#[derive(Debug, Default)]
pub struct ColorMarkers {
    pub calls: usize,
}

/// Color of marker `i`.
pub fn marker_color(i: usize) -> Rgb<u8> {
    Rgb([10 + 11 * i as u8, MARKER_GREEN, 250 - 9 * i as u8])
}

impl LandmarkDetector for ColorMarkers {
    fn detect(&mut self, image: &Frame) -> Vec<LandmarkSet> {
        self.calls += 1;
        let mut sums = [(0.0f64, 0.0f64, 0usize); HAND_LANDMARK_COUNT];
        for (x, y, px) in image.enumerate_pixels() {
            if px.0[1] != MARKER_GREEN {
                continue;
            }
            if let Some(i) = (0..HAND_LANDMARK_COUNT).find(|&i| marker_color(i) == *px) {
                sums[i].0 += x as f64;
                sums[i].1 += y as f64;
                sums[i].2 += 1;
            }
        }
        if sums.iter().any(|s| s.2 == 0) {
            return Vec::new();
        }
        let (w, h) = (image.width() as f64, image.height() as f64);
        let set = sums
            .iter()
            .map(|&(sx, sy, n)| {
                let n = n as f64;
                LandmarkPoint::new(((sx / n + 0.5) / w) as f32, ((sy / n + 0.5) / h) as f32, 0.0)
            })
            .collect();
        vec![set]
    }
}

fn joint_offset(i: usize) -> (u32, u32) {
    let (col, row) = ((i % 5) as u32, (i / 5) as u32);
    (10 + col * 25 + row * 3, 10 + row * 30 + col * 2)
}

/// Draw the marker hand on a black `width` x `height` frame.
///
/// `base` is the top-left anchor; `spread` scales the joint offsets. The
/// markers span about `(120 * spread) x (130 * spread)` pixels and must fit
/// inside the frame.
pub fn render_hand(width: u32, height: u32, base: (u32, u32), spread: u32) -> Frame {
    let mut img = Frame::new(width, height);
    for i in 0..HAND_LANDMARK_COUNT {
        let (ox, oy) = joint_offset(i);
        let (cx, cy) = (base.0 + ox * spread, base.1 + oy * spread);
        for dy in 0..3 {
            for dx in 0..3 {
                img.put_pixel(cx + dx - 1, cy + dy - 1, marker_color(i));
            }
        }
    }
    img
}
