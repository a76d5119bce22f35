use gesture_core::LandmarkSet;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    /// Smallest axis-aligned box containing every point.
    ///
    /// The x and y extents are computed independently, so the corners of the
    /// box generally do not coincide with any input point. Returns `None` for
    /// an empty input or when any coordinate is not finite.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f32; 2]>,
    {
        let mut iter = points.into_iter();
        let [x0, y0] = iter.next()?;
        if !x0.is_finite() || !y0.is_finite() {
            return None;
        }
        let mut bb = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for [x, y] in iter {
            if !x.is_finite() || !y.is_finite() {
                return None;
            }
            bb.min_x = bb.min_x.min(x);
            bb.max_x = bb.max_x.max(x);
            bb.min_y = bb.min_y.min(y);
            bb.max_y = bb.max_y.max(y);
        }
        Some(bb)
    }

    /// Bounding box of normalized landmarks mapped onto a `width` × `height` image.
    pub fn of_landmarks(landmarks: &LandmarkSet, width: u32, height: u32) -> Option<Self> {
        Self::from_points(landmarks.iter().map(|p| p.to_pixels(width, height)))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Integer crop rectangle, clamped to an image of `width` × `height`.
    ///
    /// Both bounds are floored; the upper bound is exclusive.
    pub fn to_pixel_rect(&self, width: u32, height: u32) -> PixelRect {
        let x0 = floor_clamped(self.min_x, width);
        let x1 = floor_clamped(self.max_x, width);
        let y0 = floor_clamped(self.min_y, height);
        let y1 = floor_clamped(self.max_y, height);
        PixelRect {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }
}

fn floor_clamped(v: f32, max: u32) -> u32 {
    v.floor().clamp(0.0, max as f32) as u32
}

/// Integer pixel rectangle `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// True if the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
