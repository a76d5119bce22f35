//! Landmark value types.

use serde::{Deserialize, Serialize};

/// Number of landmarks a hand detector reports per hand.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// One detected keypoint.
///
/// `x` and `y` are normalized to the width and height of the image the
/// detector ran on, so they are nominally in `[0, 1]` (detectors may report
/// values slightly outside near the image border). `z` is a relative depth
/// without a fixed unit.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LandmarkPoint {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position in absolute pixels for an image of `width` × `height`.
    #[inline]
    pub fn to_pixels(&self, width: u32, height: u32) -> [f32; 2] {
        [self.x * width as f32, self.y * height as f32]
    }
}

/// Ordered landmarks of one detected hand.
///
/// Index order is assigned by the detector and is anatomically fixed: the same
/// index always refers to the same joint (see [`HandLandmark`]). The set is
/// never reordered. A set coming straight from a detector is not guaranteed to
/// hold exactly [`HAND_LANDMARK_COUNT`] points; consumers that need a complete
/// hand check [`LandmarkSet::is_complete`].
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkSet {
    points: Vec<LandmarkPoint>,
}

impl LandmarkSet {
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if the set holds exactly [`HAND_LANDMARK_COUNT`] points.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.points.len() == HAND_LANDMARK_COUNT
    }

    #[inline]
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &LandmarkPoint> + '_ {
        self.points.iter()
    }

    /// Landmark for a named joint, if the set is long enough to contain it.
    pub fn joint(&self, joint: HandLandmark) -> Option<&LandmarkPoint> {
        self.points.get(joint as usize)
    }

    pub fn into_points(self) -> Vec<LandmarkPoint> {
        self.points
    }
}

impl From<Vec<LandmarkPoint>> for LandmarkSet {
    fn from(points: Vec<LandmarkPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<LandmarkPoint> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = LandmarkPoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Names for the hand landmarks, in detector index order.
///
/// # Terminology
///
/// - **CMC**: carpometacarpal joint, the lowest joint of the thumb.
/// - **MCP**: metacarpophalangeal joint, the knuckles near the palm.
/// - **PIP**: proximal interphalangeal joint, between MCP and DIP.
/// - **DIP**: distal interphalangeal joint, the highest finger joint.
/// - **Tip**: the tip of the finger, above the DIP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// All joints in index order.
    pub const ALL: [HandLandmark; HAND_LANDMARK_COUNT] = {
        use HandLandmark::*;
        [
            Wrist,
            ThumbCmc,
            ThumbMcp,
            ThumbIp,
            ThumbTip,
            IndexFingerMcp,
            IndexFingerPip,
            IndexFingerDip,
            IndexFingerTip,
            MiddleFingerMcp,
            MiddleFingerPip,
            MiddleFingerDip,
            MiddleFingerTip,
            RingFingerMcp,
            RingFingerPip,
            RingFingerDip,
            RingFingerTip,
            PinkyMcp,
            PinkyPip,
            PinkyDip,
            PinkyTip,
        ]
    };

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}
