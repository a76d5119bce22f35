/// Per-frame normalization failures.
///
/// None of these are fatal to a capture loop: the frame is dropped and no
/// sample is emitted.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("no hand detected on the source frame")]
    NoHandDetected,
    #[error("landmark set is empty")]
    EmptyLandmarks,
    #[error("landmark coordinates are not finite")]
    NonFiniteLandmark,
    #[error("degenerate hand bounding box ({width}x{height} px)")]
    DegenerateBox { width: u32, height: u32 },
    #[error("no hand detected on the normalization canvas")]
    HandLostOnCanvas,
    #[error("landmark {index} lies outside the normalization canvas")]
    LandmarksOutsideCanvas { index: usize },
}

impl NormalizeError {
    /// True for failures after a hand was found on the source frame.
    pub fn is_normalization_failure(&self) -> bool {
        !matches!(self, NormalizeError::NoHandDetected)
    }
}
