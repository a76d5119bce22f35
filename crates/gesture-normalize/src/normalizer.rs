use gesture_core::{Frame, LandmarkDetector, LandmarkSet};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::canvas::compose_centered;
use crate::{
    BoundingBox, NormalizeError, NormalizerParams, NormalizerParamsError, PixelRect, Placement,
};

/// Output of a successful normalization.
#[derive(Clone, Debug)]
pub struct NormalizedHand {
    /// Landmarks detected on the canvas, normalized to the canvas size.
    pub landmarks: LandmarkSet,
    /// First-pass bounding box in source-frame pixels.
    pub bounding_box: BoundingBox,
    /// Integer crop taken from the source frame.
    pub crop: PixelRect,
    /// Where the crop was pasted on the canvas.
    pub placement: Placement,
    /// The composited canvas the second detection pass ran on.
    pub canvas: Frame,
}

/// Crop / center / re-detect normalizer.
pub struct Normalizer<D> {
    detector: D,
    params: NormalizerParams,
}

impl<D: LandmarkDetector> Normalizer<D> {
    /// Create a normalizer around a detection backend.
    pub fn new(detector: D, params: NormalizerParams) -> Result<Self, NormalizerParamsError> {
        params.validate()?;
        Ok(Self { detector, params })
    }

    #[inline]
    pub fn params(&self) -> &NormalizerParams {
        &self.params
    }

    #[inline]
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn into_detector(self) -> D {
        self.detector
    }

    /// Run the first detection pass on `frame` and normalize the first hand.
    ///
    /// Additional hands are ignored. If the first pass finds nothing, this
    /// returns [`NormalizeError::NoHandDetected`] without building a canvas.
    pub fn detect_and_normalize(&mut self, frame: &Frame) -> Result<NormalizedHand, NormalizeError> {
        let mut hands = self.detector.detect(frame).into_iter();
        let first = hands.next().ok_or(NormalizeError::NoHandDetected)?;
        let ignored = hands.count();
        if ignored > 0 {
            log::debug!("ignoring {ignored} additional hand(s) in frame");
        }
        self.normalize(frame, &first)
    }

    /// Normalize `landmarks`, which were detected on `frame`.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, frame, landmarks),
            fields(width = frame.width(), height = frame.height(), points = landmarks.len())
        )
    )]
    pub fn normalize(
        &mut self,
        frame: &Frame,
        landmarks: &LandmarkSet,
    ) -> Result<NormalizedHand, NormalizeError> {
        if landmarks.is_empty() {
            return Err(NormalizeError::EmptyLandmarks);
        }

        let bounding_box = BoundingBox::of_landmarks(landmarks, frame.width(), frame.height())
            .ok_or(NormalizeError::NonFiniteLandmark)?;
        let crop = bounding_box.to_pixel_rect(frame.width(), frame.height());
        if crop.is_empty() {
            return Err(NormalizeError::DegenerateBox {
                width: crop.width,
                height: crop.height,
            });
        }

        let (canvas, placement) = compose_centered(frame, crop, &self.params);
        log::trace!(
            "crop {}x{} at ({}, {}) -> canvas offset ({}, {})",
            crop.width,
            crop.height,
            crop.x,
            crop.y,
            placement.offset_x,
            placement.offset_y
        );

        let landmarks = self
            .detector
            .detect(&canvas)
            .into_iter()
            .next()
            .ok_or(NormalizeError::HandLostOnCanvas)?;

        if let Some(index) = landmarks.iter().position(|p| !within_unit_square(p.x, p.y)) {
            return Err(NormalizeError::LandmarksOutsideCanvas { index });
        }

        Ok(NormalizedHand {
            landmarks,
            bounding_box,
            crop,
            placement,
            canvas,
        })
    }
}

fn within_unit_square(x: f32, y: f32) -> bool {
    (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)
}
