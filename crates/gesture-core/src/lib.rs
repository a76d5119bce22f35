//! Core types for hand-gesture recognition.
//!
//! This crate is intentionally small. It defines the landmark value types
//! shared by every stage of the pipeline and the [`LandmarkDetector`]
//! capability that concrete detection backends implement. It does *not*
//! depend on any particular detection model.

mod detector;
mod landmark;
mod logger;
#[cfg(feature = "test-support")]
pub mod markers;

pub use detector::{from_fn, FnDetector, LandmarkDetector};
pub use landmark::{HandLandmark, LandmarkPoint, LandmarkSet, HAND_LANDMARK_COUNT};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

/// RGB frame type consumed by detectors and the normalizer.
pub type Frame = image::RgbImage;
