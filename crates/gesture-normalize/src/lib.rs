//! Position- and scale-invariant hand landmarks.
//!
//! Raw landmark coordinates depend on where the hand sits in the camera frame.
//! [`Normalizer`] removes that dependency:
//!
//! 1. convert the first-pass landmarks to pixels and take their axis-aligned
//!    bounding box (min/max over x and over y independently),
//! 2. crop the frame to that box (integer bounds, clamped to the frame),
//! 3. paste the crop centered onto a fixed-size background canvas, truncating
//!    it if it is larger than the canvas (never rescaling),
//! 4. run the detector again on the canvas and return *those* landmarks.
//!
//! ## Quickstart
//!
//! ```
//! use gesture_core::{from_fn, Frame, LandmarkSet};
//! use gesture_normalize::{NormalizeError, Normalizer, NormalizerParams};
//!
//! let detector = from_fn(|_: &Frame| Vec::<LandmarkSet>::new());
//! let mut normalizer = Normalizer::new(detector, NormalizerParams::default()).unwrap();
//!
//! let frame = Frame::new(640, 480);
//! let err = normalizer.detect_and_normalize(&frame).unwrap_err();
//! assert_eq!(err, NormalizeError::NoHandDetected);
//! ```

mod bbox;
mod canvas;
mod error;
mod normalizer;
mod params;

pub use bbox::{BoundingBox, PixelRect};
pub use canvas::{centered_placement, compose_centered, Placement};
pub use error::NormalizeError;
pub use normalizer::{NormalizedHand, Normalizer};
pub use params::{NormalizerParams, NormalizerParamsError};
