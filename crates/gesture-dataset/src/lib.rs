//! Gesture sample encoding and on-disk datasets.
//!
//! A sample is the flattened `x`, `y`, `z` coordinates of one normalized
//! hand plus a text label. Samples are appended to a CSV file whose header
//! names every column; the header also records the feature ordering
//! ([`FeatureLayout`]) so a reader never guesses how a row was written.
//!
//! ```
//! use gesture_core::{LandmarkPoint, LandmarkSet, HAND_LANDMARK_COUNT};
//! use gesture_dataset::{encode, FeatureLayout, FEATURE_COUNT};
//!
//! let hand: LandmarkSet = (0..HAND_LANDMARK_COUNT)
//!     .map(|i| LandmarkPoint::new(i as f32 / 20.0, 0.5, 0.0))
//!     .collect();
//! let sample = encode(&hand, "nextsong", FeatureLayout::Planar).unwrap();
//! assert_eq!(sample.features.len(), FEATURE_COUNT);
//! assert_eq!(sample.features[1], 0.05);
//! ```

mod error;
mod layout;
mod reader;
mod sample;
mod split;
mod writer;

pub use error::{DatasetError, SampleError};
pub use layout::{Axis, FeatureLayout, FEATURE_COUNT, LABEL_COLUMN};
pub use reader::{Dataset, LabelSummary};
pub use sample::{encode, validate_label, Sample};
pub use split::{train_test_split, Split, SplitParams};
pub use writer::DatasetWriter;
