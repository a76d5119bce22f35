//! Gesture classification over landmark feature vectors.
//!
//! - [`LabelCodec`] maps gesture labels to class indices and one-hot targets.
//! - [`GestureClassifier`] is a small dense network (hidden layers with a
//!   configurable activation, softmax output) trained with Adam.
//! - [`ClassificationReport`] scores predictions against ground truth.
//!
//! ```
//! use gesture_classifier::{ClassificationReport, LabelCodec};
//!
//! let codec = LabelCodec::fit(["pause", "play", "pause"]).unwrap();
//! let truth = codec.transform_all(["pause", "pause", "play", "play"]).unwrap();
//! let predicted = codec.transform_all(["pause", "pause", "pause", "play"]).unwrap();
//! let report = ClassificationReport::compute(&truth, &predicted, codec.num_classes()).unwrap();
//! assert_eq!(report.accuracy, 0.75);
//! ```

mod artifact;
mod classifier;
mod codec;
mod error;
mod metrics;
mod network;
mod optimizer;
mod params;

pub use artifact::{Architecture, FORMAT_VERSION};
pub use classifier::{EpochStats, Evaluation, GestureClassifier, TrainingHistory};
pub use codec::{to_onehot, LabelCodec};
pub use error::{ClassifierError, CodecError, MetricsError};
pub use metrics::{ClassMetrics, ClassificationReport};
pub use params::{Activation, TrainParams};

pub use nalgebra::{DMatrix, DVector};
