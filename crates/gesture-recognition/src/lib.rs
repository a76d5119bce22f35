//! Hand-gesture recognition: capture, training and serving.
//!
//! This facade ties the workspace crates together:
//! - [`pipeline`]: interactive capture of normalized, labeled samples into a
//!   dataset file.
//! - [`training`]: dataset → label codec → classifier → evaluation, and the
//!   [`GestureRecognizer`] used at serving time.
//! - [`io`]: JSON training configuration and report files.
//!
//! ## Quickstart
//!
//! ```no_run
//! use gesture_recognition::{run_training, GestureRecognizer, TrainConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrainConfig::load_json("train.json")?;
//! let report = run_training(&config)?;
//! println!("test accuracy {:.3}", report.test.accuracy);
//!
//! let recognizer = GestureRecognizer::load(&config.model_path, &config.labels_path)?;
//! let features = vec![0.5f32; gesture_recognition::dataset::FEATURE_COUNT];
//! println!("{}", recognizer.recognize(&features)?.label);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `gesture_recognition::core`: landmark types and the detector trait.
//! - `gesture_recognition::normalize`: crop / center / re-detect normalizer.
//! - `gesture_recognition::dataset`: sample encoding and CSV datasets.
//! - `gesture_recognition::classifier`: label codec, classifier and metrics.

pub use gesture_classifier as classifier;
pub use gesture_core as core;
pub use gesture_dataset as dataset;
pub use gesture_normalize as normalize;

pub use gesture_classifier::{
    ClassificationReport, GestureClassifier, LabelCodec, TrainParams, TrainingHistory,
};
pub use gesture_core::{Frame, LandmarkDetector, LandmarkPoint, LandmarkSet};
pub use gesture_dataset::{Dataset, DatasetWriter, FeatureLayout, Sample, SplitParams};
pub use gesture_normalize::{NormalizeError, Normalizer, NormalizerParams};

pub mod io;
mod logging;
pub mod pipeline;
pub mod training;

pub use io::{TrainConfig, TrainReport};
#[cfg(feature = "tracing")]
pub use logging::init_tracing_logging;
pub use logging::init_logging;
pub use pipeline::{CaptureOutcome, CaptureSession, CaptureStats, ControlCommand};
pub use training::{
    run_training, train_from_dataset, GestureRecognizer, PipelineError, Recognition, TrainedModel,
};
