use std::io;

/// Label codec errors.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("unknown gesture label {0:?}")]
    UnknownLabel(String),
    #[error("class index {index} is out of range for {classes} classes")]
    UnknownIndex { index: usize, classes: usize },
    #[error("cannot fit a label codec on an empty label set")]
    EmptyLabelSet,
    #[error("invalid class list: {0}")]
    InvalidClasses(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Classifier construction, training, inference and persistence errors.
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    #[error("{what} dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("input matrix has no rows")]
    EmptyInput,
    #[error("input value at row {row}, column {col} is not finite")]
    NonFiniteInput { row: usize, col: usize },
    #[error("invalid training parameters: {0}")]
    InvalidParams(String),
    #[error("unsupported model format version {found} (expected {supported})")]
    UnsupportedFormat { found: u32, supported: u32 },
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Evaluation report errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("cannot evaluate an empty prediction set")]
    EmptyInput,
    #[error("got {truth} true labels but {predicted} predictions")]
    LengthMismatch { truth: usize, predicted: usize },
    #[error("class index {index} is out of range for {classes} classes")]
    ClassOutOfRange { index: usize, classes: usize },
}
