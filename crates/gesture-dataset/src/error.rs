use std::io;

/// Problems turning landmarks into a sample.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("malformed sample: expected {expected} values, got {got}")]
    MalformedSample { expected: usize, got: usize },
    #[error("feature {index} is not finite")]
    NonFiniteFeature { index: usize },
    #[error("gesture label is empty")]
    EmptyLabel,
    #[error("gesture label {0:?} contains a line break or surrounding whitespace")]
    InvalidLabel(String),
}

/// Errors from reading, writing or splitting a dataset.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error("dataset header does not match a known layout: {found}")]
    SchemaMismatch { found: String },
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("dataset is empty")]
    Empty,
    #[error("cannot split {samples} samples with test fraction {test_fraction}")]
    InvalidSplit { samples: usize, test_fraction: f32 },
}
