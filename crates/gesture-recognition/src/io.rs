//! JSON configuration and report files for the training pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use gesture_classifier::{ClassificationReport, Evaluation, TrainParams, TrainingHistory};
use gesture_dataset::{FeatureLayout, LabelSummary, SplitParams};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Inputs and outputs of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Dataset CSV to train on.
    pub dataset_path: String,
    /// Where to write the trained model.
    pub model_path: String,
    /// Where to write the fitted label codec.
    pub labels_path: String,
    #[serde(default)]
    pub report_path: Option<String>,
    #[serde(default)]
    pub split: SplitParams,
    #[serde(default)]
    pub train: TrainParams,
}

impl TrainConfig {
    pub fn new(
        dataset_path: impl Into<String>,
        model_path: impl Into<String>,
        labels_path: impl Into<String>,
    ) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            model_path: model_path.into(),
            labels_path: labels_path.into(),
            report_path: None,
            split: SplitParams::default(),
            train: TrainParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Report path, defaulting to `train_report.json` next to the model.
    pub fn report_path(&self) -> PathBuf {
        match &self.report_path {
            Some(p) => PathBuf::from(p),
            None => Path::new(&self.model_path)
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("train_report.json"),
        }
    }
}

/// Summary written after a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub layout: FeatureLayout,
    /// Class labels in index order.
    pub classes: Vec<String>,
    pub dataset: LabelSummary,
    pub train_samples: usize,
    pub test_samples: usize,
    pub history: TrainingHistory,
    pub test: Evaluation,
    pub metrics: ClassificationReport,
}

impl TrainReport {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
