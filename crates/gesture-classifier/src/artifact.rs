//! On-disk model format.
//!
//! A model is a single JSON document holding the architecture and every
//! layer's parameters. Weight matrices are stored row-major as
//! `inputs × outputs`.

use std::fs;
use std::path::Path;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::network::{Dense, Network};
use crate::{Activation, ClassifierError, TrainParams};

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Layer widths and activation of a saved model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    pub input: usize,
    pub hidden: Vec<usize>,
    pub output: usize,
    pub activation: Activation,
}

impl Architecture {
    fn widths(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.hidden.len() + 2);
        widths.push(self.input);
        widths.extend_from_slice(&self.hidden);
        widths.push(self.output);
        widths
    }
}

#[derive(Serialize, Deserialize)]
struct LayerRecord {
    rows: usize,
    cols: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
pub(crate) struct ModelArtifact {
    format_version: u32,
    architecture: Architecture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<TrainParams>,
    layers: Vec<LayerRecord>,
}

impl ModelArtifact {
    pub fn from_network(network: &Network, params: &TrainParams) -> Self {
        let hidden = network.layers[..network.layers.len().saturating_sub(1)]
            .iter()
            .map(Dense::outputs)
            .collect();
        Self {
            format_version: FORMAT_VERSION,
            architecture: Architecture {
                input: network.input_dim(),
                hidden,
                output: network.output_dim(),
                activation: network.activation,
            },
            params: Some(params.clone()),
            layers: network
                .layers
                .iter()
                .map(|l| LayerRecord {
                    rows: l.inputs(),
                    cols: l.outputs(),
                    weights: l.weights.transpose().as_slice().to_vec(),
                    bias: l.bias.as_slice().to_vec(),
                })
                .collect(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), ClassifierError> {
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, ClassifierError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Check the artifact and the caller's expectations, then rebuild the
    /// network.
    pub fn into_network(
        self,
        expected_input: usize,
        expected_output: usize,
    ) -> Result<(Network, TrainParams), ClassifierError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ClassifierError::UnsupportedFormat {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }
        let arch = &self.architecture;
        if arch.input != expected_input {
            return Err(ClassifierError::DimensionMismatch {
                what: "model input",
                expected: expected_input,
                got: arch.input,
            });
        }
        if arch.output != expected_output {
            return Err(ClassifierError::DimensionMismatch {
                what: "model output",
                expected: expected_output,
                got: arch.output,
            });
        }

        let params = self.checked_params()?;
        let widths = arch.widths();
        if self.layers.len() != widths.len() - 1 {
            return Err(ClassifierError::InvalidArtifact(format!(
                "architecture has {} layers but {} were stored",
                widths.len() - 1,
                self.layers.len()
            )));
        }
        let mut layers = Vec::with_capacity(self.layers.len());
        for (i, (record, w)) in self.layers.into_iter().zip(widths.windows(2)).enumerate() {
            let (rows, cols) = (w[0], w[1]);
            if record.rows != rows || record.cols != cols {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "layer {i} is {}x{}, expected {rows}x{cols}",
                    record.rows, record.cols
                )));
            }
            if record.weights.len() != rows * cols || record.bias.len() != cols {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "layer {i} holds {} weights and {} biases, expected {} and {cols}",
                    record.weights.len(),
                    record.bias.len(),
                    rows * cols
                )));
            }
            if record
                .weights
                .iter()
                .chain(&record.bias)
                .any(|v| !v.is_finite())
            {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "layer {i} has non-finite parameters"
                )));
            }
            layers.push(Dense {
                weights: DMatrix::from_row_slice(rows, cols, &record.weights),
                bias: DVector::from_vec(record.bias),
            });
        }

        Ok((
            Network {
                layers,
                activation: arch.activation,
            },
            params,
        ))
    }

    /// Stored training settings, or defaults shaped like the architecture
    /// when the file carries none.
    fn checked_params(&self) -> Result<TrainParams, ClassifierError> {
        let arch = &self.architecture;
        let Some(params) = self.params.clone() else {
            return Ok(TrainParams {
                hidden_layers: arch.hidden.clone(),
                activation: arch.activation,
                ..TrainParams::default()
            });
        };
        params
            .validate()
            .map_err(|e| ClassifierError::InvalidArtifact(format!("stored params: {e}")))?;
        if params.hidden_layers != arch.hidden || params.activation != arch.activation {
            return Err(ClassifierError::InvalidArtifact(format!(
                "stored params describe hidden layers {:?} ({:?}) but the architecture is {:?} ({:?})",
                params.hidden_layers, params.activation, arch.hidden, arch.activation
            )));
        }
        Ok(params)
    }
}
