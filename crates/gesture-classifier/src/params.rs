use serde::{Deserialize, Serialize};

use crate::ClassifierError;

/// Hidden-layer nonlinearity. The output layer is always softmax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Tanh,
    Relu,
}

impl Activation {
    #[inline]
    pub(crate) fn apply(self, z: f32) -> f32 {
        match self {
            Activation::Tanh => z.tanh(),
            Activation::Relu => z.max(0.0),
        }
    }

    /// Derivative expressed through the activation output `a = f(z)`.
    #[inline]
    pub(crate) fn derivative(self, a: f32) -> f32 {
        match self {
            Activation::Tanh => 1.0 - a * a,
            Activation::Relu => {
                if a > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Architecture and optimizer settings for [`GestureClassifier`].
///
/// [`GestureClassifier`]: crate::GestureClassifier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainParams {
    /// Width of each hidden layer, input side first.
    pub hidden_layers: Vec<usize>,
    pub activation: Activation,
    pub epochs: usize,
    pub batch_size: usize,
    /// Adam step size.
    pub learning_rate: f32,
    /// Trailing fraction of the training rows held out for monitoring.
    pub validation_fraction: f32,
    /// Seed for weight initialization and batch shuffling.
    pub seed: u64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            hidden_layers: vec![64, 64],
            activation: Activation::Tanh,
            epochs: 10,
            batch_size: 32,
            learning_rate: 0.001,
            validation_fraction: 0.1,
            seed: 42,
        }
    }
}

impl TrainParams {
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let invalid = |msg: String| Err(ClassifierError::InvalidParams(msg));
        if self.hidden_layers.is_empty() {
            return invalid("at least one hidden layer is required".into());
        }
        if let Some(i) = self.hidden_layers.iter().position(|&w| w == 0) {
            return invalid(format!("hidden layer {i} has zero width"));
        }
        if self.epochs == 0 {
            return invalid("epochs must be positive".into());
        }
        if self.batch_size == 0 {
            return invalid("batch_size must be positive".into());
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return invalid(format!("learning_rate {} must be > 0", self.learning_rate));
        }
        if !(0.0..1.0).contains(&self.validation_fraction) {
            return invalid(format!(
                "validation_fraction {} must be in [0, 1)",
                self.validation_fraction
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = TrainParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.hidden_layers, [64, 64]);
        assert_eq!(p.activation, Activation::Tanh);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: TrainParams =
            serde_json::from_str(r#"{ "epochs": 3, "activation": "relu" }"#).expect("parse");
        assert_eq!(p.epochs, 3);
        assert_eq!(p.activation, Activation::Relu);
        assert_eq!(p.batch_size, 32);
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            TrainParams {
                hidden_layers: vec![],
                ..TrainParams::default()
            },
            TrainParams {
                hidden_layers: vec![8, 0],
                ..TrainParams::default()
            },
            TrainParams {
                batch_size: 0,
                ..TrainParams::default()
            },
            TrainParams {
                learning_rate: f32::NAN,
                ..TrainParams::default()
            },
            TrainParams {
                validation_fraction: 1.0,
                ..TrainParams::default()
            },
        ];
        for p in cases {
            assert!(
                matches!(p.validate(), Err(ClassifierError::InvalidParams(_))),
                "{p:?}"
            );
        }
    }

    #[test]
    fn tanh_derivative_from_output() {
        let a = Activation::Tanh.apply(0.3);
        let numeric = (Activation::Tanh.apply(0.3 + 1e-3) - Activation::Tanh.apply(0.3 - 1e-3)) / 2e-3;
        assert!((Activation::Tanh.derivative(a) - numeric).abs() < 1e-3);
        assert_eq!(Activation::Relu.derivative(Activation::Relu.apply(-2.0)), 0.0);
    }
}
