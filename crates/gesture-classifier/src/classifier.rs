use std::path::Path;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::artifact::ModelArtifact;
use crate::network::{argmax_rows, correct_count, cross_entropy, Network};
use crate::optimizer::Adam;
use crate::{ClassifierError, TrainParams};

/// Loss and accuracy of one training epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub loss: f32,
    pub accuracy: f32,
    pub val_loss: Option<f32>,
    pub val_accuracy: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochStats>,
}

impl TrainingHistory {
    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }
}

/// Loss and accuracy on a labeled set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub loss: f32,
    pub accuracy: f32,
}

/// Feed-forward gesture classifier.
///
/// Maps `n × input_dim` feature matrices to `n × output_dim` class
/// probabilities. Hidden layers use [`TrainParams::activation`]; the output
/// layer is softmax. Training minimizes categorical cross-entropy with Adam
/// over shuffled mini-batches for a fixed number of epochs.
///
/// Inference never mutates the model.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    network: Network,
    params: TrainParams,
}

impl GestureClassifier {
    /// Build an untrained classifier with seeded Glorot-uniform weights.
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        params: TrainParams,
    ) -> Result<Self, ClassifierError> {
        params.validate()?;
        if input_dim == 0 || output_dim == 0 {
            return Err(ClassifierError::InvalidParams(format!(
                "input and output dimensions must be positive (got {input_dim} and {output_dim})"
            )));
        }
        let mut widths = Vec::with_capacity(params.hidden_layers.len() + 2);
        widths.push(input_dim);
        widths.extend_from_slice(&params.hidden_layers);
        widths.push(output_dim);

        let mut rng = fastrand::Rng::with_seed(params.seed);
        let network = Network::new(&widths, params.activation, &mut rng);
        Ok(Self { network, params })
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.network.input_dim()
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        self.network.output_dim()
    }

    #[inline]
    pub fn params(&self) -> &TrainParams {
        &self.params
    }

    /// Train on `x` with one-hot targets `y`.
    pub fn train(
        &mut self,
        x: &DMatrix<f32>,
        y: &DMatrix<f32>,
    ) -> Result<TrainingHistory, ClassifierError> {
        self.train_with_progress(x, y, |_| {})
    }

    /// Like [`GestureClassifier::train`], calling `progress` after each epoch.
    ///
    /// The trailing `validation_fraction` of the rows is held out (before any
    /// shuffling) and only used to report validation loss and accuracy.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(rows = x.nrows(), epochs = self.params.epochs))
    )]
    pub fn train_with_progress<F>(
        &mut self,
        x: &DMatrix<f32>,
        y: &DMatrix<f32>,
        mut progress: F,
    ) -> Result<TrainingHistory, ClassifierError>
    where
        F: FnMut(&EpochStats),
    {
        self.check_batch(x, y)?;
        let n = x.nrows();
        let n_train = (n as f32 * (1.0 - self.params.validation_fraction)) as usize;
        if n_train == 0 {
            return Err(ClassifierError::InvalidParams(format!(
                "validation_fraction {} leaves no training rows out of {n}",
                self.params.validation_fraction
            )));
        }
        let validation = (n_train < n).then(|| {
            (
                x.rows(n_train, n - n_train).into_owned(),
                y.rows(n_train, n - n_train).into_owned(),
            )
        });
        log::info!(
            "training on {n_train} samples, validating on {}",
            n - n_train
        );

        let mut rng = fastrand::Rng::with_seed(self.params.seed.wrapping_add(1));
        let mut adam = Adam::new(self.params.learning_rate, &self.network.layers);
        let mut order: Vec<usize> = (0..n_train).collect();
        let mut history = TrainingHistory::default();

        for epoch in 1..=self.params.epochs {
            rng.shuffle(&mut order);
            let mut loss_sum = 0.0f32;
            let mut correct = 0usize;
            for batch in order.chunks(self.params.batch_size) {
                let xb = x.select_rows(batch);
                let yb = y.select_rows(batch);
                let outputs = self.network.forward_all(&xb);
                if let Some(probs) = outputs.last() {
                    loss_sum += cross_entropy(probs, &yb) * batch.len() as f32;
                    correct += correct_count(probs, &yb);
                }
                let grads = self.network.backward(&xb, &yb, &outputs);
                adam.step(&mut self.network.layers, &grads);
            }

            let val = validation
                .as_ref()
                .map(|(vx, vy)| self.evaluate_unchecked(vx, vy));
            let stats = EpochStats {
                epoch,
                loss: loss_sum / n_train as f32,
                accuracy: correct as f32 / n_train as f32,
                val_loss: val.map(|v| v.loss),
                val_accuracy: val.map(|v| v.accuracy),
            };
            match (stats.val_loss, stats.val_accuracy) {
                (Some(vl), Some(va)) => log::info!(
                    "epoch {epoch}/{}: loss {:.4} accuracy {:.4} val_loss {vl:.4} val_accuracy {va:.4}",
                    self.params.epochs,
                    stats.loss,
                    stats.accuracy
                ),
                _ => log::info!(
                    "epoch {epoch}/{}: loss {:.4} accuracy {:.4}",
                    self.params.epochs,
                    stats.loss,
                    stats.accuracy
                ),
            }
            progress(&stats);
            history.epochs.push(stats);
        }
        Ok(history)
    }

    /// Loss and accuracy on `x` / one-hot `y`. Forward pass only.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all, fields(rows = x.nrows())))]
    pub fn evaluate(
        &self,
        x: &DMatrix<f32>,
        y: &DMatrix<f32>,
    ) -> Result<Evaluation, ClassifierError> {
        self.check_batch(x, y)?;
        Ok(self.evaluate_unchecked(x, y))
    }

    fn evaluate_unchecked(&self, x: &DMatrix<f32>, y: &DMatrix<f32>) -> Evaluation {
        let probs = self.network.forward(x);
        Evaluation {
            loss: cross_entropy(&probs, y),
            accuracy: correct_count(&probs, y) as f32 / x.nrows().max(1) as f32,
        }
    }

    /// Class probabilities, one row per input row.
    pub fn predict(&self, x: &DMatrix<f32>) -> Result<DMatrix<f32>, ClassifierError> {
        self.check_features(x)?;
        Ok(self.network.forward(x))
    }

    /// Most probable class index per input row.
    pub fn predict_classes(&self, x: &DMatrix<f32>) -> Result<Vec<usize>, ClassifierError> {
        Ok(argmax_rows(&self.predict(x)?))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ClassifierError> {
        let path = path.as_ref();
        ModelArtifact::from_network(&self.network, &self.params).write(path)?;
        log::info!("saved model to {}", path.display());
        Ok(())
    }

    /// Load a saved model, requiring it to map `expected_input` features to
    /// `expected_output` classes.
    pub fn load(
        path: impl AsRef<Path>,
        expected_input: usize,
        expected_output: usize,
    ) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let (network, params) =
            ModelArtifact::read(path)?.into_network(expected_input, expected_output)?;
        log::debug!(
            "loaded {}-layer model from {}",
            network.layers.len(),
            path.display()
        );
        Ok(Self { network, params })
    }

    fn check_features(&self, x: &DMatrix<f32>) -> Result<(), ClassifierError> {
        if x.nrows() == 0 {
            return Err(ClassifierError::EmptyInput);
        }
        if x.ncols() != self.input_dim() {
            return Err(ClassifierError::DimensionMismatch {
                what: "feature",
                expected: self.input_dim(),
                got: x.ncols(),
            });
        }
        if let Some(idx) = x.iter().position(|v| !v.is_finite()) {
            // Column-major storage.
            return Err(ClassifierError::NonFiniteInput {
                row: idx % x.nrows(),
                col: idx / x.nrows(),
            });
        }
        Ok(())
    }

    fn check_batch(&self, x: &DMatrix<f32>, y: &DMatrix<f32>) -> Result<(), ClassifierError> {
        self.check_features(x)?;
        if y.ncols() != self.output_dim() {
            return Err(ClassifierError::DimensionMismatch {
                what: "target",
                expected: self.output_dim(),
                got: y.ncols(),
            });
        }
        if y.nrows() != x.nrows() {
            return Err(ClassifierError::DimensionMismatch {
                what: "target row",
                expected: x.nrows(),
                got: y.nrows(),
            });
        }
        Ok(())
    }
}
