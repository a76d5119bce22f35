//! Dense feed-forward network over row-major batches.
//!
//! A batch is an `n × d` matrix with one sample per row. Each layer stores its
//! weights as `inputs × outputs`, so a forward step is `Z = A·W + b`.

use nalgebra::{DMatrix, DVector};

use crate::Activation;

/// Lower bound applied to probabilities inside the log of the loss.
pub(crate) const PROB_EPSILON: f32 = 1e-7;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Dense {
    pub weights: DMatrix<f32>,
    pub bias: DVector<f32>,
}

impl Dense {
    /// Glorot-uniform weights, zero bias.
    pub fn glorot(inputs: usize, outputs: usize, rng: &mut fastrand::Rng) -> Self {
        let limit = (6.0 / (inputs + outputs) as f32).sqrt();
        Self {
            weights: DMatrix::from_fn(inputs, outputs, |_, _| (rng.f32() * 2.0 - 1.0) * limit),
            bias: DVector::zeros(outputs),
        }
    }

    #[inline]
    pub fn inputs(&self) -> usize {
        self.weights.nrows()
    }

    #[inline]
    pub fn outputs(&self) -> usize {
        self.weights.ncols()
    }

    fn affine(&self, a: &DMatrix<f32>) -> DMatrix<f32> {
        let mut z = a * &self.weights;
        for (j, mut col) in z.column_iter_mut().enumerate() {
            col.add_scalar_mut(self.bias[j]);
        }
        z
    }
}

/// Parameter gradients of one layer.
pub(crate) struct Gradient {
    pub weights: DMatrix<f32>,
    pub bias: DVector<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Network {
    pub layers: Vec<Dense>,
    pub activation: Activation,
}

impl Network {
    /// Layer widths `[input, hidden.., output]`, randomly initialized.
    pub fn new(widths: &[usize], activation: Activation, rng: &mut fastrand::Rng) -> Self {
        let layers = widths
            .windows(2)
            .map(|w| Dense::glorot(w[0], w[1], rng))
            .collect();
        Self { layers, activation }
    }

    pub fn input_dim(&self) -> usize {
        self.layers.first().map_or(0, Dense::inputs)
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map_or(0, Dense::outputs)
    }

    /// Class probabilities, one row per sample.
    pub fn forward(&self, x: &DMatrix<f32>) -> DMatrix<f32> {
        let mut activations = self.forward_all(x);
        activations.pop().unwrap_or_else(|| x.clone())
    }

    /// Outputs of every layer; the last entry holds the softmax probabilities.
    /// The input itself is not included.
    pub fn forward_all(&self, x: &DMatrix<f32>) -> Vec<DMatrix<f32>> {
        let mut outputs: Vec<DMatrix<f32>> = Vec::with_capacity(self.layers.len());
        let last = self.layers.len().saturating_sub(1);
        for (i, layer) in self.layers.iter().enumerate() {
            let input = outputs.last().unwrap_or(x);
            let mut z = layer.affine(input);
            if i == last {
                softmax_rows(&mut z);
            } else {
                let act = self.activation;
                z.apply(|v| *v = act.apply(*v));
            }
            outputs.push(z);
        }
        outputs
    }

    /// Gradients of the mean cross-entropy over the batch `x` with one-hot
    /// targets `y`, given `outputs` from [`Network::forward_all`].
    pub fn backward(
        &self,
        x: &DMatrix<f32>,
        y: &DMatrix<f32>,
        outputs: &[DMatrix<f32>],
    ) -> Vec<Gradient> {
        let n = x.nrows().max(1) as f32;
        let mut grads = Vec::with_capacity(self.layers.len());
        let Some(probs) = outputs.last() else {
            return grads;
        };
        // Softmax + cross-entropy: dL/dZ = (P - Y) / n.
        let mut delta = (probs - y) / n;

        for l in (0..self.layers.len()).rev() {
            let input = if l == 0 { x } else { &outputs[l - 1] };
            let bias = DVector::from_iterator(delta.ncols(), delta.column_iter().map(|c| c.sum()));
            grads.push(Gradient {
                weights: input.transpose() * &delta,
                bias,
            });
            if l > 0 {
                let act = self.activation;
                let back = &delta * self.layers[l].weights.transpose();
                delta = back.zip_map(input, |d, a| d * act.derivative(a));
            }
        }
        grads.reverse();
        grads
    }
}

/// Numerically stable in-place softmax over each row.
pub(crate) fn softmax_rows(z: &mut DMatrix<f32>) {
    for i in 0..z.nrows() {
        let mut row = z.row_mut(i);
        let max = row.max();
        row.apply(|v| *v = (*v - max).exp());
        let sum = row.sum();
        row /= sum;
    }
}

/// Mean categorical cross-entropy of `probs` against one-hot `targets`.
pub(crate) fn cross_entropy(probs: &DMatrix<f32>, targets: &DMatrix<f32>) -> f32 {
    if probs.nrows() == 0 {
        return 0.0;
    }
    let total: f32 = probs
        .iter()
        .zip(targets.iter())
        .filter(|&(_, &t)| t != 0.0)
        .map(|(&p, &t)| -t * p.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON).ln())
        .sum();
    total / probs.nrows() as f32
}

/// Index of the largest value in each row.
pub(crate) fn argmax_rows(m: &DMatrix<f32>) -> Vec<usize> {
    m.row_iter().map(|r| r.transpose().imax()).collect()
}

/// Rows of `probs` whose argmax matches the target's argmax.
pub(crate) fn correct_count(probs: &DMatrix<f32>, targets: &DMatrix<f32>) -> usize {
    argmax_rows(probs)
        .into_iter()
        .zip(argmax_rows(targets))
        .filter(|(p, t)| p == t)
        .count()
}
