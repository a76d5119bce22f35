use crate::network::{Dense, Gradient};

/// Adam with bias-corrected step size.
pub(crate) struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    step: i32,
    moments: Vec<LayerMoments>,
}

struct LayerMoments {
    m_w: Vec<f32>,
    v_w: Vec<f32>,
    m_b: Vec<f32>,
    v_b: Vec<f32>,
}

impl Adam {
    pub fn new(learning_rate: f32, layers: &[Dense]) -> Self {
        let moments = layers
            .iter()
            .map(|l| LayerMoments {
                m_w: vec![0.0; l.weights.len()],
                v_w: vec![0.0; l.weights.len()],
                m_b: vec![0.0; l.bias.len()],
                v_b: vec![0.0; l.bias.len()],
            })
            .collect();
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            step: 0,
            moments,
        }
    }

    /// Apply one update. `grads` must line up with `layers`.
    pub fn step(&mut self, layers: &mut [Dense], grads: &[Gradient]) {
        self.step = self.step.saturating_add(1);
        let lr = self.learning_rate * (1.0 - self.beta2.powi(self.step)).sqrt()
            / (1.0 - self.beta1.powi(self.step));
        let (b1, b2, eps) = (self.beta1, self.beta2, self.epsilon);

        for ((layer, grad), mom) in layers.iter_mut().zip(grads).zip(&mut self.moments) {
            update(
                layer.weights.as_mut_slice(),
                grad.weights.as_slice(),
                &mut mom.m_w,
                &mut mom.v_w,
                [lr, b1, b2, eps],
            );
            update(
                layer.bias.as_mut_slice(),
                grad.bias.as_slice(),
                &mut mom.m_b,
                &mut mom.v_b,
                [lr, b1, b2, eps],
            );
        }
    }
}

fn update(params: &mut [f32], grads: &[f32], m: &mut [f32], v: &mut [f32], coeffs: [f32; 4]) {
    let [lr, b1, b2, eps] = coeffs;
    for (((p, &g), m), v) in params.iter_mut().zip(grads).zip(m).zip(v) {
        *m = b1 * *m + (1.0 - b1) * g;
        *v = b2 * *v + (1.0 - b2) * g * g;
        *p -= lr * *m / (v.sqrt() + eps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{DMatrix, DVector};

    #[test]
    fn first_step_moves_each_weight_by_the_learning_rate() {
        let mut layers = vec![Dense {
            weights: DMatrix::from_column_slice(2, 1, &[1.0, -1.0]),
            bias: DVector::from_vec(vec![0.5]),
        }];
        let grads = vec![Gradient {
            weights: DMatrix::from_column_slice(2, 1, &[3.0, -0.2]),
            bias: DVector::from_vec(vec![0.0]),
        }];
        let mut adam = Adam::new(0.01, &layers);
        adam.step(&mut layers, &grads);

        // With bias correction the first step is lr * sign(g).
        assert!((layers[0].weights[(0, 0)] - 0.99).abs() < 1e-5);
        assert!((layers[0].weights[(1, 0)] + 0.99).abs() < 1e-5);
        assert_eq!(layers[0].bias[0], 0.5);
    }
}
