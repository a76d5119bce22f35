use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::MetricsError;

/// Precision, recall and F1 for one class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    /// Number of true samples of this class.
    pub support: usize,
}

/// Multi-class evaluation of predictions against ground truth.
///
/// Scalar precision and recall are support-weighted averages of the
/// per-class values. The scalar F1 is the harmonic mean of the weighted
/// precision and weighted recall; `weighted_f1` is the support-weighted mean
/// of the per-class F1 scores, as scikit-learn reports it. A class that is
/// never predicted has precision 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub samples: usize,
    pub accuracy: f32,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    #[serde(default)]
    pub weighted_f1: f32,
    pub per_class: Vec<ClassMetrics>,
    /// `confusion[true][predicted]` counts.
    pub confusion: Vec<Vec<usize>>,
}

impl ClassificationReport {
    pub fn compute(
        y_true: &[usize],
        y_pred: &[usize],
        num_classes: usize,
    ) -> Result<Self, MetricsError> {
        if y_true.len() != y_pred.len() {
            return Err(MetricsError::LengthMismatch {
                truth: y_true.len(),
                predicted: y_pred.len(),
            });
        }
        if y_true.is_empty() {
            return Err(MetricsError::EmptyInput);
        }
        if let Some(&index) = y_true.iter().chain(y_pred).find(|&&c| c >= num_classes) {
            return Err(MetricsError::ClassOutOfRange {
                index,
                classes: num_classes,
            });
        }

        let mut confusion = vec![vec![0usize; num_classes]; num_classes];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            confusion[t][p] += 1;
        }

        let n = y_true.len();
        let per_class: Vec<ClassMetrics> = (0..num_classes)
            .map(|c| {
                let tp = confusion[c][c] as f32;
                let support: usize = confusion[c].iter().sum();
                let predicted: usize = confusion.iter().map(|row| row[c]).sum();
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                ClassMetrics {
                    precision,
                    recall,
                    f1: harmonic_mean(precision, recall),
                    support,
                }
            })
            .collect();

        let weighted = |f: fn(&ClassMetrics) -> f32| -> f32 {
            per_class
                .iter()
                .map(|m| f(m) * m.support as f32)
                .sum::<f32>()
                / n as f32
        };
        let precision = weighted(|m| m.precision);
        let recall = weighted(|m| m.recall);
        let weighted_f1 = weighted(|m| m.f1);
        let correct: usize = (0..num_classes).map(|c| confusion[c][c]).sum();

        Ok(Self {
            samples: n,
            accuracy: correct as f32 / n as f32,
            precision,
            recall,
            f1: harmonic_mean(precision, recall),
            weighted_f1,
            per_class,
            confusion,
        })
    }

    /// Plain-text table with one row per class, labeled by `class_names`.
    ///
    /// The `weighted avg` row shows `weighted_f1` in the f1 column so the
    /// table lines up with scikit-learn's report.
    pub fn to_table(&self, class_names: &[String]) -> String {
        let width = class_names
            .iter()
            .map(String::len)
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>width$}  {:>9}  {:>9}  {:>9}  {:>7}",
            "", "precision", "recall", "f1-score", "support"
        );
        for (i, m) in self.per_class.iter().enumerate() {
            let name = class_names.get(i).map_or("?", String::as_str);
            let _ = writeln!(
                out,
                "{name:>width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>7}",
                m.precision, m.recall, m.f1, m.support
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>width$}  {:>9}  {:>9}  {:>9.4}  {:>7}",
            "accuracy", "", "", self.accuracy, self.samples
        );
        let _ = writeln!(
            out,
            "{:>width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>7}",
            "weighted avg", self.precision, self.recall, self.weighted_f1, self.samples
        );
        out
    }
}

fn ratio(num: f32, den: usize) -> f32 {
    if den == 0 {
        0.0
    } else {
        num / den as f32
    }
}

fn harmonic_mean(a: f32, b: f32) -> f32 {
    if a + b > 0.0 {
        2.0 * a * b / (a + b)
    } else {
        0.0
    }
}
