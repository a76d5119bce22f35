use serde::{Deserialize, Serialize};

use crate::DatasetError;

/// Train/test partition settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    /// Fraction of samples held out for testing, in `(0, 1)`.
    pub test_fraction: f32,
    /// Shuffle seed; the same seed and sample count always give the same split.
    pub seed: u64,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Sample indices of a train/test partition. The two sides are disjoint and
/// together cover `0..n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded generator and hold out `ceil(n * test_fraction)`
/// indices for testing.
///
/// Fails if either side would end up empty.
pub fn train_test_split(n: usize, params: &SplitParams) -> Result<Split, DatasetError> {
    let invalid = || DatasetError::InvalidSplit {
        samples: n,
        test_fraction: params.test_fraction,
    };
    let f = params.test_fraction;
    if !(f > 0.0 && f < 1.0) {
        return Err(invalid());
    }
    let n_test = (n as f32 * f).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(invalid());
    }

    let mut indices: Vec<usize> = (0..n).collect();
    fastrand::Rng::with_seed(params.seed).shuffle(&mut indices);
    let train = indices.split_off(n_test);
    log::debug!(
        "split {n} samples into {} train / {n_test} test (seed {})",
        train.len(),
        params.seed
    );
    Ok(Split {
        train,
        test: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_round_test_side_up() {
        let s = train_test_split(200, &SplitParams::default()).expect("split");
        assert_eq!((s.train.len(), s.test.len()), (160, 40));

        let s = train_test_split(11, &SplitParams::default()).expect("split");
        assert_eq!((s.train.len(), s.test.len()), (8, 3));
    }

    #[test]
    fn sides_partition_all_indices() {
        let s = train_test_split(57, &SplitParams::default()).expect("split");
        let mut all: Vec<usize> = s.train.iter().chain(&s.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..57).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        let p = SplitParams {
            test_fraction: 0.3,
            seed: 7,
        };
        assert_eq!(
            train_test_split(40, &p).expect("a"),
            train_test_split(40, &p).expect("b")
        );
        let other = SplitParams { seed: 8, ..p.clone() };
        assert_ne!(
            train_test_split(40, &p).expect("a"),
            train_test_split(40, &other).expect("c")
        );
    }

    #[test]
    fn degenerate_splits_fail() {
        for (n, f) in [(0, 0.2), (1, 0.2), (10, 0.0), (10, 1.0), (10, f32::NAN)] {
            let p = SplitParams {
                test_fraction: f,
                seed: 1,
            };
            assert!(
                matches!(train_test_split(n, &p), Err(DatasetError::InvalidSplit { .. })),
                "n={n} f={f}"
            );
        }
    }
}
