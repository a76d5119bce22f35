use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Bijection between gesture labels and class indices `0..K`.
///
/// Classes are kept in sorted lexicographic order, so fitting the same label
/// set always yields the same indices regardless of sample order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelCodec {
    classes: Vec<String>,
}

#[derive(Deserialize)]
struct CodecFile {
    classes: Vec<String>,
}

impl LabelCodec {
    /// Discover the distinct labels in `labels`.
    pub fn fit<I, S>(labels: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> = labels
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect();
        if classes.is_empty() {
            return Err(CodecError::EmptyLabelSet);
        }
        log::debug!("fitted label codec with {} classes", classes.len());
        Ok(Self {
            classes: classes.into_iter().collect(),
        })
    }

    /// Rebuild a codec from an explicit class list, which must be sorted and
    /// free of duplicates.
    pub fn from_classes(classes: Vec<String>) -> Result<Self, CodecError> {
        if classes.is_empty() {
            return Err(CodecError::EmptyLabelSet);
        }
        if let Some(pair) = classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CodecError::InvalidClasses(format!(
                "{:?} must sort strictly before {:?}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { classes })
    }

    /// Number of classes `K`.
    #[inline]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, label: &str) -> Result<usize, CodecError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| CodecError::UnknownLabel(label.to_string()))
    }

    pub fn transform_all<I, S>(&self, labels: I) -> Result<Vec<usize>, CodecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|l| self.transform(l.as_ref()))
            .collect()
    }

    pub fn inverse(&self, index: usize) -> Result<&str, CodecError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(CodecError::UnknownIndex {
                index,
                classes: self.classes.len(),
            })
    }

    /// One-hot targets for `labels`, one row per label.
    pub fn onehot_matrix<I, S>(&self, labels: I) -> Result<DMatrix<f32>, CodecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let indices = self.transform_all(labels)?;
        let mut y = DMatrix::zeros(indices.len(), self.num_classes());
        for (row, &class) in indices.iter().enumerate() {
            y[(row, class)] = 1.0;
        }
        Ok(y)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CodecError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let file: CodecFile = serde_json::from_str(&fs::read_to_string(path)?)?;
        Self::from_classes(file.classes)
    }
}

/// Standard one-hot vector of length `classes` with a 1 at `index`.
pub fn to_onehot(index: usize, classes: usize) -> Result<DVector<f32>, CodecError> {
    if index >= classes {
        return Err(CodecError::UnknownIndex { index, classes });
    }
    let mut v = DVector::zeros(classes);
    v[index] = 1.0;
    Ok(v)
}
