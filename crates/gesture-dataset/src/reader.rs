use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::writer::summarize_header;
use crate::{DatasetError, FeatureLayout, Sample, Split, FEATURE_COUNT};

/// Per-label sample counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
}

/// An in-memory dataset: samples in file order plus their layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    layout: FeatureLayout,
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(layout: FeatureLayout, samples: Vec<Sample>) -> Self {
        Self { layout, samples }
    }

    /// Load a dataset file; the layout is taken from its header.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all, fields(path = %path.as_ref().display())))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let dataset = Self::from_reader(File::open(path)?)?;
        log::info!(
            "loaded {} samples from {} ({:?} layout)",
            dataset.len(),
            path.display(),
            dataset.layout
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header = rdr.headers()?.clone();
        let fields: Vec<&str> = header.iter().collect();
        let layout = FeatureLayout::from_header(&fields).ok_or_else(|| {
            DatasetError::SchemaMismatch {
                found: summarize_header(&fields),
            }
        })?;

        let mut samples = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            samples.push(parse_row(&record, line)?);
        }
        Ok(Self { layout, samples })
    }

    #[inline]
    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.samples.iter().map(|s| s.label.as_str())
    }

    /// Feature rows, one per sample.
    pub fn feature_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.samples.iter().map(|s| s.features.as_slice())
    }

    pub fn summary(&self) -> LabelSummary {
        let mut counts = BTreeMap::new();
        for label in self.labels() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
        LabelSummary {
            total: self.len(),
            counts,
        }
    }

    /// Samples at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            layout: self.layout,
            samples: indices
                .iter()
                .filter_map(|&i| self.samples.get(i).cloned())
                .collect(),
        }
    }

    /// Materialize a train/test partition.
    pub fn split(&self, split: &Split) -> (Dataset, Dataset) {
        (self.subset(&split.train), self.subset(&split.test))
    }
}

fn parse_row(record: &csv::StringRecord, line: u64) -> Result<Sample, DatasetError> {
    if record.len() != FEATURE_COUNT + 1 {
        return Err(DatasetError::MalformedRow {
            line,
            reason: format!("expected {} fields, got {}", FEATURE_COUNT + 1, record.len()),
        });
    }
    let mut features = Vec::with_capacity(FEATURE_COUNT);
    for (col, field) in record.iter().take(FEATURE_COUNT).enumerate() {
        let value: f32 = field.parse().map_err(|_| DatasetError::MalformedRow {
            line,
            reason: format!("column {} is not a number: {field:?}", col + 1),
        })?;
        features.push(value);
    }
    let label = record.get(FEATURE_COUNT).unwrap_or_default();
    Sample::new(features, label).map_err(|err| DatasetError::MalformedRow {
        line,
        reason: err.to_string(),
    })
}
