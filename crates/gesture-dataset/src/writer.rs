use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use gesture_core::LandmarkSet;

use crate::{
    encode, validate_label, DatasetError, FeatureLayout, Sample, SampleError, FEATURE_COUNT,
};

/// Append-only writer for a gesture dataset file.
///
/// Opening a missing or empty file writes the header first. A file holding
/// only blank lines counts as empty and is rewritten. Opening an existing
/// file checks that its header matches the requested layout and
/// refuses to append otherwise. Every appended row is flushed before
/// [`DatasetWriter::append`] returns, so a crash loses at most the row in
/// flight.
pub struct DatasetWriter {
    path: PathBuf,
    layout: FeatureLayout,
    writer: csv::Writer<File>,
    rows_written: usize,
}

impl DatasetWriter {
    pub fn open(path: impl AsRef<Path>, layout: FeatureLayout) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let needs_header = match fs::metadata(path) {
            Ok(meta) if meta.len() == 0 => true,
            Ok(_) => !check_header(path, layout)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => return Err(err.into()),
        };

        let file = if needs_header {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?
        } else {
            OpenOptions::new().append(true).open(path)?
        };
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(layout.header())?;
            writer.flush()?;
            log::info!("created dataset {} ({layout:?} layout)", path.display());
        } else {
            log::debug!("appending to dataset {}", path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            layout,
            writer,
            rows_written: 0,
        })
    }

    #[inline]
    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended through this writer (not counting pre-existing rows).
    #[inline]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Append one sample. Its features must already be in this writer's layout.
    pub fn append(&mut self, sample: &Sample) -> Result<(), DatasetError> {
        if sample.features.len() != FEATURE_COUNT {
            return Err(SampleError::MalformedSample {
                expected: FEATURE_COUNT,
                got: sample.features.len(),
            }
            .into());
        }
        validate_label(&sample.label)?;

        let record = sample
            .features
            .iter()
            .map(f32::to_string)
            .chain(std::iter::once(sample.label.clone()));
        self.writer.write_record(record)?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Encode `landmarks` with this writer's layout and append the result.
    pub fn append_landmarks(
        &mut self,
        landmarks: &LandmarkSet,
        label: &str,
    ) -> Result<Sample, DatasetError> {
        let sample = encode(landmarks, label, self.layout)?;
        self.append(&sample)?;
        Ok(sample)
    }
}

/// Returns `false` when the file holds no record at all.
fn check_header(path: &Path, layout: FeatureLayout) -> Result<bool, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut first = csv::StringRecord::new();
    if !reader.read_record(&mut first)? {
        return Ok(false);
    }
    let found: Vec<&str> = first.iter().collect();
    if FeatureLayout::from_header(&found) == Some(layout) {
        Ok(true)
    } else {
        Err(DatasetError::SchemaMismatch {
            found: summarize_header(&found),
        })
    }
}

pub(crate) fn summarize_header(fields: &[&str]) -> String {
    const SHOWN: usize = 4;
    let head = fields.iter().take(SHOWN).copied().collect::<Vec<_>>().join(",");
    if fields.len() > SHOWN {
        format!("{head},... ({} columns)", fields.len())
    } else {
        format!("{head} ({} columns)", fields.len())
    }
}
