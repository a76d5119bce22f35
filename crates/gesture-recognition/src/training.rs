//! Offline training and online recognition.

use std::fs;
use std::path::Path;

use gesture_classifier::{
    ClassificationReport, ClassifierError, CodecError, DMatrix, EpochStats, GestureClassifier,
    LabelCodec, MetricsError, TrainParams,
};
use gesture_core::{LandmarkSet, HAND_LANDMARK_COUNT};
use gesture_dataset::{
    train_test_split, Dataset, DatasetError, FeatureLayout, SampleError, SplitParams,
    FEATURE_COUNT,
};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::io::{IoError, TrainConfig, TrainReport};

/// Errors from the training pipeline and the recognizer.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Sample(#[from] SampleError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Io(#[from] IoError),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(IoError::Io(err))
    }
}

/// A trained classifier together with its codec and run summary.
#[derive(Debug)]
pub struct TrainedModel {
    pub classifier: GestureClassifier,
    pub codec: LabelCodec,
    pub report: TrainReport,
}

/// Stack the dataset's feature rows into an `n × FEATURE_COUNT` matrix.
pub fn feature_matrix(dataset: &Dataset) -> Result<DMatrix<f32>, SampleError> {
    if let Some(bad) = dataset.feature_rows().find(|r| r.len() != FEATURE_COUNT) {
        return Err(SampleError::MalformedSample {
            expected: FEATURE_COUNT,
            got: bad.len(),
        });
    }
    Ok(DMatrix::from_row_iterator(
        dataset.len(),
        FEATURE_COUNT,
        dataset.feature_rows().flatten().copied(),
    ))
}

/// Fit a codec on every label, split, train and evaluate on the held-out part.
pub fn train_from_dataset(
    dataset: &Dataset,
    split: &SplitParams,
    params: &TrainParams,
) -> Result<TrainedModel, PipelineError> {
    train_from_dataset_with_progress(dataset, split, params, |_| {})
}

/// Like [`train_from_dataset`], reporting each finished epoch to `progress`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(samples = dataset.len()))
)]
pub fn train_from_dataset_with_progress<F>(
    dataset: &Dataset,
    split: &SplitParams,
    params: &TrainParams,
    progress: F,
) -> Result<TrainedModel, PipelineError>
where
    F: FnMut(&EpochStats),
{
    if dataset.is_empty() {
        return Err(DatasetError::Empty.into());
    }
    let codec = LabelCodec::fit(dataset.labels())?;
    let k = codec.num_classes();
    log::info!(
        "dataset: {} samples, {k} classes {:?}",
        dataset.len(),
        codec.classes()
    );

    let partition = train_test_split(dataset.len(), split)?;
    let (train, test) = dataset.split(&partition);

    let x_train = feature_matrix(&train)?;
    let y_train = codec.onehot_matrix(train.labels())?;
    let mut classifier = GestureClassifier::new(FEATURE_COUNT, k, params.clone())?;
    let history = classifier.train_with_progress(&x_train, &y_train, progress)?;

    let x_test = feature_matrix(&test)?;
    let y_test = codec.onehot_matrix(test.labels())?;
    let evaluation = classifier.evaluate(&x_test, &y_test)?;
    let y_true = codec.transform_all(test.labels())?;
    let y_pred = classifier.predict_classes(&x_test)?;
    let metrics = ClassificationReport::compute(&y_true, &y_pred, k)?;
    log::info!(
        "test loss {:.4}, accuracy {:.4}, precision {:.4}, recall {:.4}, f1 {:.4}",
        evaluation.loss,
        evaluation.accuracy,
        metrics.precision,
        metrics.recall,
        metrics.f1
    );

    let report = TrainReport {
        layout: dataset.layout(),
        classes: codec.classes().to_vec(),
        dataset: dataset.summary(),
        train_samples: train.len(),
        test_samples: test.len(),
        history,
        test: evaluation,
        metrics,
    };
    Ok(TrainedModel {
        classifier,
        codec,
        report,
    })
}

/// Run a full training job described by `config` and write its outputs.
pub fn run_training(config: &TrainConfig) -> Result<TrainReport, PipelineError> {
    let dataset = Dataset::load(&config.dataset_path)?;
    let trained = train_from_dataset(&dataset, &config.split, &config.train)?;

    let report_path = config.report_path();
    for path in [
        Path::new(&config.model_path),
        Path::new(&config.labels_path),
        report_path.as_path(),
    ] {
        create_parent(path)?;
    }
    trained.classifier.save(&config.model_path)?;
    trained.codec.save(&config.labels_path)?;
    trained.report.write_json(&report_path)?;
    log::info!("wrote report to {}", report_path.display());
    Ok(trained.report)
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// Classifier output for one feature vector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recognition {
    pub label: String,
    pub index: usize,
    /// Probability of the winning class.
    pub confidence: f32,
    pub probabilities: Vec<f32>,
}

/// A trained classifier paired with the codec it was trained against.
#[derive(Debug)]
pub struct GestureRecognizer {
    classifier: GestureClassifier,
    codec: LabelCodec,
}

impl GestureRecognizer {
    pub fn new(classifier: GestureClassifier, codec: LabelCodec) -> Result<Self, PipelineError> {
        if classifier.input_dim() != FEATURE_COUNT {
            return Err(ClassifierError::DimensionMismatch {
                what: "model input",
                expected: FEATURE_COUNT,
                got: classifier.input_dim(),
            }
            .into());
        }
        if classifier.output_dim() != codec.num_classes() {
            return Err(ClassifierError::DimensionMismatch {
                what: "class count",
                expected: codec.num_classes(),
                got: classifier.output_dim(),
            }
            .into());
        }
        Ok(Self { classifier, codec })
    }

    /// Load a label codec and a model that must match it.
    pub fn load(
        model_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
    ) -> Result<Self, PipelineError> {
        let codec = LabelCodec::load(labels_path)?;
        let classifier = GestureClassifier::load(model_path, FEATURE_COUNT, codec.num_classes())?;
        Ok(Self { classifier, codec })
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Classify one feature vector in training-time encoding order.
    pub fn recognize(&self, features: &[f32]) -> Result<Recognition, PipelineError> {
        if features.len() != FEATURE_COUNT {
            return Err(ClassifierError::DimensionMismatch {
                what: "feature",
                expected: FEATURE_COUNT,
                got: features.len(),
            }
            .into());
        }
        let x = DMatrix::from_row_slice(1, FEATURE_COUNT, features);
        let probs = self.classifier.predict(&x)?;
        let probabilities: Vec<f32> = probs.row(0).iter().copied().collect();
        let (index, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });
        let label = self.codec.inverse(index)?.to_string();
        Ok(Recognition {
            label,
            index,
            confidence,
            probabilities,
        })
    }

    /// Classify a normalized hand, flattened with `layout`.
    pub fn recognize_landmarks(
        &self,
        landmarks: &LandmarkSet,
        layout: FeatureLayout,
    ) -> Result<Recognition, PipelineError> {
        if !landmarks.is_complete() {
            return Err(SampleError::MalformedSample {
                expected: HAND_LANDMARK_COUNT,
                got: landmarks.len(),
            }
            .into());
        }
        self.recognize(&layout.flatten(landmarks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_dataset::Sample;

    fn tiny_dataset() -> Dataset {
        let samples = (0..20)
            .map(|i| {
                let label = if i % 2 == 0 { "open" } else { "fist" };
                let base = if i % 2 == 0 { 0.2 } else { 0.8 };
                let features = (0..FEATURE_COUNT)
                    .map(|j| base + 0.01 * ((i + j) % 5) as f32)
                    .collect();
                Sample::new(features, label).expect("sample")
            })
            .collect();
        Dataset::new(FeatureLayout::Planar, samples)
    }

    fn quick_params() -> TrainParams {
        TrainParams {
            hidden_layers: vec![8, 8],
            epochs: 2,
            ..TrainParams::default()
        }
    }

    #[test]
    fn feature_matrix_is_row_per_sample() {
        let ds = tiny_dataset();
        let x = feature_matrix(&ds).expect("matrix");
        assert_eq!(x.shape(), (20, FEATURE_COUNT));
        assert_eq!(x[(1, 0)], ds.samples()[1].features[0]);
        assert_eq!(x[(3, 62)], ds.samples()[3].features[62]);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let ds = Dataset::new(FeatureLayout::Planar, Vec::new());
        assert!(matches!(
            train_from_dataset(&ds, &SplitParams::default(), &quick_params()),
            Err(PipelineError::Dataset(DatasetError::Empty))
        ));
    }

    #[test]
    fn report_counts_both_partitions() {
        let trained = train_from_dataset(&tiny_dataset(), &SplitParams::default(), &quick_params())
            .expect("train");
        let r = &trained.report;
        assert_eq!((r.train_samples, r.test_samples), (16, 4));
        assert_eq!(r.classes, ["fist", "open"]);
        assert_eq!(r.history.epochs.len(), 2);
        assert_eq!(r.metrics.samples, 4);
    }

    #[test]
    fn recognizer_checks_codec_against_model() {
        let codec = LabelCodec::fit(["a", "b", "c"]).expect("codec");
        let clf = GestureClassifier::new(FEATURE_COUNT, 2, quick_params()).expect("clf");
        assert!(matches!(
            GestureRecognizer::new(clf, codec),
            Err(PipelineError::Classifier(ClassifierError::DimensionMismatch {
                what: "class count",
                expected: 3,
                got: 2
            }))
        ));
    }

    #[test]
    fn recognize_returns_most_probable_label() {
        let codec = LabelCodec::fit(["a", "b"]).expect("codec");
        let clf = GestureClassifier::new(FEATURE_COUNT, 2, quick_params()).expect("clf");
        let rec = GestureRecognizer::new(clf, codec).expect("recognizer");
        let out = rec.recognize(&[0.5; FEATURE_COUNT]).expect("recognize");
        assert_eq!(out.probabilities.len(), 2);
        assert_eq!(out.confidence, out.probabilities[out.index]);
        assert!(out.confidence >= 0.5);
        assert_eq!(out.label, ["a", "b"][out.index]);

        assert!(matches!(
            rec.recognize(&[0.5; 10]),
            Err(PipelineError::Classifier(ClassifierError::DimensionMismatch { got: 10, .. }))
        ));
        assert!(matches!(
            rec.recognize_landmarks(&LandmarkSet::default(), FeatureLayout::Planar),
            Err(PipelineError::Sample(SampleError::MalformedSample { got: 0, .. }))
        ));
    }
}
