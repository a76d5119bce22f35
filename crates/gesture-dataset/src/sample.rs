use gesture_core::{LandmarkSet, HAND_LANDMARK_COUNT};
use serde::{Deserialize, Serialize};

use crate::{FeatureLayout, SampleError, FEATURE_COUNT};

/// One labeled training example.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f32>,
    pub label: String,
}

impl Sample {
    /// Build a sample from an already flattened feature row.
    pub fn new(features: Vec<f32>, label: impl Into<String>) -> Result<Self, SampleError> {
        let label = label.into();
        validate_label(&label)?;
        if features.len() != FEATURE_COUNT {
            return Err(SampleError::MalformedSample {
                expected: FEATURE_COUNT,
                got: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|v| !v.is_finite()) {
            return Err(SampleError::NonFiniteFeature { index });
        }
        Ok(Self { features, label })
    }

    /// Landmarks encoded in this sample, read back with `layout`.
    pub fn landmarks(&self, layout: FeatureLayout) -> Option<LandmarkSet> {
        layout.unflatten(&self.features)
    }
}

/// Flatten a normalized landmark set into a labeled sample.
///
/// The set must hold exactly [`HAND_LANDMARK_COUNT`] points; anything else is
/// reported as [`SampleError::MalformedSample`] rather than padded.
pub fn encode(
    landmarks: &LandmarkSet,
    label: &str,
    layout: FeatureLayout,
) -> Result<Sample, SampleError> {
    if !landmarks.is_complete() {
        return Err(SampleError::MalformedSample {
            expected: HAND_LANDMARK_COUNT,
            got: landmarks.len(),
        });
    }
    Sample::new(layout.flatten(landmarks), label)
}

/// Check that `label` is usable as a single CSV field.
///
/// Surrounding whitespace is refused because dataset readers trim fields, so
/// `"play "` would come back as a different class.
pub fn validate_label(label: &str) -> Result<(), SampleError> {
    if label.trim().is_empty() {
        return Err(SampleError::EmptyLabel);
    }
    if label.contains(['\n', '\r']) || label.trim() != label {
        return Err(SampleError::InvalidLabel(label.to_string()));
    }
    Ok(())
}
