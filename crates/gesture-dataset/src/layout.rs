use gesture_core::{LandmarkPoint, LandmarkSet, HAND_LANDMARK_COUNT};
use serde::{Deserialize, Serialize};

/// Number of feature values per sample (`x`, `y`, `z` for every landmark).
pub const FEATURE_COUNT: usize = 3 * HAND_LANDMARK_COUNT;

/// Name of the trailing label column.
pub const LABEL_COLUMN: &str = "gesture_label";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn prefix(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    fn of(self, p: &LandmarkPoint) -> f32 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
            Axis::Z => p.z,
        }
    }
}

/// Order of the feature values within a row.
///
/// Both layouts hold the same numbers; they differ only in column order. A
/// dataset file states its layout through its header, and every row of the
/// file follows it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureLayout {
    /// `x1..x21, y1..y21, z1..z21`.
    #[default]
    Planar,
    /// `x1, y1, z1, x2, y2, z2, ...`.
    Interleaved,
}

impl FeatureLayout {
    pub const ALL: [FeatureLayout; 2] = [FeatureLayout::Planar, FeatureLayout::Interleaved];

    /// Position of `axis` of landmark `landmark` (0-based) in a feature row.
    #[inline]
    pub fn feature_index(self, landmark: usize, axis: Axis) -> usize {
        let a = axis as usize;
        match self {
            FeatureLayout::Planar => a * HAND_LANDMARK_COUNT + landmark,
            FeatureLayout::Interleaved => landmark * 3 + a,
        }
    }

    /// `(landmark, axis)` stored at feature position `index`.
    fn slot(self, index: usize) -> (usize, Axis) {
        match self {
            FeatureLayout::Planar => (
                index % HAND_LANDMARK_COUNT,
                Axis::ALL[index / HAND_LANDMARK_COUNT],
            ),
            FeatureLayout::Interleaved => (index / 3, Axis::ALL[index % 3]),
        }
    }

    /// Feature column names, without the label column.
    pub fn feature_columns(self) -> Vec<String> {
        (0..FEATURE_COUNT)
            .map(|i| {
                let (landmark, axis) = self.slot(i);
                format!("{}{}", axis.prefix(), landmark + 1)
            })
            .collect()
    }

    /// Full CSV header: feature columns followed by [`LABEL_COLUMN`].
    pub fn header(self) -> Vec<String> {
        let mut cols = self.feature_columns();
        cols.push(LABEL_COLUMN.to_string());
        cols
    }

    /// Identify the layout a header was written with.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Option<Self> {
        Self::ALL.into_iter().find(|layout| {
            let expected = layout.header();
            expected.len() == header.len()
                && expected
                    .iter()
                    .zip(header)
                    .all(|(e, h)| e.as_str() == h.as_ref())
        })
    }

    /// Flatten landmarks into a feature row. Missing landmarks are skipped,
    /// so a short set yields a short row.
    pub fn flatten(self, set: &LandmarkSet) -> Vec<f32> {
        let n = set.len().min(HAND_LANDMARK_COUNT);
        let points = &set.points()[..n];
        match self {
            FeatureLayout::Planar => Axis::ALL
                .iter()
                .flat_map(|&axis| points.iter().map(move |p| axis.of(p)))
                .collect(),
            FeatureLayout::Interleaved => points.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
        }
    }

    /// Rebuild landmarks from a full feature row.
    pub fn unflatten(self, features: &[f32]) -> Option<LandmarkSet> {
        if features.len() != FEATURE_COUNT {
            return None;
        }
        let at = |i: usize, axis: Axis| features[self.feature_index(i, axis)];
        Some(
            (0..HAND_LANDMARK_COUNT)
                .map(|i| LandmarkPoint::new(at(i, Axis::X), at(i, Axis::Y), at(i, Axis::Z)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand() -> LandmarkSet {
        (0..HAND_LANDMARK_COUNT)
            .map(|i| LandmarkPoint::new(i as f32, 100.0 + i as f32, 200.0 + i as f32))
            .collect()
    }

    #[test]
    fn planar_header_groups_by_axis() {
        let header = FeatureLayout::Planar.header();
        assert_eq!(header.len(), FEATURE_COUNT + 1);
        assert_eq!(header[0], "x1");
        assert_eq!(header[20], "x21");
        assert_eq!(header[21], "y1");
        assert_eq!(header[62], "z21");
        assert_eq!(header[63], LABEL_COLUMN);
    }

    #[test]
    fn interleaved_header_groups_by_landmark() {
        let header = FeatureLayout::Interleaved.header();
        assert_eq!(&header[..4], &["x1", "y1", "z1", "x2"]);
        assert_eq!(header[62], "z21");
    }

    #[test]
    fn rows_follow_their_header() {
        let set = hand();
        for layout in FeatureLayout::ALL {
            let row = layout.flatten(&set);
            let header = layout.feature_columns();
            assert_eq!(row.len(), FEATURE_COUNT);
            for (name, value) in header.iter().zip(&row) {
                let landmark: usize = name[1..].parse().expect("index");
                let base = match &name[..1] {
                    "x" => 0.0,
                    "y" => 100.0,
                    _ => 200.0,
                };
                assert_eq!(*value, base + (landmark - 1) as f32, "{layout:?} {name}");
            }
            assert_eq!(layout.unflatten(&row), Some(set.clone()));
        }
    }

    #[test]
    fn header_identifies_layout() {
        for layout in FeatureLayout::ALL {
            assert_eq!(FeatureLayout::from_header(&layout.header()), Some(layout));
        }
        let mut header = FeatureLayout::Planar.header();
        header.pop();
        assert_eq!(FeatureLayout::from_header(&header), None);
        header.push("label".to_string());
        assert_eq!(FeatureLayout::from_header(&header), None);
    }

    #[test]
    fn short_set_flattens_short() {
        let set: LandmarkSet = hand().into_points().into_iter().take(5).collect();
        assert_eq!(FeatureLayout::Planar.flatten(&set).len(), 15);
        assert_eq!(FeatureLayout::Planar.unflatten(&[0.0; 15]), None);
    }
}
