use approx::assert_relative_eq;
use gesture_classifier::{
    Activation, ClassifierError, DMatrix, GestureClassifier, LabelCodec, TrainParams,
    FORMAT_VERSION,
};
use std::fs;

fn data() -> (DMatrix<f32>, DMatrix<f32>, LabelCodec) {
    let labels: Vec<&str> = (0..30)
        .map(|i| ["fist", "palm", "point"][i % 3])
        .collect();
    let codec = LabelCodec::fit(&labels).expect("codec");
    let classes = codec.transform_all(&labels).expect("classes");
    let x = DMatrix::from_fn(30, 6, |i, j| {
        classes[i] as f32 + 0.05 * ((i + 7 * j) as f32).cos() - j as f32 * 0.1
    });
    let y = codec.onehot_matrix(&labels).expect("onehot");
    (x, y, codec)
}

fn trained(activation: Activation) -> GestureClassifier {
    let (x, y, codec) = data();
    let params = TrainParams {
        hidden_layers: vec![16, 12],
        activation,
        epochs: 5,
        batch_size: 8,
        ..TrainParams::default()
    };
    let mut clf = GestureClassifier::new(6, codec.num_classes(), params).expect("new");
    clf.train(&x, &y).expect("train");
    clf
}

#[test]
fn save_load_preserves_predictions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (x, _, _) = data();
    for activation in [Activation::Tanh, Activation::Relu] {
        let path = dir.path().join(format!("{activation:?}.json"));
        let clf = trained(activation);
        clf.save(&path).expect("save");

        let loaded = GestureClassifier::load(&path, 6, 3).expect("load");
        assert_eq!(loaded.params(), clf.params());
        let before = clf.predict(&x).expect("predict");
        let after = loaded.predict(&x).expect("predict");
        for (a, b) in before.iter().zip(after.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }
    }
}

#[test]
fn load_rejects_other_dimensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.json");
    trained(Activation::Tanh).save(&path).expect("save");

    let err = GestureClassifier::load(&path, 63, 3).expect_err("input");
    assert!(matches!(
        err,
        ClassifierError::DimensionMismatch {
            expected: 63,
            got: 6,
            ..
        }
    ));
    let err = GestureClassifier::load(&path, 6, 4).expect_err("output");
    assert!(matches!(
        err,
        ClassifierError::DimensionMismatch {
            expected: 4,
            got: 3,
            ..
        }
    ));
}

#[test]
fn artifact_is_versioned_row_major_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.json");
    trained(Activation::Tanh).save(&path).expect("save");

    let mut doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(doc["format_version"], FORMAT_VERSION);
    assert_eq!(doc["architecture"]["hidden"], serde_json::json!([16, 12]));
    assert_eq!(doc["architecture"]["activation"], "tanh");
    assert_eq!(doc["layers"][0]["rows"], 6);
    assert_eq!(doc["layers"][0]["cols"], 16);
    assert_eq!(doc["layers"][0]["weights"].as_array().map(Vec::len), Some(96));

    doc["format_version"] = serde_json::json!(99);
    fs::write(&path, doc.to_string()).expect("write");
    assert!(matches!(
        GestureClassifier::load(&path, 6, 3),
        Err(ClassifierError::UnsupportedFormat { found: 99, .. })
    ));
}

#[test]
fn truncated_layer_is_invalid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.json");
    trained(Activation::Tanh).save(&path).expect("save");

    let mut doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    if let Some(weights) = doc["layers"][1]["weights"].as_array_mut() {
        weights.pop();
    }
    fs::write(&path, doc.to_string()).expect("write");
    assert!(matches!(
        GestureClassifier::load(&path, 6, 3),
        Err(ClassifierError::InvalidArtifact(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        GestureClassifier::load(dir.path().join("absent.json"), 6, 3),
        Err(ClassifierError::Io(_))
    ));
}

fn rewrite(path: &std::path::Path, edit: impl FnOnce(&mut serde_json::Value)) {
    let mut doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json");
    edit(&mut doc);
    fs::write(path, doc.to_string()).expect("write");
}

#[test]
fn stored_params_are_validated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.json");
    trained(Activation::Tanh).save(&path).expect("save");

    rewrite(&path, |doc| doc["params"]["batch_size"] = serde_json::json!(0));
    let err = GestureClassifier::load(&path, 6, 3).expect_err("batch_size 0");
    assert!(matches!(err, ClassifierError::InvalidArtifact(ref msg) if msg.contains("batch_size")));
}

#[test]
fn stored_params_must_match_architecture() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.json");
    trained(Activation::Tanh).save(&path).expect("save");

    rewrite(&path, |doc| {
        doc["params"]["hidden_layers"] = serde_json::json!([16, 8]);
    });
    assert!(matches!(
        GestureClassifier::load(&path, 6, 3),
        Err(ClassifierError::InvalidArtifact(_))
    ));
}

#[test]
fn missing_params_follow_architecture() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.json");
    trained(Activation::Relu).save(&path).expect("save");

    rewrite(&path, |doc| {
        if let Some(obj) = doc.as_object_mut() {
            obj.remove("params");
        }
    });
    let (x, y, _) = data();
    let mut loaded = GestureClassifier::load(&path, 6, 3).expect("load");
    assert_eq!(loaded.params().hidden_layers, [16, 12]);
    assert_eq!(loaded.params().activation, Activation::Relu);
    assert_eq!(loaded.params().batch_size, TrainParams::default().batch_size);
    loaded.train(&x, &y).expect("train after load");
}
