use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gesture_classifier::{DMatrix, GestureClassifier, TrainParams};

const FEATURES: usize = 63;
const CLASSES: usize = 4;

fn synthetic(n: usize) -> (DMatrix<f32>, DMatrix<f32>) {
    let x = DMatrix::from_fn(n, FEATURES, |i, j| {
        ((i % CLASSES) as f32 * 0.2 + (j as f32 * 0.13 + i as f32 * 0.07).sin() * 0.05).fract()
    });
    let y = DMatrix::from_fn(n, CLASSES, |i, j| if i % CLASSES == j { 1.0 } else { 0.0 });
    (x, y)
}

fn bench_predict(c: &mut Criterion) {
    let (x, _) = synthetic(256);
    let clf = GestureClassifier::new(FEATURES, CLASSES, TrainParams::default()).expect("model");
    c.bench_function("predict_256", |b| {
        b.iter(|| clf.predict(black_box(&x)).expect("predict"))
    });
}

fn bench_train_epoch(c: &mut Criterion) {
    let (x, y) = synthetic(512);
    let params = TrainParams {
        epochs: 1,
        ..TrainParams::default()
    };
    c.bench_function("train_epoch_512", |b| {
        b.iter_batched(
            || GestureClassifier::new(FEATURES, CLASSES, params.clone()).expect("model"),
            |mut clf| clf.train(&x, &y).expect("train"),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_predict, bench_train_epoch);
criterion_main!(benches);
