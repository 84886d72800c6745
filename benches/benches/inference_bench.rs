//! # Inference Benchmarks
//!
//! Measures the request path piece by piece: sample parsing, feature vector
//! assembly, model evaluation and the full pipeline call.
//!
//! Run: `cargo bench --bench inference_bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use wine_core::features;
use wine_core::model::LinearModel;
use wine_core::prelude::*;

const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../assets/wine_quality.json");

fn red_json() -> Value {
    json!({
        "wine_type": "red",
        "fixed_acidity": 7.4,
        "volatile_acidity": 0.7,
        "citric_acid": 0.0,
        "residual_sugar": 1.9,
        "chlorides": 0.076,
        "free_sulfur_dioxide": 11,
        "total_sulfur_dioxide": 34,
        "density": 0.9978,
        "pH": 3.51,
        "sulphates": 0.56,
        "alcohol": 9.4
    })
}

fn red_sample() -> WineSample {
    WineSample::from_values(
        WineType::Red,
        [7.4, 0.7, 0.0, 1.9, 0.076, 11.0, 34.0, 0.9978, 3.51, 0.56, 9.4],
    )
}

fn forest_adapter() -> Arc<ModelAdapter> {
    Arc::new(ModelAdapter::load(MODEL_PATH))
}

fn linear_adapter() -> Arc<ModelAdapter> {
    let model = LinearModel::new(12, 3.2, vec![0.1; 12]).expect("valid linear model");
    Arc::new(ModelAdapter::from_model(model))
}

/// Benchmark input parsing and validation
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let value = red_json();
    group.bench_function("from_json", |b| {
        b.iter(|| black_box(WineSample::from_json(black_box(&value))))
    });

    let mut invalid = red_json();
    invalid["alcohol"] = json!(42.0);
    group.bench_function("from_json_out_of_range", |b| {
        b.iter(|| black_box(WineSample::from_json(black_box(&invalid))))
    });

    let sample = red_sample();
    group.bench_function("build_vector", |b| {
        b.iter(|| black_box(features::build(black_box(&sample))))
    });

    group.finish();
}

/// Benchmark model evaluation through the adapter
fn bench_adapter(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapter");

    let vector = features::build(&red_sample()).expect("valid sample");

    for (name, adapter) in [("forest", forest_adapter()), ("linear", linear_adapter())] {
        group.bench_with_input(BenchmarkId::new("predict", name), &adapter, |b, adapter| {
            b.iter(|| black_box(adapter.predict(black_box(&vector))))
        });
    }

    group.finish();
}

/// Benchmark the full request path
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let pipeline = InferencePipeline::new(forest_adapter());
    let value = red_json();
    let sample = red_sample();

    group.bench_function("infer", |b| {
        b.iter(|| black_box(pipeline.infer(black_box(&sample))))
    });

    group.bench_function("infer_json", |b| {
        b.iter(|| black_box(pipeline.infer_json(black_box(&value))))
    });

    for size in [10, 100, 1000] {
        let batch = vec![red_sample(); size];
        group.bench_with_input(BenchmarkId::new("infer_batch", size), &batch, |b, batch| {
            b.iter(|| black_box(pipeline.infer_batch(black_box(batch))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_adapter, bench_pipeline);
criterion_main!(benches);
