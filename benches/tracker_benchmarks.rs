//! Tracker and pipeline benchmarks using Criterion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use occupancy_rs::matching::AssignmentKind;
use occupancy_rs::{Centroid, Detection, PipelineConfig, StreamPipeline, Tracker, TrackerConfig};

/// Grid of centroids shifted by `frame` pixels to the right.
fn create_test_centroids(n: usize, frame: i32) -> Vec<Centroid> {
    (0..n)
        .map(|i| Centroid::new((i % 10) as i32 * 100 + frame, (i / 10) as i32 * 80))
        .collect()
}

fn create_test_detections(n: usize, frame: i32) -> Vec<Detection> {
    create_test_centroids(n, frame)
        .into_iter()
        .map(|c| Detection::from_corners(c.x - 10, c.y - 20, c.x + 10, c.y + 20, 0.9, 0).expect("valid detection"))
        .collect()
}

fn benchmark_tracker_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_update");

    for kind in [AssignmentKind::Greedy, AssignmentKind::Hungarian] {
        for n in [10, 50, 100] {
            let config = TrackerConfig::new(30).with_assigner(kind);
            let mut tracker = Tracker::new(config).expect("valid tracker");
            let frames: Vec<Vec<Centroid>> = (0..8).map(|f| create_test_centroids(n, f * 3)).collect();
            tracker.update(&frames[0]);

            let id = BenchmarkId::new(format!("{:?}", kind).to_lowercase(), n);
            group.bench_with_input(id, &frames, |b, frames| {
                let mut f = 0;
                b.iter(|| {
                    f = (f + 1) % frames.len();
                    black_box(tracker.update(black_box(&frames[f])).len());
                })
            });
        }
    }

    group.finish();
}

fn benchmark_tracker_churn(c: &mut Criterion) {
    // Half the objects vanish every other frame
    let full = create_test_centroids(100, 0);
    let half = create_test_centroids(50, 0);
    let mut tracker = Tracker::new(TrackerConfig::new(1)).expect("valid tracker");

    c.bench_function("tracker_churn_100_objects", |b| {
        let mut toggle = false;
        b.iter(|| {
            toggle = !toggle;
            let centroids = if toggle { &full } else { &half };
            black_box(tracker.update(black_box(centroids)).len());
        })
    });
}

fn benchmark_pipeline_process(c: &mut Criterion) {
    let mut pipeline = StreamPipeline::new(PipelineConfig::default()).expect("valid pipeline");
    let frames: Vec<Vec<Detection>> = (0..16).map(|f| create_test_detections(50, f * 5)).collect();

    c.bench_function("pipeline_process_50_objects", |b| {
        let mut f = 0;
        b.iter(|| {
            f = (f + 1) % frames.len();
            black_box(pipeline.process(1000, black_box(&frames[f])));
        })
    });
}

criterion_group!(
    benches,
    benchmark_tracker_update,
    benchmark_tracker_churn,
    benchmark_pipeline_process,
);

criterion_main!(benches);
