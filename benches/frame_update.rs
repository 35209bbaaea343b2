//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use conifer::foliage::FoliageField;
use conifer::prelude::*;
use conifer::{FrameContext, OrnamentField};

fn bench_foliage_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("foliage_update");

    for count in [1_000, 12_000, 50_000] {
        let config = SceneConfig::default().with_foliage_count(count);
        let mut field = FoliageField::new(&config, 1);
        let mut t = 0.0;

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                t += 1.0 / 60.0;
                field.update(&FrameContext::new(t, 1.0 / 60.0, TransitionMode::TreeShape, 2.0));
                black_box(field.vertices());
            })
        });
    }

    group.finish();
}

fn bench_ornament_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("ornament_update");
    let config = SceneConfig::default();

    for population in [
        PopulationConfig::baubles(),
        PopulationConfig::gifts(),
        PopulationConfig::lights(),
    ] {
        let mut field = OrnamentField::new(&population, &config, 2);
        let mut t = 0.0;

        group.bench_function(population.name.as_str(), |b| {
            b.iter(|| {
                t += 1.0 / 60.0;
                field.update(&FrameContext::new(t, 1.0 / 60.0, TransitionMode::Scattered, 1.0));
                black_box(field.transforms());
            })
        });
    }

    group.finish();
}

fn bench_scene_frame(c: &mut Criterion) {
    let mut scene = Scene::new(SceneConfig::default().with_seed(3), TransitionState::new())
        .expect("default config is valid");
    let mut time = Time::fixed(1.0 / 60.0);
    let mut surface = RecordingSurface::new();

    c.bench_function("scene_frame_default", |b| {
        b.iter(|| {
            time.update();
            black_box(scene.frame(&time, 1.0, &mut surface));
        })
    });
}

criterion_group!(
    benches,
    bench_foliage_update,
    bench_ornament_update,
    bench_scene_frame
);
criterion_main!(benches);
