mod common;

use std::hint::black_box;

use biome_terrain::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

const SIZES: [usize; 3] = [64, 128, 256];

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for size in SIZES {
        let config = GeneratorConfig::new(12345)
            .with_size(size, size)
            .with_alphamap_resolution(size);
        let generator = match WorldGenerator::try_new(config, common::island_catalog()) {
            Ok(generator) => generator,
            Err(err) => panic!("invalid bench setup: {err}"),
        };

        group.throughput(common::elements_throughput(size * size));
        group.bench_with_input(BenchmarkId::new("generate", size), &size, |b, _| {
            b.iter_batched(
                || HeightfieldTerrain::for_config(generator.config()),
                |mut terrain| {
                    let world = generator.generate(&mut terrain);
                    black_box(world.map(|w| w.stats));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = bench_pipeline
}
criterion_main!(benches);
