//! Benchmarks for the synthesis pipeline
//!
//! Run with: cargo bench -p htstab-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use htstab_synth::{
    Connectivity, Stabilizer, Synthesizer, classify, find_local_clifford_layer, random_stabilizer,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn samples(n: usize, count: usize) -> Vec<Stabilizer> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..count)
        .map(|_| random_stabilizer(n, &mut rng).unwrap())
        .collect()
}

/// Benchmark classification
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for n in 2..=6usize {
        let states = samples(n, 32);
        group.bench_with_input(BenchmarkId::from_parameter(n), &states, |b, states| {
            b.iter(|| {
                for st in states {
                    black_box(classify(st).unwrap());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark the local Clifford solver against the class representative
fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_clifford");

    for n in 2..=6usize {
        let cases: Vec<_> = samples(n, 32)
            .into_iter()
            .map(|st| {
                let graph = classify(&st).unwrap().representative_graph();
                (st, graph)
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &cases, |b, cases| {
            b.iter(|| {
                for (st, graph) in cases {
                    black_box(find_local_clifford_layer(st.r(), st.s(), graph));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark full preparation circuit synthesis (tables cached)
fn bench_preparation(c: &mut Criterion) {
    let mut group = c.benchmark_group("preparation");
    let synth = Synthesizer::bundled();

    for n in 2..=6usize {
        let states = samples(n, 32);
        // warm the cache
        synth.preparation_circuit(&states[0], Connectivity::All).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &states, |b, states| {
            b.iter(|| {
                for st in states {
                    black_box(synth.preparation_circuit(st, Connectivity::All).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_solver, bench_preparation);

criterion_main!(benches);
