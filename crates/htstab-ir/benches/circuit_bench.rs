//! Benchmarks for htstab circuit operations
//!
//! Run with: cargo bench -p htstab-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use htstab_ir::{Circuit, QubitId};

/// A layered brickwork circuit on `n` qubits.
fn brickwork(n: u32, layers: u32) -> Circuit {
    let mut circuit = Circuit::new(n);
    for layer in 0..layers {
        for i in 0..n {
            circuit.h(QubitId(i)).unwrap();
            circuit.s(QubitId(i)).unwrap();
        }
        for i in ((layer % 2)..n.saturating_sub(1)).step_by(2) {
            circuit.cz(QubitId(i), QubitId(i + 1)).unwrap();
        }
        if n > 2 {
            circuit.swap(QubitId(0), QubitId(n - 1)).unwrap();
        }
    }
    circuit
}

/// Benchmark gate-spec parsing and emission
fn bench_gate_spec(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_spec");

    for num_qubits in &[3u32, 6] {
        let spec = brickwork(*num_qubits, 8).to_gate_spec();
        group.bench_with_input(BenchmarkId::new("parse", num_qubits), &spec, |b, spec| {
            b.iter(|| Circuit::parse(black_box(*num_qubits), black_box(spec)).unwrap());
        });

        let circuit = brickwork(*num_qubits, 8);
        group.bench_with_input(BenchmarkId::new("emit", num_qubits), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.to_gate_spec()));
        });
    }

    group.finish();
}

/// Benchmark circuit combinators
fn bench_combinators(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinators");

    let circuit = brickwork(6, 8);
    group.bench_function("inverse", |b| {
        b.iter(|| black_box(circuit.inverse()));
    });
    group.bench_function("compose", |b| {
        let inverse = circuit.inverse();
        b.iter(|| black_box(circuit.compose(&inverse).unwrap()));
    });

    group.finish();
}

/// Benchmark two-qubit count and depth calculation
fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");

    for num_qubits in &[3u32, 6] {
        let circuit = brickwork(*num_qubits, 8);
        group.bench_with_input(
            BenchmarkId::new("two_qubit_depth", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.metrics()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_gate_spec, bench_combinators, bench_metrics);

criterion_main!(benches);
