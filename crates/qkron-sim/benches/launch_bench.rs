//! Benchmarks for unitary construction and circuit execution
//!
//! Run with: cargo bench -p qkron-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qkron_ir::{Operation, QubitId};
use qkron_sim::{Circuit, OperationUnitary, SimulatorConfig};

/// Benchmark building the full-register unitary of one operation
fn bench_operation_unitary(c: &mut Criterion) {
    let mut group = c.benchmark_group("operation_unitary");

    for n in [2_usize, 4, 6, 8] {
        let adjacent = Operation::from_parts("X", QubitId(1), [QubitId(0)], None).unwrap();
        group.bench_with_input(BenchmarkId::new("adjacent_cx", n), &n, |b, &n| {
            b.iter(|| OperationUnitary::for_operation(black_box(&adjacent), n).unwrap());
        });

        let distant =
            Operation::from_parts("X", QubitId(0), [QubitId(n as u32 - 1)], None).unwrap();
        group.bench_with_input(BenchmarkId::new("distant_cx", n), &n, |b, &n| {
            b.iter(|| OperationUnitary::for_operation(black_box(&distant), n).unwrap());
        });
    }

    group.finish();
}

/// Benchmark launching a GHZ circuit
fn bench_launch(c: &mut Criterion) {
    let mut group = c.benchmark_group("launch");
    group.sample_size(20);

    for n in [2_u32, 4, 6, 8] {
        group.bench_with_input(BenchmarkId::new("ghz", n), &n, |b, &n| {
            b.iter(|| {
                let mut circuit = Circuit::new(n as usize).unwrap();
                circuit.h(QubitId(0)).unwrap();
                for q in 1..n {
                    circuit.cx(QubitId(0), QubitId(q)).unwrap();
                }
                circuit.launch().unwrap();
                black_box(circuit.amplitudes())
            });
        });
    }

    group.finish();
}

/// Benchmark sampling a measurement
fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    for shots in [100_u32, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("plus_state", shots), &shots, |b, &shots| {
            b.iter(|| {
                let mut circuit =
                    Circuit::with_config(1, SimulatorConfig::new().with_seed(1)).unwrap();
                circuit.h(QubitId(0)).unwrap();
                circuit.launch().unwrap();
                circuit.measure(QubitId(0), black_box(shots), true).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_operation_unitary, bench_launch, bench_measure);
criterion_main!(benches);
