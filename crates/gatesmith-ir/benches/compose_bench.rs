//! Benchmarks for unitary composition
//!
//! Run with: cargo bench -p gatesmith-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gatesmith_ir::{Circuit, GateCatalog, Unitary, UnitaryComposer, distance};

/// A layered circuit cycling through the hardware-native catalog.
fn layered_circuit(num_qubits: u32, layers: usize) -> Circuit {
    let catalog = GateCatalog::hardware_native();
    let mut circuit = Circuit::new(num_qubits);
    let mut gates = catalog.iter().cycle();
    for _ in 0..layers {
        for q in 0..num_qubits {
            let gate = gates.next().unwrap().clone();
            let offset = if q + gate.num_qubits() > num_qubits { 0 } else { q };
            circuit.append(gate, offset).unwrap();
        }
    }
    circuit
}

/// Compose with a warm cache (the steady state during search)
fn bench_compose_warm(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_warm");

    for num_qubits in &[2u32, 3, 4, 5] {
        let circuit = layered_circuit(*num_qubits, 4);
        let composer = UnitaryComposer::new();
        composer.compose(&circuit).unwrap();

        group.bench_with_input(
            BenchmarkId::new("layers_4", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(composer.compose(black_box(circuit)).unwrap()));
            },
        );
    }

    group.finish();
}

/// Compose with a fresh cache every iteration
fn bench_compose_cold(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_cold");

    for num_qubits in &[2u32, 3, 4] {
        let circuit = layered_circuit(*num_qubits, 4);
        group.bench_with_input(
            BenchmarkId::new("layers_4", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    let composer = UnitaryComposer::new();
                    black_box(composer.compose(black_box(circuit)).unwrap())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the distance metric
fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance");

    for num_qubits in &[2u32, 4, 6] {
        let composer = UnitaryComposer::new();
        let u = composer.compose(&layered_circuit(*num_qubits, 2)).unwrap();
        let id = Unitary::identity(*num_qubits);
        group.bench_with_input(BenchmarkId::new("trace", num_qubits), &u, |b, u| {
            b.iter(|| black_box(distance(black_box(u), black_box(&id))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compose_warm,
    bench_compose_cold,
    bench_distance,
);

criterion_main!(benches);
