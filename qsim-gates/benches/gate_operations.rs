use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsim_gates::{matrices, standard};
use std::f64::consts::PI;

fn benchmark_rotation_matrices(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation_matrices");

    let angles = vec![0.01, 0.1, PI / 4.0, PI / 2.0, PI];

    for angle in angles {
        group.bench_with_input(
            BenchmarkId::new("RX", format!("{:.4}", angle)),
            &angle,
            |b, &angle| {
                b.iter(|| black_box(matrices::rotation_x(angle)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("RZ", format!("{:.4}", angle)),
            &angle,
            |b, &angle| {
                b.iter(|| black_box(matrices::rotation_z(angle)));
            },
        );
    }

    group.finish();
}

fn benchmark_full_system_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_system_operators");

    for num_qubits in [2usize, 4, 6, 8] {
        group.bench_with_input(
            BenchmarkId::new("hadamard", num_qubits),
            &num_qubits,
            |b, &n| {
                b.iter(|| black_box(standard::hadamard(n / 2, n)));
            },
        );

        group.bench_with_input(BenchmarkId::new("cnot", num_qubits), &num_qubits, |b, &n| {
            b.iter(|| black_box(standard::cnot(0, n - 1, n)));
        });

        group.bench_with_input(BenchmarkId::new("swap", num_qubits), &num_qubits, |b, &n| {
            b.iter(|| black_box(standard::swap(0, n - 1, n)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rotation_matrices, benchmark_full_system_operators);
criterion_main!(benches);
