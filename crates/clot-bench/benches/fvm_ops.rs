//! Micro-benchmarks for the finite-volume kernels behind the adhesion
//! half-step.

use clot_core::Dimensions;
use clot_mesh::fvm::{laplacian, solve_diffusion};
use clot_mesh::{Grid2D, ScalarField, SolverSettings, Stencil};
use clot_test_utils::DX;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn ramp(mesh: &Grid2D) -> ScalarField {
    let mut f = ScalarField::zero_gradient(mesh, "eta", Dimensions::DIMLESS, 0.0);
    let n = f.len();
    for (i, v) in f.values_mut().iter_mut().enumerate() {
        *v = i as f64 / n as f64;
    }
    f
}

fn bench_laplacian_10k(c: &mut Criterion) {
    let mesh = Grid2D::new(100, 100, DX).unwrap();
    let mut field = ramp(&mesh);
    field.correct_boundary_conditions(&mesh);
    let gamma = DX * DX;

    c.bench_function("laplacian_10k", |b| {
        b.iter(|| black_box(laplacian(&mesh, &field, gamma)));
    });
}

fn bench_solve_diffusion_10k(c: &mut Criterion) {
    let mesh = Grid2D::new(100, 100, DX).unwrap();
    let stencil = Stencil::new(&mesh);
    let source = ramp(&mesh);
    let gamma = DX * DX;

    c.bench_function("solve_diffusion_10k", |b| {
        b.iter(|| {
            let mut field = source.clone();
            let perf = solve_diffusion(&stencil, &mut field, gamma, 0.1, SolverSettings::default());
            black_box(perf.iterations);
        });
    });
}

criterion_group!(benches, bench_laplacian_10k, bench_solve_diffusion_10k);
criterion_main!(benches);
