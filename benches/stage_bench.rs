//! Benchmarks for the stage evaluator and full time steps.
//!
//! Run with: `cargo bench --bench stage_bench`
//!
//! Benchmarks WENO5 reconstruction, the homogeneous increment and SSP33
//! steps for scalar and shallow water problems.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fv_rs::boundary::FieldProvider;
use fv_rs::reconstruction::{weno5, weno5_wave};
use fv_rs::solver::homogeneous_increment;
use fv_rs::{
    Advection, CharDecomposition, Field, FvSolver1D, GhostCells, Grid1D, ShallowWaterRoe,
    Solution, SolverConfig,
};

const NUM_GHOST: usize = 3;

/// Smooth shallow water state, ghost-filled.
fn setup_swe(n: usize) -> Field {
    let q = Field::from_fn(n, 2, |i, s| {
        let x = (i as f64 + 0.5) / n as f64;
        s[0] = 1.0 + 0.2 * (-50.0 * (x - 0.5).powi(2)).exp();
        s[1] = 0.1 * s[0];
    });
    GhostCells::extrapolate()
        .ghost_filled(&q, 0, NUM_GHOST)
        .unwrap_or(q)
}

/// Benchmark WENO5 reconstruction.
fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("weno5");
    let rp = ShallowWaterRoe::new(9.81);

    for n in [100, 1000, 10000] {
        let q = setup_swe(n);

        group.bench_with_input(BenchmarkId::new("componentwise", n), &n, |b, _| {
            b.iter(|| weno5(black_box(&q)));
        });

        group.bench_with_input(BenchmarkId::new("wave_based", n), &n, |b, _| {
            b.iter(|| weno5_wave(black_box(&q), None, &rp));
        });
    }

    group.finish();
}

/// Benchmark the homogeneous increment (reconstruction + two sweeps).
fn bench_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("homogeneous_increment");
    let rp = ShallowWaterRoe::new(9.81);

    for decomposition in [CharDecomposition::None, CharDecomposition::WaveBased] {
        let config = SolverConfig::default().with_char_decomposition(decomposition);
        for n in [100, 1000, 10000] {
            let q = setup_swe(n);
            let dx = 1.0 / n as f64;

            group.bench_with_input(
                BenchmarkId::new(decomposition.name(), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        homogeneous_increment(
                            black_box(&q),
                            None,
                            black_box(dx),
                            black_box(0.1 * dx),
                            &config,
                            &rp,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark single SSP33 steps on periodic advection.
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("ssp33_step");
    group.sample_size(30);

    for n in [100, 1000] {
        let Ok(grid) = Grid1D::uniform(0.0, 1.0, n) else {
            continue;
        };
        let mut sol = Solution::new(grid, 1);
        sol.set_from_function(|x, q| q[0] = (2.0 * std::f64::consts::PI * x).sin());
        let dt = 0.5 * sol.grid.dx();
        let Ok(solver) = FvSolver1D::new(
            SolverConfig::default(),
            Advection::new(1.0),
            GhostCells::periodic(),
        ) else {
            continue;
        };
        let backup = sol.clone();

        group.bench_with_input(BenchmarkId::new("advection", n), &n, |b, _| {
            b.iter(|| {
                sol = backup.clone();
                solver.step(black_box(&mut sol), black_box(dt))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconstruction, bench_increment, bench_step);
criterion_main!(benches);
