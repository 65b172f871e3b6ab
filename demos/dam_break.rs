//! 1D shallow water dam break between two walls.
//!
//! Solves h_t + (hu)_x = 0, (hu)_t + (hu^2 + g h^2 / 2)_x = 0 on [0, 1] with:
//! - Initial condition: h = 2 for x < 0.5, h = 1 otherwise, at rest
//! - Wall boundaries on both sides
//! - WENO5 wave-based reconstruction with SSP33 time stepping
//!
//! Run with: `cargo run --example dam_break`
//!
//! Raise the log level to `Debug` to see every accepted step.

use fv_rs::solver::max_wave_speed;
use fv_rs::{
    CharDecomposition, ConservationDiagnostics, ConservationTracker, FvSolver1D, GhostCells,
    Grid1D, ShallowWaterRoe, Solution, SolverConfig,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    // Parameters
    let g = 9.81;
    let n_cells = 200;
    let t_final = 0.1;
    let output_interval: f64 = 0.02;

    println!("1D Shallow Water Dam Break");
    println!("==========================");
    println!("Cells: {}", n_cells);
    println!("Final time: {}", t_final);
    println!();

    let grid = Grid1D::uniform(0.0, 1.0, n_cells)?;
    let mut sol = Solution::new(grid, 2);
    sol.set_from_function(|x, q| {
        q[0] = if x < 0.5 { 2.0 } else { 1.0 };
        q[1] = 0.0;
    });

    let rp = ShallowWaterRoe::new(g);
    let speed = max_wave_speed(&rp, &sol.q, None)?;
    let config = SolverConfig::default()
        .with_char_decomposition(CharDecomposition::WaveBased)
        .with_cfl(0.9, 1.0)
        .with_dt_initial(0.5 * sol.grid.dx() / speed);
    let solver = FvSolver1D::new(config, rp, GhostCells::walls(1))?;

    let mut tracker = ConservationTracker::new(ConservationDiagnostics::compute(&sol, None)?);

    // Evolve in output intervals
    let mut t_out = output_interval;
    while sol.t < t_final {
        let t_next = t_out.min(t_final);
        let summary = solver.evolve_to_time(&mut sol, t_next)?;
        let diag = ConservationDiagnostics::compute(&sol, None)?;
        println!(
            "t = {:.3}: {} steps, {}",
            sol.t,
            summary.n_steps,
            diag.summary_line()
        );
        tracker.update(sol.t, diag, summary.cfl_max);
        t_out += output_interval;
    }

    println!();
    println!("Mass drift: {:.2e}", tracker.drift(0));
    println!("Max CFL: {:.3}", tracker.max_cfl_seen());
    println!();

    // Depth profile
    println!("{:>8}  {:>8}  {:>8}", "x", "h", "u");
    for i in (0..n_cells).step_by(10) {
        let q = sol.q.cell(i);
        println!(
            "{:8.3}  {:8.4}  {:8.4}",
            sol.grid.center(i),
            q[0],
            q[1] / q[0]
        );
    }

    Ok(())
}
