//! Simulation driver.
//!
//! Adds [`FvSolver1D::evolve_to_time`](crate::solver::FvSolver1D::evolve_to_time)
//! on top of the single-step solver: variable time steps, retry after a
//! refused step and a run summary.
//!
//! # Example
//! ```
//! use fv_rs::boundary::GhostCells;
//! use fv_rs::mesh::Grid1D;
//! use fv_rs::riemann::Advection;
//! use fv_rs::solver::{FvSolver1D, Solution, SolverConfig};
//!
//! let grid = Grid1D::uniform(0.0, 1.0, 50).unwrap();
//! let mut sol = Solution::new(grid, 1);
//! sol.set_from_function(|x, q| q[0] = (-100.0 * (x - 0.5).powi(2)).exp());
//!
//! let solver = FvSolver1D::new(
//!     SolverConfig::default().with_dt_initial(0.01),
//!     Advection::new(1.0),
//!     GhostCells::periodic(),
//! )
//! .unwrap();
//!
//! let summary = solver.evolve_to_time(&mut sol, 0.25).unwrap();
//! assert_eq!(sol.t, 0.25);
//! assert!(summary.n_steps > 0);
//! ```

mod runner;

pub use runner::EvolveSummary;
