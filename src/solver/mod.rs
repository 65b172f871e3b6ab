//! Finite-volume solver components.
//!
//! # Submodules
//!
//! - [`core`]: Field and solution containers
//! - [`config`]: Solver configuration
//! - [`assembler`]: Homogeneous increment and CFL number of one stage
//! - [`stage`]: Stage evaluator and step dispatcher ([`FvSolver1D`])
//! - [`diagnostics`]: Conservation diagnostics

pub mod assembler;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod stage;

pub use assembler::{StageIncrement, cfl_number, dtdx, homogeneous_increment};
pub use config::SolverConfig;
pub use core::{Field, Solution};
pub use diagnostics::{ConservationDiagnostics, ConservationTracker, max_wave_speed};
pub use stage::{FvSolver1D, StageContext};
