//! # fv-rs
//!
//! High-resolution finite-volume time stepping for one-dimensional
//! hyperbolic conservation laws `kappa(x) q_t + f(q)_x = psi(q)`.
//!
//! This crate provides:
//! - WENO5 interface reconstruction (component-wise and wave-based)
//! - Riemann solvers in wave-propagation form (advection, Burgers,
//!   acoustics, shallow water)
//! - The stage evaluator: fluctuation assembly and CFL number
//! - Forward Euler and SSP33 time stepping with step rejection
//! - A variable time-step driver
//! - Ghost-cell filling and split source terms

pub mod boundary;
pub mod error;
pub mod mesh;
pub mod reconstruction;
pub mod riemann;
pub mod simulation;
pub mod solver;
pub mod source;
pub mod time;

// Re-export main types for convenience
pub use boundary::{BoundaryKind, FieldProvider, GhostCells};
pub use error::{ConfigError, RiemannError, SolverError};
pub use mesh::Grid1D;
pub use reconstruction::{CharDecomposition, InterfaceStates, ReconstructionMode, reconstruct};
pub use riemann::{
    Acoustics, Advection, Burgers, InterfaceFan, RiemannSolver, ShallowWaterRoe, WaveFan,
};
pub use simulation::EvolveSummary;
pub use solver::{
    ConservationDiagnostics, ConservationTracker, Field, FvSolver1D, Solution, SolverConfig,
    StageContext,
};
pub use source::{CombinedSource, Relaxation, SourceTerm};
pub use time::{Rejection, StageOutcome, StepOutcome, TimeIntegratorKind};
