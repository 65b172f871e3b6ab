//! Runtime diagnostics.
//!
//! - [`ConservationDiagnostics`]: conserved totals of a solution
//! - [`ConservationTracker`]: drift and CFL history over a run
//! - [`max_wave_speed`]: fastest wave between adjacent cells

mod conservation;

pub use conservation::{ConservationDiagnostics, ConservationTracker, max_wave_speed};
