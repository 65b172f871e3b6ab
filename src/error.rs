//! Error types for the finite-volume solver.
//!
//! Three layers, from the outside in:
//! - [`ConfigError`]: caller misconfiguration, fatal and never retried
//! - [`RiemannError`]: failure of a Riemann solve at one interface
//! - [`SolverError`]: everything that can abort a stage or a step
//!
//! A CFL rejection is not an error. It is reported through
//! [`StageOutcome::Rejected`](crate::time::StageOutcome) and
//! [`StepOutcome::Rejected`](crate::time::StepOutcome).

use thiserror::Error;

/// Invalid solver configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Time integrator name or code not recognized.
    #[error("unrecognized time integrator: {0}")]
    UnknownIntegrator(String),

    /// Reconstruction (limiter type) name or code not recognized.
    #[error("unrecognized reconstruction mode: {0}")]
    UnknownReconstruction(String),

    /// Characteristic decomposition name or code not recognized.
    #[error("unrecognized characteristic decomposition: {0}")]
    UnknownCharDecomposition(String),

    /// Boundary condition name or code not recognized.
    #[error("unrecognized boundary condition: {0}")]
    UnknownBoundary(String),

    /// Only dimension 0 exists on a 1D grid.
    #[error("invalid dimension index {0}: only one-dimensional grids are supported")]
    InvalidDimension(usize),

    /// Stencil needs more ghost cells than configured.
    #[error("{scheme} needs at least {required} ghost cells per side, got {actual}")]
    TooFewGhostCells {
        scheme: &'static str,
        required: usize,
        actual: usize,
    },

    /// Configured wave count disagrees with the Riemann solver.
    #[error("configured {configured} waves but the Riemann solver produces {solver}")]
    WaveCountMismatch { configured: usize, solver: usize },

    /// Capacity index points past the auxiliary components.
    #[error("capacity index {index} out of range for {n_aux} aux components")]
    CapacityOutOfRange { index: usize, n_aux: usize },

    /// Capacity must be positive and finite in every cell.
    #[error("invalid capacity {value} in cell {cell}")]
    InvalidCapacity { cell: usize, value: f64 },

    /// Capacity configured but no auxiliary field supplied.
    #[error("capacity index {0} configured but the solution has no aux field")]
    MissingAux(usize),

    /// Source term flag set without a source term.
    #[error("source term enabled but no source term was supplied")]
    MissingSource,

    /// Grid spacing must be positive and finite.
    #[error("invalid grid spacing: {0}")]
    InvalidSpacing(f64),

    /// CFL limits must satisfy 0 < cfl_desired < cfl_max.
    #[error("invalid CFL limits: desired {desired}, max {max}")]
    InvalidCfl { desired: f64, max: f64 },

    /// Time step limits must be positive.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// Periodic boundaries must be periodic on both sides.
    #[error("periodic boundary on one side only")]
    PeriodicMismatch,
}

/// Failure of a Riemann solve at a single interface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiemannError {
    /// Negative water depth in a shallow water state.
    #[error("negative depth: {0}")]
    NegativeDepth(f64),

    /// NaN or infinite input state.
    #[error("non-finite state")]
    NonFinite,
}

/// Errors that abort a stage, a step or an evolve run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Mode that has no numerical definition yet.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// Riemann solve failed.
    #[error("Riemann solve failed at interface {interface}: {source}")]
    Riemann {
        interface: usize,
        #[source]
        source: RiemannError,
    },

    /// Source term evaluation failed.
    #[error("source term failed: {0}")]
    Source(String),

    /// Array shapes do not agree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Local array too small for the stencil.
    #[error("grid too small: {cells} cells with {num_ghost} ghost cells per side")]
    GridTooSmall { cells: usize, num_ghost: usize },

    /// A fixed time step violated the CFL limit.
    #[error("CFL number {cfl} exceeds maximum {cfl_max} with a fixed time step")]
    CflViolation { cfl: f64, cfl_max: f64 },

    /// The evolve loop ran out of steps.
    #[error("maximum number of steps ({max_steps}) reached at t = {t}")]
    MaxStepsExceeded { max_steps: usize, t: f64 },
}

impl SolverError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: SolverError = ConfigError::InvalidDimension(2).into();
        assert_eq!(err, SolverError::Config(ConfigError::InvalidDimension(2)));
        assert!(err.to_string().contains("dimension index 2"));
    }

    #[test]
    fn test_riemann_error_message() {
        let err = SolverError::Riemann {
            interface: 7,
            source: RiemannError::NegativeDepth(-0.5),
        };
        let msg = err.to_string();
        assert!(msg.contains("interface 7"));
        assert!(msg.contains("-0.5"));
    }
}
