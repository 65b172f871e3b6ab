//! Solver configuration.

use crate::error::ConfigError;
use crate::reconstruction::{CharDecomposition, ReconstructionMode};
use crate::time::TimeIntegratorKind;

/// Configuration for the stage evaluator and the evolve driver.
///
/// The struct is read-only during a step. Build it with `Default` and the
/// `with_*` methods:
///
/// ```
/// use fv_rs::solver::SolverConfig;
/// use fv_rs::time::TimeIntegratorKind;
///
/// let config = SolverConfig::default()
///     .with_time_integrator(TimeIntegratorKind::Euler)
///     .with_cfl(0.8, 1.0)
///     .with_dt_initial(1e-3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Runge-Kutta scheme
    pub time_integrator: TimeIntegratorKind,
    /// Reconstruction scheme (`lim_type`)
    pub reconstruction: ReconstructionMode,
    /// How the reconstruction treats systems (`char_decomp`)
    pub char_decomposition: CharDecomposition,
    /// Expected number of wave families; `None` takes the Riemann solver's
    pub num_waves: Option<usize>,
    /// Ghost cells on each side of the grid
    pub num_ghost: usize,
    /// Stages at or above this CFL number are rejected
    pub cfl_max: f64,
    /// Target CFL number for variable time steps
    pub cfl_desired: f64,
    /// First time step of an evolve run
    pub dt_initial: f64,
    /// Upper bound on the time step
    pub dt_max: f64,
    /// Whether the evolve driver adapts dt to the measured CFL number
    pub dt_variable: bool,
    /// Step attempts allowed in one evolve run
    pub max_steps: usize,
    /// Whether a split source term is added in every stage
    pub source_term: bool,
    /// Aux component holding the capacity function
    pub capacity_index: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_integrator: TimeIntegratorKind::SspRk3,
            reconstruction: ReconstructionMode::Weno5,
            char_decomposition: CharDecomposition::None,
            num_waves: None,
            num_ghost: 3,
            cfl_max: 1.0,
            cfl_desired: 0.9,
            dt_initial: 0.1,
            dt_max: f64::INFINITY,
            dt_variable: true,
            max_steps: 10_000,
            source_term: false,
            capacity_index: None,
        }
    }
}

impl SolverConfig {
    /// Set the time integrator.
    pub fn with_time_integrator(mut self, kind: TimeIntegratorKind) -> Self {
        self.time_integrator = kind;
        self
    }

    /// Set the reconstruction mode.
    pub fn with_reconstruction(mut self, mode: ReconstructionMode) -> Self {
        self.reconstruction = mode;
        self
    }

    /// Set the characteristic decomposition.
    pub fn with_char_decomposition(mut self, decomposition: CharDecomposition) -> Self {
        self.char_decomposition = decomposition;
        self
    }

    /// Set the expected number of wave families.
    pub fn with_num_waves(mut self, num_waves: usize) -> Self {
        self.num_waves = Some(num_waves);
        self
    }

    /// Set the number of ghost cells per side.
    pub fn with_num_ghost(mut self, num_ghost: usize) -> Self {
        self.num_ghost = num_ghost;
        self
    }

    /// Set the desired and maximum CFL numbers.
    pub fn with_cfl(mut self, cfl_desired: f64, cfl_max: f64) -> Self {
        self.cfl_desired = cfl_desired;
        self.cfl_max = cfl_max;
        self
    }

    /// Set the initial time step.
    pub fn with_dt_initial(mut self, dt: f64) -> Self {
        self.dt_initial = dt;
        self
    }

    /// Set the maximum time step.
    pub fn with_dt_max(mut self, dt_max: f64) -> Self {
        self.dt_max = dt_max;
        self
    }

    /// Use a fixed time step (CFL violations become errors).
    pub fn with_fixed_dt(mut self, dt: f64) -> Self {
        self.dt_initial = dt;
        self.dt_variable = false;
        self
    }

    /// Set the maximum number of step attempts.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the aux component holding the capacity function.
    pub fn with_capacity_index(mut self, index: usize) -> Self {
        self.capacity_index = Some(index);
        self
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = self.reconstruction.required_ghost_cells();
        if self.num_ghost < required {
            return Err(ConfigError::TooFewGhostCells {
                scheme: self.reconstruction.name(),
                required,
                actual: self.num_ghost,
            });
        }

        let cfl_ok = self.cfl_desired > 0.0
            && self.cfl_desired.is_finite()
            && self.cfl_max.is_finite()
            && self.cfl_desired < self.cfl_max;
        if !cfl_ok {
            return Err(ConfigError::InvalidCfl {
                desired: self.cfl_desired,
                max: self.cfl_max,
            });
        }

        if self.dt_initial <= 0.0 || !self.dt_initial.is_finite() {
            return Err(ConfigError::InvalidTimeStep(self.dt_initial));
        }
        if self.dt_max.is_nan() || self.dt_max <= 0.0 {
            return Err(ConfigError::InvalidTimeStep(self.dt_max));
        }

        Ok(())
    }
}
