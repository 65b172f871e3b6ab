//! Trait-based time integrator abstraction.
//!
//! Integrators combine stage increments produced by a stage closure. Each
//! increment is already multiplied by dt (it is `dq`, not `dq/dt`), and a
//! stage may refuse to produce one when the CFL limit is exceeded. A refused
//! stage aborts the step and leaves the state untouched.
//!
//! # Example
//! ```
//! use fv_rs::time::{SspRk3, StageOutcome, StepOutcome, TimeIntegrator};
//!
//! let mut q = vec![1.0; 10];
//! let outcome = SspRk3
//!     .step(&mut q, 0.1, 0.0, |state: &Vec<f64>, _t| {
//!         let increment = vec![0.1; state.len()];
//!         Ok::<_, ()>(StageOutcome::Accepted { increment, cfl: 0.5 })
//!     })
//!     .unwrap();
//!
//! assert!(outcome.is_accepted());
//! assert!(q.iter().all(|v| (v - 1.1).abs() < 1e-12));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::solver::Field;

use super::outcome::{StageOutcome, StepOutcome};

// =============================================================================
// Integrable Trait
// =============================================================================

/// Trait for state types that can be time-integrated.
///
/// This provides the vector space operations needed by explicit time integrators:
/// - `scale`: Multiply by scalar (x <- c * x)
/// - `axpy`: Add scaled vector (x <- x + c * y)
pub trait Integrable: Clone + Send + Sized {
    /// Scale the state by a constant: self <- c * self
    fn scale(&mut self, c: f64);

    /// Add a scaled vector: self <- self + c * other
    fn axpy(&mut self, c: f64, other: &Self);

    /// Create a zero-initialized state with the same shape.
    fn zeros_like(&self) -> Self {
        let mut result = self.clone();
        result.scale(0.0);
        result
    }
}

impl Integrable for Field {
    fn scale(&mut self, c: f64) {
        self.scale(c);
    }

    fn axpy(&mut self, c: f64, other: &Self) {
        self.axpy(c, other);
    }
}

impl Integrable for Vec<f64> {
    fn scale(&mut self, c: f64) {
        for v in self.iter_mut() {
            *v *= c;
        }
    }

    fn axpy(&mut self, c: f64, other: &Self) {
        assert_eq!(self.len(), other.len());
        for (a, b) in self.iter_mut().zip(other) {
            *a += c * b;
        }
    }
}

// =============================================================================
// IntegratorInfo Trait (non-generic, dyn-compatible)
// =============================================================================

/// Non-generic information about a time integrator.
pub trait IntegratorInfo: Send + Sync {
    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Order of accuracy of the integrator.
    fn order(&self) -> usize;

    /// Number of stages in the integrator.
    fn n_stages(&self) -> usize;

    /// Whether the integrator is strong stability preserving (SSP).
    fn is_ssp(&self) -> bool;

    /// Times at which stages are evaluated relative to the current time.
    ///
    /// For SSP-RK3: [0, dt, dt/2]
    fn stage_times(&self, dt: f64) -> Vec<f64>;
}

// =============================================================================
// TimeIntegrator Trait
// =============================================================================

/// Trait for explicit time integrators with stage rejection.
pub trait TimeIntegrator<S: Integrable>: IntegratorInfo {
    /// Advance the state by one time step.
    ///
    /// # Arguments
    /// * `state` - State to advance (modified only if every stage is accepted)
    /// * `dt` - Time step size
    /// * `t` - Current time
    /// * `stage` - `stage(state, time)` returns the increment dq for that stage
    ///
    /// # Returns
    /// `StepOutcome::Accepted` with the largest stage CFL number, or the
    /// first stage rejection. Errors from `stage` are passed through.
    fn step<F, E>(&self, state: &mut S, dt: f64, t: f64, stage: F) -> Result<StepOutcome, E>
    where
        F: FnMut(&S, f64) -> Result<StageOutcome<S>, E>;
}

// =============================================================================
// SSP-RK3 Implementation
// =============================================================================

/// Strong Stability Preserving Runge-Kutta 3rd order integrator (SSP33).
///
/// Stages, with dq(q, t) the dt-scaled increment:
/// ```text
/// q1    = q + dq(q, t)
/// q2    = 3/4 q + 1/4 (q1 + dq(q1, t + dt))
/// q_new = 1/3 q + 2/3 (q2 + dq(q2, t + dt/2))
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SspRk3;

impl IntegratorInfo for SspRk3 {
    fn name(&self) -> &'static str {
        "SSP33"
    }

    fn order(&self) -> usize {
        3
    }

    fn n_stages(&self) -> usize {
        3
    }

    fn is_ssp(&self) -> bool {
        true
    }

    fn stage_times(&self, dt: f64) -> Vec<f64> {
        vec![0.0, dt, 0.5 * dt]
    }
}

impl<S: Integrable> TimeIntegrator<S> for SspRk3 {
    fn step<F, E>(&self, state: &mut S, dt: f64, t: f64, mut stage: F) -> Result<StepOutcome, E>
    where
        F: FnMut(&S, f64) -> Result<StageOutcome<S>, E>,
    {
        // Stage 1: q1 = q + dq(q, t)
        let (dq, cfl_1) = match stage(state, t)? {
            StageOutcome::Accepted { increment, cfl } => (increment, cfl),
            StageOutcome::Rejected(rejection) => return Ok(StepOutcome::Rejected(rejection)),
        };
        let mut q1 = state.clone();
        q1.axpy(1.0, &dq);

        // Stage 2: q2 = 3/4 q + 1/4 (q1 + dq(q1, t + dt))
        let (dq, cfl_2) = match stage(&q1, t + dt)? {
            StageOutcome::Accepted { increment, cfl } => (increment, cfl),
            StageOutcome::Rejected(rejection) => return Ok(StepOutcome::Rejected(rejection)),
        };
        let mut q2 = state.clone();
        q2.scale(0.75);
        q2.axpy(0.25, &q1);
        q2.axpy(0.25, &dq);

        // Stage 3: q_new = 1/3 q + 2/3 (q2 + dq(q2, t + dt/2))
        let (dq, cfl_3) = match stage(&q2, t + 0.5 * dt)? {
            StageOutcome::Accepted { increment, cfl } => (increment, cfl),
            StageOutcome::Rejected(rejection) => return Ok(StepOutcome::Rejected(rejection)),
        };
        let mut q_new = state.clone();
        q_new.scale(1.0 / 3.0);
        q_new.axpy(2.0 / 3.0, &q2);
        q_new.axpy(2.0 / 3.0, &dq);

        *state = q_new;
        Ok(StepOutcome::Accepted {
            cfl: cfl_1.max(cfl_2).max(cfl_3),
        })
    }
}

// =============================================================================
// Forward Euler
// =============================================================================

/// Forward Euler integrator (1st order).
///
/// ```text
/// q_new = q + dq(q, t)
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl IntegratorInfo for ForwardEuler {
    fn name(&self) -> &'static str {
        "Euler"
    }

    fn order(&self) -> usize {
        1
    }

    fn n_stages(&self) -> usize {
        1
    }

    fn is_ssp(&self) -> bool {
        true
    }

    fn stage_times(&self, _dt: f64) -> Vec<f64> {
        vec![0.0]
    }
}

impl<S: Integrable> TimeIntegrator<S> for ForwardEuler {
    fn step<F, E>(&self, state: &mut S, _dt: f64, t: f64, mut stage: F) -> Result<StepOutcome, E>
    where
        F: FnMut(&S, f64) -> Result<StageOutcome<S>, E>,
    {
        match stage(state, t)? {
            StageOutcome::Accepted { increment, cfl } => {
                state.axpy(1.0, &increment);
                Ok(StepOutcome::Accepted { cfl })
            }
            StageOutcome::Rejected(rejection) => Ok(StepOutcome::Rejected(rejection)),
        }
    }
}

// =============================================================================
// Integrator selection
// =============================================================================

/// Enum wrapper for the built-in integrators.
///
/// Parses the names `"Euler"` and `"SSP33"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeIntegratorKind {
    /// Forward Euler
    Euler,
    /// Three-stage third-order SSP Runge-Kutta
    #[default]
    SspRk3,
}

impl IntegratorInfo for TimeIntegratorKind {
    fn name(&self) -> &'static str {
        match self {
            TimeIntegratorKind::SspRk3 => SspRk3.name(),
            TimeIntegratorKind::Euler => ForwardEuler.name(),
        }
    }

    fn order(&self) -> usize {
        match self {
            TimeIntegratorKind::SspRk3 => SspRk3.order(),
            TimeIntegratorKind::Euler => ForwardEuler.order(),
        }
    }

    fn n_stages(&self) -> usize {
        match self {
            TimeIntegratorKind::SspRk3 => SspRk3.n_stages(),
            TimeIntegratorKind::Euler => ForwardEuler.n_stages(),
        }
    }

    fn is_ssp(&self) -> bool {
        true
    }

    fn stage_times(&self, dt: f64) -> Vec<f64> {
        match self {
            TimeIntegratorKind::SspRk3 => SspRk3.stage_times(dt),
            TimeIntegratorKind::Euler => ForwardEuler.stage_times(dt),
        }
    }
}

impl<S: Integrable> TimeIntegrator<S> for TimeIntegratorKind {
    fn step<F, E>(&self, state: &mut S, dt: f64, t: f64, stage: F) -> Result<StepOutcome, E>
    where
        F: FnMut(&S, f64) -> Result<StageOutcome<S>, E>,
    {
        match self {
            TimeIntegratorKind::SspRk3 => SspRk3.step(state, dt, t, stage),
            TimeIntegratorKind::Euler => ForwardEuler.step(state, dt, t, stage),
        }
    }
}

impl fmt::Display for TimeIntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeIntegratorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Euler" | "euler" => Ok(TimeIntegratorKind::Euler),
            "SSP33" | "ssp33" | "ssp-rk3" => Ok(TimeIntegratorKind::SspRk3),
            _ => Err(ConfigError::UnknownIntegrator(s.to_string())),
        }
    }
}

/// Type alias for boxed integrator info (runtime polymorphism).
///
/// `TimeIntegrator` itself is not dyn-compatible because of the generic
/// stage closure; use `TimeIntegratorKind` for runtime selection.
pub type BoxedIntegratorInfo = Box<dyn IntegratorInfo>;

/// Create a boxed integrator info from an integrator kind.
pub fn create_integrator_info(kind: TimeIntegratorKind) -> BoxedIntegratorInfo {
    match kind {
        TimeIntegratorKind::SspRk3 => Box::new(SspRk3),
        TimeIntegratorKind::Euler => Box::new(ForwardEuler),
    }
}
