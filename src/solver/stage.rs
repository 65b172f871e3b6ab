//! Stage evaluator and single-step dispatcher.

use crate::boundary::FieldProvider;
use crate::error::{ConfigError, SolverError};
use crate::riemann::RiemannSolver;
use crate::source::SourceTerm;
use crate::time::{Rejection, StageOutcome, StepOutcome, TimeIntegrator};

use super::{Field, Solution, SolverConfig, homogeneous_increment};

/// Per-step data shared by every stage.
#[derive(Clone, Copy, Debug)]
pub struct StageContext<'a> {
    /// Aux field on the physical cells
    pub aux: Option<&'a Field>,
    /// Grid spacing
    pub dx: f64,
    /// Time step
    pub dt: f64,
}

/// High-resolution finite-volume solver for 1D hyperbolic systems.
///
/// # Type Parameters
///
/// * `R` - Riemann solver (must implement [`RiemannSolver`])
/// * `B` - Ghost-cell provider (must implement [`FieldProvider`])
///
/// The CFL number of a stage is returned with its increment, so the solver
/// holds no mutable state and every method takes `&self`.
pub struct FvSolver1D<R, B>
where
    R: RiemannSolver,
    B: FieldProvider,
{
    config: SolverConfig,
    riemann: R,
    boundary: B,
    source: Option<Box<dyn SourceTerm>>,
}

impl<R, B> FvSolver1D<R, B>
where
    R: RiemannSolver,
    B: FieldProvider,
{
    /// Create a new solver.
    ///
    /// # Errors
    /// Any [`SolverConfig::validate`] failure, or `WaveCountMismatch` if the
    /// configured wave count differs from the Riemann solver's.
    pub fn new(config: SolverConfig, riemann: R, boundary: B) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(configured) = config.num_waves
            && configured != riemann.num_waves()
        {
            return Err(ConfigError::WaveCountMismatch {
                configured,
                solver: riemann.num_waves(),
            });
        }
        if config.source_term {
            return Err(ConfigError::MissingSource);
        }
        Ok(Self {
            config,
            riemann,
            boundary,
            source: None,
        })
    }

    /// Attach a split source term and enable it.
    pub fn with_source(mut self, source: impl SourceTerm + 'static) -> Self {
        self.source = Some(Box::new(source));
        self.config.source_term = true;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Get the Riemann solver.
    pub fn riemann(&self) -> &R {
        &self.riemann
    }

    /// Get the ghost-cell provider.
    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// Evaluate one Runge-Kutta stage.
    ///
    /// Ghost-fills `q`, computes the homogeneous increment and its CFL
    /// number, refuses the stage if `cfl >= cfl_max`, and otherwise adds the
    /// source increment when enabled.
    ///
    /// # Arguments
    /// * `q` - Stage state on the physical cells
    /// * `t` - Stage time
    /// * `ctx` - Aux, spacing and time step of the current step
    pub fn dq(
        &self,
        q: &Field,
        t: f64,
        ctx: &StageContext<'_>,
    ) -> Result<StageOutcome<Field>, SolverError> {
        let num_ghost = self.config.num_ghost;
        let q_local = self.boundary.ghost_filled(q, 0, num_ghost)?;
        let aux_local = match ctx.aux {
            Some(aux) => Some(self.boundary.ghost_filled_aux(aux, 0, num_ghost)?),
            None => None,
        };

        let mut stage = homogeneous_increment(
            &q_local,
            aux_local.as_ref(),
            ctx.dx,
            ctx.dt,
            &self.config,
            &self.riemann,
        )?;

        if stage.cfl >= self.config.cfl_max {
            return Ok(StageOutcome::Rejected(Rejection {
                cfl: stage.cfl,
                cfl_max: self.config.cfl_max,
            }));
        }

        if self.config.source_term {
            let source = self.source.as_ref().ok_or(ConfigError::MissingSource)?;
            let increment = source.increment(q, ctx.aux, t, ctx.dt)?;
            if !increment.same_shape(&stage.dq) {
                return Err(SolverError::dimension_mismatch(
                    format!("{} x {} source increment", q.n_cells, q.n_eqn),
                    format!("{} x {}", increment.n_cells, increment.n_eqn),
                ));
            }
            stage.dq.add(&increment);
        }

        Ok(StageOutcome::Accepted {
            increment: stage.dq,
            cfl: stage.cfl,
        })
    }

    /// Advance the solution by one step of size `dt`.
    ///
    /// `solution.q` is replaced only when every stage is accepted.
    /// `solution.t` is left to the caller.
    pub fn step(&self, solution: &mut Solution, dt: f64) -> Result<StepOutcome, SolverError> {
        if solution.q.n_cells != solution.grid.n_cells {
            return Err(SolverError::dimension_mismatch(
                format!("{} cells", solution.grid.n_cells),
                format!("{} cells", solution.q.n_cells),
            ));
        }

        let ctx = StageContext {
            aux: solution.aux.as_ref(),
            dx: solution.grid.dx(),
            dt,
        };
        let t = solution.t;

        self.config
            .time_integrator
            .step(&mut solution.q, dt, t, |q, stage_t| self.dq(q, stage_t, &ctx))
    }
}
