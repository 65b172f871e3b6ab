//! Variable time-step driver.
//!
//! Repeats [`FvSolver1D::step`] until the end time is reached. A refused
//! step leaves the solution untouched, so the driver only has to pick a
//! smaller `dt` and try again.

use log::{debug, info, warn};

use crate::boundary::FieldProvider;
use crate::error::SolverError;
use crate::riemann::RiemannSolver;
use crate::solver::{FvSolver1D, Solution};
use crate::time::StepOutcome;

// =============================================================================
// Evolve Summary
// =============================================================================

/// Statistics of an [`FvSolver1D::evolve_to_time`] run.
#[derive(Clone, Debug, PartialEq)]
pub struct EvolveSummary {
    /// Final simulation time reached.
    pub final_time: f64,
    /// Number of accepted steps.
    pub n_steps: usize,
    /// Number of refused step attempts.
    pub n_rejected: usize,
    /// Smallest accepted time step (infinite if no step was taken).
    pub dt_min: f64,
    /// Largest accepted time step.
    pub dt_max: f64,
    /// Largest CFL number of an accepted step.
    pub cfl_max: f64,
}

impl EvolveSummary {
    fn new(t_start: f64) -> Self {
        Self {
            final_time: t_start,
            n_steps: 0,
            n_rejected: 0,
            dt_min: f64::INFINITY,
            dt_max: 0.0,
            cfl_max: 0.0,
        }
    }

    fn record_step(&mut self, t: f64, dt: f64, cfl: f64) {
        self.final_time = t;
        self.n_steps += 1;
        self.dt_min = self.dt_min.min(dt);
        self.dt_max = self.dt_max.max(dt);
        self.cfl_max = self.cfl_max.max(cfl);
    }
}

// =============================================================================
// Evolve Loop
// =============================================================================

impl<R, B> FvSolver1D<R, B>
where
    R: RiemannSolver,
    B: FieldProvider,
{
    /// Advance `solution` to `t_end`.
    ///
    /// The first attempt uses `dt_initial` (capped by `dt_max`); the final
    /// step is shortened to land exactly on `t_end`. With a variable time
    /// step, `dt` is rescaled after every attempt so that the next CFL
    /// number approaches `cfl_desired`.
    ///
    /// # Errors
    /// * `CflViolation` if a fixed time step is refused
    /// * `MaxStepsExceeded` after `max_steps` attempts
    /// * anything raised while evaluating a stage
    pub fn evolve_to_time(
        &self,
        solution: &mut Solution,
        t_end: f64,
    ) -> Result<EvolveSummary, SolverError> {
        self.evolve_to_time_with_callback(solution, t_end, |_| {})
    }

    /// Advance `solution` to `t_end`, calling `callback` after every
    /// accepted step.
    pub fn evolve_to_time_with_callback<F>(
        &self,
        solution: &mut Solution,
        t_end: f64,
        mut callback: F,
    ) -> Result<EvolveSummary, SolverError>
    where
        F: FnMut(&Solution),
    {
        let config = self.config();
        let mut summary = EvolveSummary::new(solution.t);
        let mut dt = config.dt_initial.min(config.dt_max);
        let mut attempts = 0;

        info!(
            "evolving t = {:.4} -> {:.4} with {} / {}",
            solution.t,
            t_end,
            config.time_integrator,
            self.riemann().name()
        );

        while solution.t < t_end {
            if attempts >= config.max_steps {
                return Err(SolverError::MaxStepsExceeded {
                    max_steps: config.max_steps,
                    t: solution.t,
                });
            }
            attempts += 1;

            let remaining = t_end - solution.t;
            let last = dt >= remaining;
            let step_dt = if last { remaining } else { dt };

            match self.step(solution, step_dt)? {
                StepOutcome::Accepted { cfl } => {
                    solution.t = if last { t_end } else { solution.t + step_dt };
                    summary.record_step(solution.t, step_dt, cfl);
                    debug!(
                        "step {}: t = {:.6}, dt = {:.3e}, cfl = {:.3}",
                        summary.n_steps, solution.t, step_dt, cfl
                    );
                    callback(solution);

                    if config.dt_variable && cfl > 0.0 {
                        dt = config.dt_max.min(step_dt * config.cfl_desired / cfl);
                    }
                }
                StepOutcome::Rejected(rejection) => {
                    summary.n_rejected += 1;
                    if !config.dt_variable {
                        return Err(SolverError::CflViolation {
                            cfl: rejection.cfl,
                            cfl_max: rejection.cfl_max,
                        });
                    }
                    dt = config.dt_max.min(step_dt * config.cfl_desired / rejection.cfl);
                    warn!(
                        "step rejected at t = {:.6}: cfl = {:.3} >= {:.3}, retrying with dt = {:.3e}",
                        solution.t, rejection.cfl, rejection.cfl_max, dt
                    );
                }
            }
        }

        info!(
            "reached t = {:.4} in {} steps ({} rejected), dt in [{:.3e}, {:.3e}], max cfl {:.3}",
            summary.final_time,
            summary.n_steps,
            summary.n_rejected,
            summary.dt_min,
            summary.dt_max,
            summary.cfl_max
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::GhostCells;
    use crate::error::ConfigError;
    use crate::mesh::Grid1D;
    use crate::riemann::Advection;
    use crate::solver::SolverConfig;

    fn advection(config: SolverConfig) -> FvSolver1D<Advection, GhostCells> {
        FvSolver1D::new(config, Advection::new(1.0), GhostCells::periodic()).unwrap()
    }

    /// 20 cells on [0, 1], dx = 0.05
    fn pulse() -> Solution {
        let grid = Grid1D::uniform(0.0, 1.0, 20).unwrap();
        let mut sol = Solution::new(grid, 1);
        sol.set_from_function(|x, q| q[0] = (-50.0 * (x - 0.5).powi(2)).exp());
        sol
    }

    #[test]
    fn test_reaches_end_time_exactly() {
        let solver = advection(SolverConfig::default().with_dt_initial(0.03));
        let mut sol = pulse();

        let summary = solver.evolve_to_time(&mut sol, 0.37).unwrap();
        assert_eq!(sol.t, 0.37);
        assert_eq!(summary.final_time, 0.37);
        assert_eq!(summary.n_rejected, 0);
        assert!(summary.n_steps > 1);
        assert!(summary.cfl_max < 1.0);
    }

    #[test]
    fn test_rejection_shrinks_dt() {
        // First attempt has cfl = 10; dt is then chosen for cfl = 0.9
        let solver = advection(SolverConfig::default().with_dt_initial(1.0));
        let mut sol = pulse();

        let summary = solver.evolve_to_time(&mut sol, 0.5).unwrap();
        assert_eq!(summary.n_rejected, 1);
        assert_eq!(summary.n_steps, 12);
        assert_eq!(sol.t, 0.5);
        assert!((summary.cfl_max - 0.9).abs() < 1e-12);
        assert!((summary.dt_max - 0.045).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_dt_violation() {
        let solver = advection(SolverConfig::default().with_fixed_dt(0.1));
        let mut sol = pulse();
        let before = sol.q.clone();

        let err = solver.evolve_to_time(&mut sol, 1.0).unwrap_err();
        match err {
            SolverError::CflViolation { cfl, cfl_max } => {
                assert!((cfl - 2.0).abs() < 1e-12);
                assert_eq!(cfl_max, 1.0);
            }
            other => panic!("expected CflViolation, got {other:?}"),
        }
        assert_eq!(sol.q, before);
        assert_eq!(sol.t, 0.0);
    }

    #[test]
    fn test_fixed_dt_keeps_step_size() {
        let solver = advection(SolverConfig::default().with_fixed_dt(0.025));
        let mut sol = pulse();

        let summary = solver.evolve_to_time(&mut sol, 0.1).unwrap();
        assert_eq!(summary.n_steps, 4);
        assert!((summary.dt_min - 0.025).abs() < 1e-14);
        assert!((summary.cfl_max - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejection_with_desired_cfl_at_limit() {
        // With cfl_desired == cfl_max a refused step would be retried unchanged
        let config = SolverConfig::default().with_cfl(1.0, 1.0).with_dt_initial(1.0);
        let err = FvSolver1D::new(config, Advection::new(1.0), GhostCells::periodic())
            .err()
            .unwrap();
        assert_eq!(
            err,
            ConfigError::InvalidCfl {
                desired: 1.0,
                max: 1.0
            }
        );

        let config = SolverConfig::default()
            .with_cfl(0.99, 1.0)
            .with_dt_initial(1.0)
            .with_max_steps(100);
        let mut sol = pulse();
        let summary = advection(config).evolve_to_time(&mut sol, 0.5).unwrap();
        assert_eq!(sol.t, 0.5);
        assert_eq!(summary.n_rejected, 1);
        assert!(summary.cfl_max < 1.0);
    }

    #[test]
    fn test_max_steps() {
        let config = SolverConfig::default()
            .with_dt_initial(0.02)
            .with_max_steps(3);
        let solver = advection(config);
        let mut sol = pulse();

        let err = solver.evolve_to_time(&mut sol, 1.0).unwrap_err();
        assert!(matches!(err, SolverError::MaxStepsExceeded { max_steps: 3, .. }));
        assert!(sol.t > 0.0);
    }

    #[test]
    fn test_callback_after_each_step() {
        let solver = advection(SolverConfig::default().with_dt_initial(0.02));
        let mut sol = pulse();

        let mut times = Vec::new();
        let summary = solver
            .evolve_to_time_with_callback(&mut sol, 0.2, |s| times.push(s.t))
            .unwrap();

        assert_eq!(times.len(), summary.n_steps);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(times.last().copied(), Some(0.2));
    }

    #[test]
    fn test_nothing_to_do() {
        let solver = advection(SolverConfig::default());
        let mut sol = pulse().with_time(1.0);

        let summary = solver.evolve_to_time(&mut sol, 0.5).unwrap();
        assert_eq!(summary.n_steps, 0);
        assert_eq!(summary.final_time, 1.0);
    }
}
