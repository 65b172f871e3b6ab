//! Conservation diagnostics for 1D finite-volume solutions.
//!
//! # Example
//! ```
//! use fv_rs::mesh::Grid1D;
//! use fv_rs::solver::{ConservationDiagnostics, ConservationTracker, Solution};
//!
//! let grid = Grid1D::uniform(0.0, 1.0, 10).unwrap();
//! let mut sol = Solution::new(grid, 1);
//! sol.set_from_function(|x, q| q[0] = 1.0 + x);
//!
//! let initial = ConservationDiagnostics::compute(&sol, None).unwrap();
//! let mut tracker = ConservationTracker::new(initial);
//! // ... simulation loop ...
//! let current = ConservationDiagnostics::compute(&sol, None).unwrap();
//! tracker.update(sol.t, current, 0.0);
//! assert!(tracker.max_drift() < 1e-14);
//! ```

use crate::error::{ConfigError, SolverError};
use crate::riemann::{RiemannPairs, RiemannSolver, solve_interfaces};
use crate::solver::{Field, Solution};

/// Integral quantities of a solution.
#[derive(Clone, Debug, PartialEq)]
pub struct ConservationDiagnostics {
    /// Integral of kappa * q_m over the domain, per component
    pub totals: Vec<f64>,
    /// Largest absolute cell value
    pub max_abs: f64,
    /// Whether every cell value is finite
    pub finite: bool,
}

impl ConservationDiagnostics {
    /// Compute the diagnostics of a solution.
    ///
    /// With a capacity index the totals are weighted by the capacity, which
    /// is the quantity the capacity-form update conserves.
    pub fn compute(
        solution: &Solution,
        capacity_index: Option<usize>,
    ) -> Result<Self, SolverError> {
        let q = &solution.q;
        let dx = solution.grid.dx();

        let capacity = match capacity_index {
            None => None,
            Some(index) => {
                let aux = solution.aux.as_ref().ok_or(ConfigError::MissingAux(index))?;
                if index >= aux.n_eqn {
                    return Err(ConfigError::CapacityOutOfRange {
                        index,
                        n_aux: aux.n_eqn,
                    }
                    .into());
                }
                Some((aux, index))
            }
        };

        let mut totals = vec![0.0; q.n_eqn];
        for i in 0..q.n_cells {
            let weight = match capacity {
                Some((aux, index)) => dx * aux.cell(i)[index],
                None => dx,
            };
            for (total, &v) in totals.iter_mut().zip(q.cell(i)) {
                *total += weight * v;
            }
        }

        Ok(Self {
            totals,
            max_abs: q.max_abs(),
            finite: q.is_finite(),
        })
    }

    /// One-line summary for logging.
    pub fn summary_line(&self) -> String {
        let totals: Vec<String> = self.totals.iter().map(|v| format!("{v:.6e}")).collect();
        format!("totals=[{}] max|q|={:.3e}", totals.join(", "), self.max_abs)
    }
}

/// Track conservation and stability over a run.
#[derive(Clone, Debug)]
pub struct ConservationTracker {
    initial: ConservationDiagnostics,
    current: ConservationDiagnostics,
    current_time: f64,
    n_updates: usize,
    max_cfl_seen: f64,
}

impl ConservationTracker {
    /// Create a new tracker with initial diagnostics.
    pub fn new(initial: ConservationDiagnostics) -> Self {
        Self {
            current: initial.clone(),
            initial,
            current_time: 0.0,
            n_updates: 0,
            max_cfl_seen: 0.0,
        }
    }

    /// Update tracker with new diagnostics and the CFL number that produced them.
    pub fn update(&mut self, time: f64, diag: ConservationDiagnostics, cfl: f64) {
        self.current_time = time;
        self.n_updates += 1;
        self.max_cfl_seen = self.max_cfl_seen.max(cfl);
        self.current = diag;
    }

    /// Drift of component m, relative when the initial total is not ~0.
    pub fn drift(&self, m: usize) -> f64 {
        let initial = self.initial.totals[m];
        let change = (self.current.totals[m] - initial).abs();
        if initial.abs() > 1e-14 {
            change / initial.abs()
        } else {
            change
        }
    }

    /// Largest drift over all components.
    pub fn max_drift(&self) -> f64 {
        (0..self.initial.totals.len())
            .map(|m| self.drift(m))
            .fold(0.0, f64::max)
    }

    /// Largest CFL number reported so far.
    pub fn max_cfl_seen(&self) -> f64 {
        self.max_cfl_seen
    }

    /// Number of updates.
    pub fn n_updates(&self) -> usize {
        self.n_updates
    }

    /// Time of the most recent update.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Get current diagnostics.
    pub fn current(&self) -> &ConservationDiagnostics {
        &self.current
    }

    /// Get initial diagnostics.
    pub fn initial(&self) -> &ConservationDiagnostics {
        &self.initial
    }

    /// Whether the solution is finite and has not grown by orders of magnitude.
    pub fn is_stable(&self) -> bool {
        self.current.finite && self.current.max_abs <= 1e3 * self.initial.max_abs.max(1.0)
    }
}

/// Largest absolute wave speed between adjacent cells of a field.
///
/// Useful to pick a first time step: `dt = cfl * dx / max_wave_speed`.
pub fn max_wave_speed<R: RiemannSolver + ?Sized>(
    rp: &R,
    q: &Field,
    aux: Option<&Field>,
) -> Result<f64, SolverError> {
    let fan = solve_interfaces(rp, &RiemannPairs::adjacent(q, q, aux))?;
    Ok(fan.speeds.iter().map(|s| s.abs()).fold(0.0, f64::max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Grid1D;
    use crate::riemann::ShallowWaterRoe;

    #[test]
    fn test_totals() {
        let grid = Grid1D::uniform(0.0, 2.0, 4).unwrap();
        let q = Field::from_fn(4, 2, |i, s| {
            s[0] = 1.0;
            s[1] = i as f64;
        });
        let sol = Solution::from_field(grid, q).unwrap();
        let diag = ConservationDiagnostics::compute(&sol, None).unwrap();

        assert!((diag.totals[0] - 2.0).abs() < 1e-14);
        assert!((diag.totals[1] - 3.0).abs() < 1e-14);
        assert_eq!(diag.max_abs, 3.0);
        assert!(diag.finite);
    }

    #[test]
    fn test_capacity_weighted_totals() {
        let grid = Grid1D::uniform(0.0, 1.0, 4).unwrap();
        let sol = Solution::from_field(grid, Field::constant(4, &[1.0]))
            .unwrap()
            .with_aux(Field::constant(4, &[3.0]))
            .unwrap();
        let diag = ConservationDiagnostics::compute(&sol, Some(0)).unwrap();
        assert!((diag.totals[0] - 3.0).abs() < 1e-14);

        let err = ConservationDiagnostics::compute(&sol, Some(2)).unwrap_err();
        assert!(matches!(
            err,
            SolverError::Config(ConfigError::CapacityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_tracker_drift() {
        let initial = ConservationDiagnostics {
            totals: vec![2.0, 0.0],
            max_abs: 1.0,
            finite: true,
        };
        let mut tracker = ConservationTracker::new(initial);
        tracker.update(
            0.5,
            ConservationDiagnostics {
                totals: vec![2.002, 1e-3],
                max_abs: 1.0,
                finite: true,
            },
            0.8,
        );

        assert!((tracker.drift(0) - 1e-3).abs() < 1e-12);
        assert!((tracker.drift(1) - 1e-3).abs() < 1e-12);
        assert_eq!(tracker.max_cfl_seen(), 0.8);
        assert_eq!(tracker.n_updates(), 1);
        assert!(tracker.is_stable());
    }

    #[test]
    fn test_max_wave_speed() {
        let q = Field::constant(5, &[1.0, 0.0]);
        let speed = max_wave_speed(&ShallowWaterRoe::new(9.81), &q, None).unwrap();
        assert!((speed - 9.81_f64.sqrt()).abs() < 1e-12);
    }
}
