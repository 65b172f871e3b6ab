//! Linear relaxation towards a fixed state.
//!
//! psi(q) = rate * (target - q)
//!
//! Useful as damping (target = background state) and as the simplest stiff
//! source for testing the splitting.

use crate::error::SolverError;
use crate::solver::Field;

use super::SourceTerm;

/// Relaxation of every component towards `target` at a constant rate.
#[derive(Clone, Debug)]
pub struct Relaxation {
    /// Relaxation rate (1/time)
    pub rate: f64,
    /// Target state vector
    pub target: Vec<f64>,
}

impl Relaxation {
    /// Create a new relaxation source.
    pub fn new(rate: f64, target: Vec<f64>) -> Self {
        Self { rate, target }
    }
}

impl SourceTerm for Relaxation {
    fn increment(
        &self,
        q: &Field,
        _aux: Option<&Field>,
        _t: f64,
        dt: f64,
    ) -> Result<Field, SolverError> {
        if self.target.len() != q.n_eqn {
            return Err(SolverError::dimension_mismatch(
                format!("{} target components", q.n_eqn),
                format!("{}", self.target.len()),
            ));
        }

        let c = dt * self.rate;
        Ok(Field::from_fn(q.n_cells, q.n_eqn, |i, out| {
            for ((o, &qm), &target) in out.iter_mut().zip(q.cell(i)).zip(&self.target) {
                *o = c * (target - qm);
            }
        }))
    }

    fn name(&self) -> &'static str {
        "relaxation"
    }
}
