//! Riemann solver for scalar linear advection.
//!
//! q_t + u q_x = 0
//!
//! A single wave W = q_r - q_l travels at speed u.

use crate::error::RiemannError;

use super::traits::{InterfaceFan, RiemannSolver, check_finite};

/// Constant-velocity linear advection.
#[derive(Clone, Copy, Debug)]
pub struct Advection {
    /// Advection velocity (positive = rightward)
    pub velocity: f64,
}

impl Advection {
    /// Create a new advection solver with given velocity.
    pub fn new(velocity: f64) -> Self {
        Self { velocity }
    }
}

impl RiemannSolver for Advection {
    fn num_eqn(&self) -> usize {
        1
    }

    fn num_waves(&self) -> usize {
        1
    }

    fn solve(
        &self,
        q_l: &[f64],
        q_r: &[f64],
        _aux_l: Option<&[f64]>,
        _aux_r: Option<&[f64]>,
        mut out: InterfaceFan<'_>,
    ) -> Result<(), RiemannError> {
        check_finite(q_l, q_r)?;
        out.waves[0] = q_r[0] - q_l[0];
        out.speeds[0] = self.velocity;
        out.split_by_speed();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "advection"
    }
}
