//! Riemann solver for the inviscid Burgers equation.
//!
//! q_t + (q^2 / 2)_x = 0
//!
//! One wave W = q_r - q_l with Rankine-Hugoniot speed s = (q_l + q_r) / 2.
//! For a transonic rarefaction (q_l < 0 < q_r) the fluctuations are split
//! at the sonic point so that no expansion shock forms.

use crate::error::RiemannError;

use super::traits::{InterfaceFan, RiemannSolver, check_finite};

/// Inviscid Burgers equation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Burgers;

impl RiemannSolver for Burgers {
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
        let (ul, ur) = (q_l[0], q_r[0]);

        out.waves[0] = ur - ul;
        out.speeds[0] = 0.5 * (ul + ur);

        if ul < 0.0 && ur > 0.0 {
            // Sonic point f'(0) = 0 inside the fan
            out.amdq[0] = -0.5 * ul * ul;
            out.apdq[0] = 0.5 * ur * ur;
        } else {
            out.split_by_speed();
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "burgers"
    }
}
