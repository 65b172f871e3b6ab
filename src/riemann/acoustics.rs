//! Riemann solver for 1D linear acoustics.
//!
//! State q = (p, u), flux Jacobian A = [[0, K], [1/rho, 0]].
//!
//! Eigenvalues -c, +c with c = sqrt(K / rho), impedance Z = rho * c and
//! right eigenvectors r1 = (-Z, 1), r2 = (Z, 1).

use crate::error::RiemannError;

use super::traits::{InterfaceFan, RiemannSolver, check_finite};

/// Linear acoustics in a homogeneous medium.
#[derive(Clone, Copy, Debug)]
pub struct Acoustics {
    /// Density rho
    pub density: f64,
    /// Bulk modulus K
    pub bulk_modulus: f64,
}

impl Acoustics {
    /// Create a new acoustics solver.
    pub fn new(density: f64, bulk_modulus: f64) -> Self {
        Self {
            density,
            bulk_modulus,
        }
    }

    /// Sound speed c = sqrt(K / rho).
    pub fn sound_speed(&self) -> f64 {
        (self.bulk_modulus / self.density).sqrt()
    }

    /// Impedance Z = rho * c.
    pub fn impedance(&self) -> f64 {
        self.density * self.sound_speed()
    }
}

impl RiemannSolver for Acoustics {
    fn num_eqn(&self) -> usize {
        2
    }

    fn num_waves(&self) -> usize {
        2
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
        let c = self.sound_speed();
        let z = self.impedance();

        let delta_p = q_r[0] - q_l[0];
        let delta_u = q_r[1] - q_l[1];

        // Wave strengths from R^{-1} * delta
        let alpha_1 = (-delta_p + z * delta_u) / (2.0 * z);
        let alpha_2 = (delta_p + z * delta_u) / (2.0 * z);

        {
            let w1 = out.wave_mut(0);
            w1[0] = -alpha_1 * z;
            w1[1] = alpha_1;
        }
        {
            let w2 = out.wave_mut(1);
            w2[0] = alpha_2 * z;
            w2[1] = alpha_2;
        }
        out.speeds[0] = -c;
        out.speeds[1] = c;
        out.split_by_speed();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "acoustics"
    }
}
