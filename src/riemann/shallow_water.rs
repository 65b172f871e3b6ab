//! Roe approximate Riemann solver for the 1D shallow water equations.
//!
//! State q = (h, hu), flux f = (hu, hu^2/h + g h^2/2).
//!
//! The Riemann problem is linearized with Roe-averaged states:
//!
//! u_roe = (sqrt(h_l) u_l + sqrt(h_r) u_r) / (sqrt(h_l) + sqrt(h_r)),
//! c_roe = sqrt(g (h_l + h_r) / 2)
//!
//! giving two waves alpha_i r_i with eigenvalues u_roe -/+ c_roe and
//! r_1 = (1, u-c), r_2 = (1, u+c). The Roe property makes the fluctuations
//! sum exactly to f(q_r) - f(q_l) for wet states.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid Dynamics"

use crate::error::RiemannError;

use super::traits::{InterfaceFan, RiemannSolver, check_finite};

/// Depth below which a cell is treated as dry.
const H_DRY: f64 = 1e-14;

/// Roe solver for shallow water without bathymetry.
#[derive(Clone, Copy, Debug)]
pub struct ShallowWaterRoe {
    /// Gravitational acceleration
    pub gravity: f64,
}

impl ShallowWaterRoe {
    /// Create a new shallow water solver.
    pub fn new(gravity: f64) -> Self {
        Self { gravity }
    }

    /// Physical flux f(h, hu).
    pub fn flux(&self, q: &[f64]) -> [f64; 2] {
        let (h, hu) = (q[0], q[1]);
        let u = if h > H_DRY { hu / h } else { 0.0 };
        [hu, hu * u + 0.5 * self.gravity * h * h]
    }
}

impl RiemannSolver for ShallowWaterRoe {
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
        let g = self.gravity;
        let (h_l, h_r) = (q_l[0], q_r[0]);

        if h_l < 0.0 {
            return Err(RiemannError::NegativeDepth(h_l));
        }
        if h_r < 0.0 {
            return Err(RiemannError::NegativeDepth(h_r));
        }

        // Both sides dry: nothing moves
        if h_l <= H_DRY && h_r <= H_DRY {
            out.waves.fill(0.0);
            out.speeds.fill(0.0);
            out.amdq.fill(0.0);
            out.apdq.fill(0.0);
            return Ok(());
        }

        let u_l = if h_l > H_DRY { q_l[1] / h_l } else { 0.0 };
        let u_r = if h_r > H_DRY { q_r[1] / h_r } else { 0.0 };

        // Roe averages
        let sqrt_h_l = h_l.sqrt();
        let sqrt_h_r = h_r.sqrt();
        let u_roe = (sqrt_h_l * u_l + sqrt_h_r * u_r) / (sqrt_h_l + sqrt_h_r);
        let c_roe = (0.5 * g * (h_l + h_r)).sqrt();

        // Wave strengths (jump decomposition)
        let delta_h = h_r - h_l;
        let delta_hu = q_r[1] - q_l[1];
        let inv_2c = 0.5 / c_roe;
        let alpha_1 = inv_2c * ((u_roe + c_roe) * delta_h - delta_hu);
        let alpha_2 = inv_2c * (delta_hu - (u_roe - c_roe) * delta_h);

        let lambda_1 = u_roe - c_roe;
        let lambda_2 = u_roe + c_roe;

        {
            let w1 = out.wave_mut(0);
            w1[0] = alpha_1;
            w1[1] = alpha_1 * lambda_1;
        }
        {
            let w2 = out.wave_mut(1);
            w2[0] = alpha_2;
            w2[1] = alpha_2 * lambda_2;
        }
        out.speeds[0] = lambda_1;
        out.speeds[1] = lambda_2;
        out.split_by_speed();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "shallow-water-roe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riemann::WaveFan;

    const G: f64 = 9.81;
    const TOL: f64 = 1e-10;

    fn solve(q_l: [f64; 2], q_r: [f64; 2]) -> WaveFan {
        let mut fan = WaveFan::new(1, 2, 2);
        ShallowWaterRoe::new(G)
            .solve(&q_l, &q_r, None, None, fan.interface_mut(0))
            .unwrap();
        fan
    }

    #[test]
    fn test_roe_property() {
        let rp = ShallowWaterRoe::new(G);
        let cases = [
            ([2.0, 1.0], [1.0, 0.5]),
            ([1.0, -3.0], [1.5, 2.0]),
            ([3.0, 6.0], [3.0, 6.0]),
        ];

        for (q_l, q_r) in cases {
            let fan = solve(q_l, q_r);
            let f_l = rp.flux(&q_l);
            let f_r = rp.flux(&q_r);
            for m in 0..2 {
                let total = fan.amdq(0)[m] + fan.apdq(0)[m];
                assert!((total - (f_r[m] - f_l[m])).abs() < TOL);

                let sum = fan.wave(0, 0)[m] + fan.wave(0, 1)[m];
                assert!((sum - (q_r[m] - q_l[m])).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_still_water_is_quiet() {
        let fan = solve([1.0, 0.0], [1.0, 0.0]);
        for m in 0..2 {
            assert_eq!(fan.amdq(0)[m], 0.0);
            assert_eq!(fan.apdq(0)[m], 0.0);
        }
        let c = (G * 1.0_f64).sqrt();
        assert!((fan.speed(0, 0) + c).abs() < TOL);
        assert!((fan.speed(0, 1) - c).abs() < TOL);
    }

    #[test]
    fn test_dry_states() {
        let fan = solve([0.0, 0.0], [0.0, 0.0]);
        assert!(fan.waves.iter().all(|&w| w == 0.0));

        let mut fan = WaveFan::new(1, 2, 2);
        let err = ShallowWaterRoe::new(G)
            .solve(&[1.0, 0.0], &[-0.1, 0.0], None, None, fan.interface_mut(0))
            .unwrap_err();
        assert_eq!(err, RiemannError::NegativeDepth(-0.1));
    }
}
