//! Fifth-order WENO reconstruction of interface values.
//!
//! Uses the Jiang-Shu smoothness indicators written in terms of
//! first differences. For the right edge of cell i, with
//! D_j = q_{j+1} - q_j:
//!
//! q_{i+1/2} = q_i + (D_{i-1} + 6 D_i - D_{i+1}) / 12
//!             - phi(D_{i-2}, D_{i-1}, D_i, D_{i+1})
//!
//! where phi is the nonlinear correction to the fourth-order central value.
//! With the ideal weights (1, 6, 3) / 10 this reduces to the linear
//! stencil (2, -13, 47, 27, -3) / 60. The left edge is the mirror image.
//!
//! # References
//! - Jiang & Shu (1996), "Efficient implementation of weighted ENO schemes"
//! - Ketcheson, Parsani & LeVeque (2013), "High-order wave propagation algorithms"

use crate::error::SolverError;
use crate::riemann::{RiemannPairs, RiemannSolver, solve_interfaces};
use crate::solver::Field;

use super::InterfaceStates;

/// Regularization of the smoothness indicators.
pub const WENO_EPSILON: f64 = 1e-36;

/// Half-width of the WENO5 stencil.
const HALF_STENCIL: usize = 2;

/// Nonlinear WENO correction.
///
/// Arguments are four consecutive differences ordered away from the edge
/// being reconstructed, the last one lying across the edge.
#[inline]
fn weno_correction(a: f64, b: f64, c: f64, d: f64) -> f64 {
    let is0 = 13.0 * (a - b).powi(2) + 3.0 * (a - 3.0 * b).powi(2);
    let is1 = 13.0 * (b - c).powi(2) + 3.0 * (b + c).powi(2);
    let is2 = 13.0 * (c - d).powi(2) + 3.0 * (3.0 * c - d).powi(2);

    let alpha0 = 1.0 / (WENO_EPSILON + is0).powi(2);
    let alpha1 = 6.0 / (WENO_EPSILON + is1).powi(2);
    let alpha2 = 3.0 / (WENO_EPSILON + is2).powi(2);
    let sum = alpha0 + alpha1 + alpha2;

    let omega0 = alpha0 / sum;
    let omega2 = alpha2 / sum;

    omega0 * (a - 2.0 * b + c) / 3.0 + (omega2 - 0.5) * (b - 2.0 * c + d) / 6.0
}

/// Range of cells whose five-point stencil fits in an array of n cells.
#[inline]
fn interior(n: usize) -> std::ops::Range<usize> {
    HALF_STENCIL..n.saturating_sub(HALF_STENCIL).max(HALF_STENCIL)
}

/// Component-wise WENO5 reconstruction.
///
/// Cells within two cells of either end keep their cell average.
pub fn weno5(q: &Field) -> InterfaceStates {
    let mut left = q.clone();
    let mut right = q.clone();
    let (n, me) = (q.n_cells, q.n_eqn);

    let mut diff = vec![0.0; n.saturating_sub(1)];
    for m in 0..me {
        for (j, d) in diff.iter_mut().enumerate() {
            *d = q.cell(j + 1)[m] - q.cell(j)[m];
        }

        for i in interior(n) {
            let qi = q.cell(i)[m];
            let (dm2, dm1, d0, dp1) = (diff[i - 2], diff[i - 1], diff[i], diff[i + 1]);

            right.cell_mut(i)[m] =
                qi + (dm1 + 6.0 * d0 - dp1) / 12.0 - weno_correction(dm2, dm1, d0, dp1);
            left.cell_mut(i)[m] =
                qi - (d0 + 6.0 * dm1 - dm2) / 12.0 + weno_correction(dp1, d0, dm1, dm2);
        }
    }

    InterfaceStates { left, right }
}

/// Wave-based WENO5 reconstruction.
///
/// A Riemann sweep over adjacent cells yields the waves at every interface.
/// For each family the neighbouring waves are projected onto the wave at
/// the edge being reconstructed, WENO5 is applied to those scalar
/// projections and the result is added along the edge wave. Zero waves
/// contribute nothing.
pub fn weno5_wave<R: RiemannSolver + ?Sized>(
    q: &Field,
    aux: Option<&Field>,
    rp: &R,
) -> Result<InterfaceStates, SolverError> {
    let fan = solve_interfaces(rp, &RiemannPairs::adjacent(q, q, aux))?;
    let mut left = q.clone();
    let mut right = q.clone();

    // Projection of wave p at interface k onto the reference wave
    let theta = |k: usize, p: usize, reference: &[f64], norm2: f64| -> f64 {
        let w = fan.wave(k, p);
        w.iter().zip(reference).map(|(a, b)| a * b).sum::<f64>() / norm2
    };

    for i in interior(q.n_cells) {
        for p in 0..fan.num_waves {
            // Right edge of cell i is interface i
            let w_ref = fan.wave(i, p);
            let norm2: f64 = w_ref.iter().map(|w| w * w).sum();
            if norm2 > 0.0 {
                let (tm2, tm1, tp1) = (
                    theta(i - 2, p, w_ref, norm2),
                    theta(i - 1, p, w_ref, norm2),
                    theta(i + 1, p, w_ref, norm2),
                );
                let coeff = (tm1 + 6.0 - tp1) / 12.0 - weno_correction(tm2, tm1, 1.0, tp1);
                for (r, w) in right.cell_mut(i).iter_mut().zip(w_ref) {
                    *r += coeff * w;
                }
            }

            // Left edge of cell i is interface i - 1
            let w_ref = fan.wave(i - 1, p);
            let norm2: f64 = w_ref.iter().map(|w| w * w).sum();
            if norm2 > 0.0 {
                let (tm2, t0, tp1) = (
                    theta(i - 2, p, w_ref, norm2),
                    theta(i, p, w_ref, norm2),
                    theta(i + 1, p, w_ref, norm2),
                );
                let coeff = -(t0 + 6.0 - tm2) / 12.0 + weno_correction(tp1, t0, 1.0, tm2);
                for (l, w) in left.cell_mut(i).iter_mut().zip(w_ref) {
                    *l += coeff * w;
                }
            }
        }
    }

    Ok(InterfaceStates { left, right })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riemann::{Acoustics, Advection};

    /// Cell averages of exp(x) on [0, 1].
    fn exp_averages(n: usize) -> Field {
        let dx = 1.0 / n as f64;
        Field::from_fn(n, 1, |i, s| {
            let (a, b) = (i as f64 * dx, (i + 1) as f64 * dx);
            s[0] = (b.exp() - a.exp()) / dx;
        })
    }

    fn max_edge_error(n: usize) -> f64 {
        let dx = 1.0 / n as f64;
        let states = weno5(&exp_averages(n));
        let mut err: f64 = 0.0;
        for i in 2..n - 2 {
            let right_exact = ((i + 1) as f64 * dx).exp();
            let left_exact = (i as f64 * dx).exp();
            err = err.max((states.right.cell(i)[0] - right_exact).abs());
            err = err.max((states.left.cell(i)[0] - left_exact).abs());
        }
        err
    }

    #[test]
    fn test_weno5_linear_data_exact() {
        let q = Field::from_fn(10, 1, |i, s| s[0] = 2.0 * i as f64 - 3.0);
        let states = weno5(&q);

        for i in 2..8 {
            let qi = q.cell(i)[0];
            assert!((states.right.cell(i)[0] - (qi + 1.0)).abs() < 1e-12);
            assert!((states.left.cell(i)[0] - (qi - 1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weno5_constant_state() {
        let q = Field::constant(8, &[1.5, -0.5]);
        let states = weno5(&q);
        assert_eq!(states.left, q);
        assert_eq!(states.right, q);
    }

    #[test]
    fn test_weno5_boundary_cells_keep_average() {
        let q = Field::from_fn(7, 1, |i, s| s[0] = (i * i) as f64);
        let states = weno5(&q);
        for i in [0, 1, 5, 6] {
            assert_eq!(states.left.cell(i), q.cell(i));
            assert_eq!(states.right.cell(i), q.cell(i));
        }
    }

    #[test]
    fn test_weno5_fifth_order() {
        let e1 = max_edge_error(20);
        let e2 = max_edge_error(40);
        let order = (e1 / e2).log2();
        assert!(order > 4.5, "observed order {order}");
    }

    #[test]
    fn test_weno5_no_new_extrema_at_step() {
        let q = Field::from_fn(12, 1, |i, s| s[0] = if i < 6 { 1.0 } else { 0.0 });
        let states = weno5(&q);
        for i in 0..12 {
            for v in [states.left.cell(i)[0], states.right.cell(i)[0]] {
                assert!(v > -1e-8 && v < 1.0 + 1e-8, "cell {i}: {v}");
            }
        }
    }

    #[test]
    fn test_wave_based_matches_componentwise_for_advection() {
        let q = Field::from_fn(16, 1, |i, s| s[0] = (0.4 * i as f64).sin());
        let component = weno5(&q);
        let wave = weno5_wave(&q, None, &Advection::new(1.0)).unwrap();

        for i in 0..16 {
            assert!((component.left.cell(i)[0] - wave.left.cell(i)[0]).abs() < 1e-12);
            assert!((component.right.cell(i)[0] - wave.right.cell(i)[0]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_wave_based_linear_acoustics_exact() {
        // Linear data: every wave is the same, so the edge value is q +- W/2
        let q = Field::from_fn(9, 2, |i, s| {
            s[0] = 1.0 + 0.5 * i as f64;
            s[1] = -0.25 * i as f64;
        });
        let states = weno5_wave(&q, None, &Acoustics::new(1.0, 1.0)).unwrap();

        for i in 2..7 {
            let qi = q.cell(i);
            assert!((states.right.cell(i)[0] - (qi[0] + 0.25)).abs() < 1e-12);
            assert!((states.right.cell(i)[1] - (qi[1] - 0.125)).abs() < 1e-12);
            assert!((states.left.cell(i)[0] - (qi[0] - 0.25)).abs() < 1e-12);
            assert!((states.left.cell(i)[1] - (qi[1] + 0.125)).abs() < 1e-12);
        }
    }
}
