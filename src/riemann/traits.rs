//! Trait-based Riemann solver abstraction.
//!
//! A Riemann solver takes the states on either side of an interface and
//! returns the wave decomposition of the jump together with the left-going
//! and right-going fluctuations (`amdq`, `apdq`) in wave-propagation form.
//!
//! # Example
//! ```
//! use fv_rs::riemann::{Advection, RiemannSolver, WaveFan};
//!
//! let rp = Advection::new(2.0);
//! let mut fan = WaveFan::new(1, rp.num_eqn(), rp.num_waves());
//! rp.solve(&[1.0], &[3.0], None, None, fan.interface_mut(0)).unwrap();
//!
//! assert_eq!(fan.wave(0, 0), &[2.0]);
//! assert_eq!(fan.apdq(0), &[4.0]);
//! assert_eq!(fan.amdq(0), &[0.0]);
//! ```

use crate::error::{RiemannError, SolverError};
use crate::solver::Field;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =============================================================================
// Per-interface output
// =============================================================================

/// Mutable view of the output slots for one interface.
///
/// Layout of `waves` is `[num_waves, num_eqn]`: wave p occupies
/// `waves[p * num_eqn..(p + 1) * num_eqn]`.
#[derive(Debug)]
pub struct InterfaceFan<'a> {
    /// Wave vectors
    pub waves: &'a mut [f64],
    /// Wave speeds, one per family
    pub speeds: &'a mut [f64],
    /// Left-going fluctuation A^- dq
    pub amdq: &'a mut [f64],
    /// Right-going fluctuation A^+ dq
    pub apdq: &'a mut [f64],
}

impl InterfaceFan<'_> {
    /// Mutable wave vector of family p.
    #[inline]
    pub fn wave_mut(&mut self, p: usize) -> &mut [f64] {
        let n = self.amdq.len();
        &mut self.waves[p * n..(p + 1) * n]
    }

    /// Fill `amdq`/`apdq` from the waves and speeds by upwind splitting:
    /// `amdq = sum_p min(s_p, 0) W_p`, `apdq = sum_p max(s_p, 0) W_p`.
    pub fn split_by_speed(&mut self) {
        let n = self.amdq.len();
        self.amdq.fill(0.0);
        self.apdq.fill(0.0);
        for (p, &s) in self.speeds.iter().enumerate() {
            let wave = &self.waves[p * n..(p + 1) * n];
            let (s_minus, s_plus) = (s.min(0.0), s.max(0.0));
            for m in 0..n {
                self.amdq[m] += s_minus * wave[m];
                self.apdq[m] += s_plus * wave[m];
            }
        }
    }
}

// =============================================================================
// Riemann Solver Trait
// =============================================================================

/// Trait for Riemann solvers of 1D hyperbolic systems.
///
/// # Implementation Notes
///
/// - Waves should sum to the jump: sum_p W_p = q_r - q_l
/// - Fluctuations should be conservative: amdq + apdq = f(q_r) - f(q_l)
/// - `solve` writes into the provided slots and should not allocate
/// - Parameters that are constant over the grid (gravity, velocity, ...)
///   live in the implementing struct; spatially varying ones come from aux
///
/// # Extending
///
/// To add a new equation system:
/// 1. Create a struct holding its global parameters
/// 2. Implement `RiemannSolver` for it
pub trait RiemannSolver: Send + Sync {
    /// Number of conserved quantities.
    fn num_eqn(&self) -> usize;

    /// Number of wave families produced per interface.
    fn num_waves(&self) -> usize;

    /// Solve the Riemann problem between `q_l` and `q_r`.
    ///
    /// # Arguments
    /// * `q_l` - State on the left of the interface
    /// * `q_r` - State on the right of the interface
    /// * `aux_l` - Aux parameters on the left (if any)
    /// * `aux_r` - Aux parameters on the right (if any)
    /// * `out` - Slots for waves, speeds and fluctuations
    fn solve(
        &self,
        q_l: &[f64],
        q_r: &[f64],
        aux_l: Option<&[f64]>,
        aux_r: Option<&[f64]>,
        out: InterfaceFan<'_>,
    ) -> Result<(), RiemannError>;

    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;
}

impl<R: RiemannSolver + ?Sized> RiemannSolver for &R {
    fn num_eqn(&self) -> usize {
        (**self).num_eqn()
    }

    fn num_waves(&self) -> usize {
        (**self).num_waves()
    }

    fn solve(
        &self,
        q_l: &[f64],
        q_r: &[f64],
        aux_l: Option<&[f64]>,
        aux_r: Option<&[f64]>,
        out: InterfaceFan<'_>,
    ) -> Result<(), RiemannError> {
        (**self).solve(q_l, q_r, aux_l, aux_r, out)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<R: RiemannSolver + ?Sized> RiemannSolver for Box<R> {
    fn num_eqn(&self) -> usize {
        (**self).num_eqn()
    }

    fn num_waves(&self) -> usize {
        (**self).num_waves()
    }

    fn solve(
        &self,
        q_l: &[f64],
        q_r: &[f64],
        aux_l: Option<&[f64]>,
        aux_r: Option<&[f64]>,
        out: InterfaceFan<'_>,
    ) -> Result<(), RiemannError> {
        (**self).solve(q_l, q_r, aux_l, aux_r, out)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Type alias for boxed Riemann solver (runtime polymorphism).
pub type BoxedRiemannSolver = Box<dyn RiemannSolver>;

/// Reject NaN/infinite states before they reach a solver.
#[inline]
pub(crate) fn check_finite(q_l: &[f64], q_r: &[f64]) -> Result<(), RiemannError> {
    if q_l.iter().chain(q_r.iter()).all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RiemannError::NonFinite)
    }
}

// =============================================================================
// Wave fan over a row of interfaces
// =============================================================================

/// Riemann solutions for a row of interfaces.
#[derive(Clone, Debug)]
pub struct WaveFan {
    /// Number of interfaces
    pub n_interfaces: usize,
    /// Number of conserved quantities
    pub num_eqn: usize,
    /// Number of wave families
    pub num_waves: usize,
    /// Waves, layout [n_interfaces, num_waves, num_eqn]
    pub waves: Vec<f64>,
    /// Speeds, layout [n_interfaces, num_waves]
    pub speeds: Vec<f64>,
    /// Left-going fluctuations, layout [n_interfaces, num_eqn]
    pub amdq: Vec<f64>,
    /// Right-going fluctuations, layout [n_interfaces, num_eqn]
    pub apdq: Vec<f64>,
}

impl WaveFan {
    /// Allocate a zeroed fan.
    pub fn new(n_interfaces: usize, num_eqn: usize, num_waves: usize) -> Self {
        Self {
            n_interfaces,
            num_eqn,
            num_waves,
            waves: vec![0.0; n_interfaces * num_waves * num_eqn],
            speeds: vec![0.0; n_interfaces * num_waves],
            amdq: vec![0.0; n_interfaces * num_eqn],
            apdq: vec![0.0; n_interfaces * num_eqn],
        }
    }

    /// Output slots of interface j.
    pub fn interface_mut(&mut self, j: usize) -> InterfaceFan<'_> {
        let (me, mw) = (self.num_eqn, self.num_waves);
        InterfaceFan {
            waves: &mut self.waves[j * mw * me..(j + 1) * mw * me],
            speeds: &mut self.speeds[j * mw..(j + 1) * mw],
            amdq: &mut self.amdq[j * me..(j + 1) * me],
            apdq: &mut self.apdq[j * me..(j + 1) * me],
        }
    }

    /// Wave of family p at interface j.
    #[inline]
    pub fn wave(&self, j: usize, p: usize) -> &[f64] {
        let me = self.num_eqn;
        let start = (j * self.num_waves + p) * me;
        &self.waves[start..start + me]
    }

    /// Speed of family p at interface j.
    #[inline]
    pub fn speed(&self, j: usize, p: usize) -> f64 {
        self.speeds[j * self.num_waves + p]
    }

    /// Left-going fluctuation at interface j.
    #[inline]
    pub fn amdq(&self, j: usize) -> &[f64] {
        &self.amdq[j * self.num_eqn..(j + 1) * self.num_eqn]
    }

    /// Right-going fluctuation at interface j.
    #[inline]
    pub fn apdq(&self, j: usize) -> &[f64] {
        &self.apdq[j * self.num_eqn..(j + 1) * self.num_eqn]
    }
}

// =============================================================================
// Interface sweep
// =============================================================================

/// Pairing of states for a sweep of Riemann problems.
///
/// Problem j takes its left state from `left.cell(j)` and its right state
/// from `right.cell(j + shift)`; aux follows the same indices.
///
/// - `shift = 1` pairs adjacent cells (interfaces between cells)
/// - `shift = 0` pairs the two edge values of the same cell
#[derive(Clone, Copy, Debug)]
pub struct RiemannPairs<'a> {
    /// Source of left states
    pub left: &'a Field,
    /// Source of right states
    pub right: &'a Field,
    /// Offset of the right index relative to the left index
    pub shift: usize,
    /// Aux parameters aligned with `left`/`right`
    pub aux: Option<&'a Field>,
}

impl<'a> RiemannPairs<'a> {
    /// Adjacent-cell pairs: (left[j], right[j + 1]).
    pub fn adjacent(left: &'a Field, right: &'a Field, aux: Option<&'a Field>) -> Self {
        Self {
            left,
            right,
            shift: 1,
            aux,
        }
    }

    /// Same-cell pairs: (left[i], right[i]).
    pub fn within_cells(left: &'a Field, right: &'a Field, aux: Option<&'a Field>) -> Self {
        Self {
            left,
            right,
            shift: 0,
            aux,
        }
    }

    /// Number of Riemann problems in the sweep.
    pub fn len(&self) -> usize {
        self.left.n_cells.min(self.right.n_cells).saturating_sub(self.shift)
    }

    /// Whether the sweep is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn solve_one<R: RiemannSolver + ?Sized>(
        &self,
        rp: &R,
        j: usize,
        out: InterfaceFan<'_>,
    ) -> Result<(), SolverError> {
        let (aux_l, aux_r) = match self.aux {
            Some(aux) => (Some(aux.cell(j)), Some(aux.cell(j + self.shift))),
            None => (None, None),
        };
        rp.solve(
            self.left.cell(j),
            self.right.cell(j + self.shift),
            aux_l,
            aux_r,
            out,
        )
        .map_err(|source| SolverError::Riemann {
            interface: j,
            source,
        })
    }
}

/// Solve every Riemann problem of a sweep.
///
/// With the `parallel` feature the interfaces are solved concurrently;
/// each problem writes to its own disjoint chunk of the fan.
pub fn solve_interfaces<R: RiemannSolver + ?Sized>(
    rp: &R,
    pairs: &RiemannPairs<'_>,
) -> Result<WaveFan, SolverError> {
    let (me, mw) = (rp.num_eqn(), rp.num_waves());
    if pairs.left.n_eqn != me || pairs.right.n_eqn != me {
        return Err(SolverError::dimension_mismatch(
            format!("{} equations ({})", me, rp.name()),
            format!("{} equations", pairs.left.n_eqn),
        ));
    }

    let n = pairs.len();
    let mut fan = WaveFan::new(n, me, mw);
    if n == 0 {
        return Ok(fan);
    }

    #[cfg(not(feature = "parallel"))]
    {
        for j in 0..n {
            pairs.solve_one(rp, j, fan.interface_mut(j))?;
        }
    }

    #[cfg(feature = "parallel")]
    {
        let WaveFan {
            waves,
            speeds,
            amdq,
            apdq,
            ..
        } = &mut fan;
        waves
            .par_chunks_mut(mw * me)
            .zip(speeds.par_chunks_mut(mw))
            .zip(amdq.par_chunks_mut(me))
            .zip(apdq.par_chunks_mut(me))
            .enumerate()
            .try_for_each(|(j, (((waves, speeds), amdq), apdq))| {
                let out = InterfaceFan {
                    waves,
                    speeds,
                    amdq,
                    apdq,
                };
                pairs.solve_one(rp, j, out)
            })?;
    }

    Ok(fan)
}
