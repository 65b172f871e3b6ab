//! Homogeneous stage increment in wave-propagation form.
//!
//! Indexing on a ghost-filled array of `local_n` cells with `mbc` ghost
//! cells per side. Interface j sits between cells j and j+1:
//!
//! ```text
//!        j-1         j         j+1
//!         |          |          |
//!         |   cell j |  cell j+1|
//!         |          |          |
//! ```
//!
//! For every cell i the increment collects the left-going fluctuation from
//! its right interface, the right-going fluctuation from its left interface
//! and the total fluctuation inside the cell between its reconstructed edge
//! values:
//!
//! dq_i = -dt/(kappa_i dx) (A^- dq_{i} + A^+ dq_{i-1} + A dq_i^{cell})

use crate::error::{ConfigError, SolverError};
use crate::reconstruction::reconstruct;
use crate::riemann::{RiemannPairs, RiemannSolver, WaveFan, solve_interfaces};

use super::{Field, SolverConfig};

/// Increment and CFL number of one stage.
#[derive(Clone, Debug, PartialEq)]
pub struct StageIncrement {
    /// dq on the physical cells, already multiplied by dt
    pub dq: Field,
    /// CFL number measured in the stage
    pub cfl: f64,
}

/// Local dt/dx for every cell of a ghost-filled array.
///
/// With a capacity component `kappa` in aux, `dtdx[i] = dt / (dx * kappa[i])`;
/// `kappa` must be positive and finite.
pub fn dtdx(
    local_n: usize,
    dt: f64,
    dx: f64,
    aux: Option<&Field>,
    capacity_index: Option<usize>,
) -> Result<Vec<f64>, SolverError> {
    match capacity_index {
        None => Ok(vec![dt / dx; local_n]),
        Some(index) => {
            let aux = aux.ok_or(ConfigError::MissingAux(index))?;
            if index >= aux.n_eqn {
                return Err(ConfigError::CapacityOutOfRange {
                    index,
                    n_aux: aux.n_eqn,
                }
                .into());
            }
            (0..local_n)
                .map(|i| {
                    let kappa = aux.cell(i)[index];
                    if kappa > 0.0 && kappa.is_finite() {
                        Ok(dt / (dx * kappa))
                    } else {
                        Err(ConfigError::InvalidCapacity {
                            cell: i,
                            value: kappa,
                        }
                        .into())
                    }
                })
                .collect()
        }
    }
}

/// CFL number from the speeds of the interface sweep.
///
/// Every wave leaving an interface is measured against the cell it enters:
/// `max(dtdx[i] * s_{i-1}, -dtdx[i-1] * s_{i-1})` over all families and
/// `i in mbc-1 .. local_n-mbc+1`. Never negative.
pub fn cfl_number(fan: &WaveFan, dtdx: &[f64], num_ghost: usize) -> f64 {
    let local_n = dtdx.len();
    let lower = num_ghost - 1;
    let upper = local_n + 1 - num_ghost;

    let mut cfl: f64 = 0.0;
    for p in 0..fan.num_waves {
        for i in lower..upper {
            let s = fan.speed(i - 1, p);
            cfl = cfl.max(dtdx[i] * s).max(-dtdx[i - 1] * s);
        }
    }
    cfl
}

/// Increment of the homogeneous problem on a ghost-filled field.
///
/// # Arguments
/// * `q` - Ghost-filled state, `n + 2 * num_ghost` cells
/// * `aux` - Ghost-filled aux aligned with `q`
/// * `dx` - Grid spacing
/// * `dt` - Time step
/// * `config` - Reconstruction, ghost width and capacity settings
/// * `rp` - Riemann solver
///
/// # Returns
/// dq on the `n` physical cells and the stage CFL number. The input is not
/// modified.
pub fn homogeneous_increment<R: RiemannSolver + ?Sized>(
    q: &Field,
    aux: Option<&Field>,
    dx: f64,
    dt: f64,
    config: &SolverConfig,
    rp: &R,
) -> Result<StageIncrement, SolverError> {
    let mbc = config.num_ghost;
    let local_n = q.n_cells;
    if mbc < 2 || local_n <= 2 * (mbc + 1) {
        return Err(SolverError::GridTooSmall {
            cells: local_n.saturating_sub(2 * mbc),
            num_ghost: mbc,
        });
    }
    if let Some(aux) = aux
        && aux.n_cells != local_n
    {
        return Err(SolverError::dimension_mismatch(
            format!("{local_n} aux cells"),
            format!("{} aux cells", aux.n_cells),
        ));
    }

    let dtdx = dtdx(local_n, dt, dx, aux, config.capacity_index)?;

    let states = reconstruct(
        q,
        aux,
        config.reconstruction,
        config.char_decomposition,
        rp,
        mbc,
    )?;

    // Interface j: right edge of cell j against left edge of cell j+1
    let flux = solve_interfaces(rp, &RiemannPairs::adjacent(&states.right, &states.left, aux))?;
    let cfl = cfl_number(&flux, &dtdx, mbc);

    // Total fluctuation inside each cell
    let total = solve_interfaces(
        rp,
        &RiemannPairs::within_cells(&states.left, &states.right, aux),
    )?;

    let n = local_n - 2 * mbc;
    let me = q.n_eqn;
    let mut dq = Field::new(n, me);
    for (k, i) in (mbc..local_n - mbc).enumerate() {
        let (amdq, apdq_left) = (flux.amdq(i), flux.apdq(i - 1));
        let (amdq_cell, apdq_cell) = (total.amdq(i), total.apdq(i));
        let out = dq.cell_mut(k);
        for m in 0..me {
            out[m] = -dtdx[i] * (amdq[m] + apdq_left[m] + apdq_cell[m] + amdq_cell[m]);
        }
    }

    Ok(StageIncrement { dq, cfl })
}
