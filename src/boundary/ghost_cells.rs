//! Single-process ghost-cell filling.

use crate::error::{ConfigError, SolverError};
use crate::solver::Field;

use super::{BoundaryKind, FieldProvider};

/// Per-side boundary conditions for a 1D grid.
///
/// At a wall the ghost cells mirror the interior and the component
/// `wall_momentum` (if set) changes sign. For shallow water (h, hu) and
/// acoustics (p, u) that is component 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostCells {
    lower: BoundaryKind,
    upper: BoundaryKind,
    wall_momentum: Option<usize>,
}

impl GhostCells {
    /// Create boundary conditions, checking that periodicity is two-sided.
    pub fn new(lower: BoundaryKind, upper: BoundaryKind) -> Result<Self, ConfigError> {
        if (lower == BoundaryKind::Periodic) != (upper == BoundaryKind::Periodic) {
            return Err(ConfigError::PeriodicMismatch);
        }
        Ok(Self {
            lower,
            upper,
            wall_momentum: None,
        })
    }

    /// Periodic on both sides.
    pub fn periodic() -> Self {
        Self {
            lower: BoundaryKind::Periodic,
            upper: BoundaryKind::Periodic,
            wall_momentum: None,
        }
    }

    /// Zero-order extrapolation on both sides.
    pub fn extrapolate() -> Self {
        Self {
            lower: BoundaryKind::Extrapolate,
            upper: BoundaryKind::Extrapolate,
            wall_momentum: None,
        }
    }

    /// Walls on both sides, negating component `momentum`.
    pub fn walls(momentum: usize) -> Self {
        Self {
            lower: BoundaryKind::Wall,
            upper: BoundaryKind::Wall,
            wall_momentum: Some(momentum),
        }
    }

    /// Condition at x_lower.
    pub fn lower(&self) -> BoundaryKind {
        self.lower
    }

    /// Condition at x_upper.
    pub fn upper(&self) -> BoundaryKind {
        self.upper
    }

    /// Component negated in wall ghost cells.
    pub fn wall_momentum(&self) -> Option<usize> {
        self.wall_momentum
    }

    /// Set the component negated at walls.
    pub fn with_wall_momentum(mut self, momentum: usize) -> Self {
        self.wall_momentum = Some(momentum);
        self
    }

    fn fill(
        &self,
        q: &Field,
        dimension: usize,
        num_ghost: usize,
        negate: Option<usize>,
    ) -> Result<Field, SolverError> {
        if dimension != 0 {
            return Err(ConfigError::InvalidDimension(dimension).into());
        }
        if let Some(m) = negate
            && m >= q.n_eqn
        {
            return Err(SolverError::dimension_mismatch(
                format!("wall momentum component < {}", q.n_eqn),
                format!("component {m}"),
            ));
        }

        let n = q.n_cells;
        let needs_interior = [self.lower, self.upper]
            .iter()
            .any(|&kind| kind != BoundaryKind::Extrapolate);
        if n == 0 || (needs_interior && n < num_ghost) {
            return Err(SolverError::GridTooSmall {
                cells: n,
                num_ghost,
            });
        }

        let mut out = Field::new(n + 2 * num_ghost, q.n_eqn);
        out.data[num_ghost * q.n_eqn..(num_ghost + n) * q.n_eqn].copy_from_slice(&q.data);

        // k counts outward from the boundary: ghost k sits k + 1 cells outside
        for k in 0..num_ghost {
            let (source, flip) = match self.lower {
                BoundaryKind::Extrapolate => (0, false),
                BoundaryKind::Periodic => (n - 1 - k, false),
                BoundaryKind::Wall => (k, true),
            };
            let ghost = num_ghost - 1 - k;
            out.cell_mut(ghost).copy_from_slice(q.cell(source));
            if flip && let Some(m) = negate {
                let cell = out.cell_mut(ghost);
                cell[m] = -cell[m];
            }

            let (source, flip) = match self.upper {
                BoundaryKind::Extrapolate => (n - 1, false),
                BoundaryKind::Periodic => (k, false),
                BoundaryKind::Wall => (n - 1 - k, true),
            };
            let ghost = num_ghost + n + k;
            out.cell_mut(ghost).copy_from_slice(q.cell(source));
            if flip && let Some(m) = negate {
                let cell = out.cell_mut(ghost);
                cell[m] = -cell[m];
            }
        }

        Ok(out)
    }
}

impl FieldProvider for GhostCells {
    fn ghost_filled(
        &self,
        q: &Field,
        dimension: usize,
        num_ghost: usize,
    ) -> Result<Field, SolverError> {
        self.fill(q, dimension, num_ghost, self.wall_momentum)
    }

    fn ghost_filled_aux(
        &self,
        aux: &Field,
        dimension: usize,
        num_ghost: usize,
    ) -> Result<Field, SolverError> {
        self.fill(aux, dimension, num_ghost, None)
    }
}
