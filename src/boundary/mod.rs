//! Ghost-cell boundary conditions.
//!
//! The stage evaluator never reads past the physical cells itself: it asks a
//! [`FieldProvider`] for a copy of the field padded with `num_ghost` cells on
//! each side. In a distributed setting the provider would exchange halos
//! with neighbouring processes; [`GhostCells`] is the single-process
//! implementation driven by per-side boundary kinds.
//!
//! # Available Boundary Conditions
//!
//! | Kind | Code | Ghost values |
//! |------|------|--------------|
//! | `Extrapolate` | 1 | Copy of the nearest physical cell |
//! | `Periodic` | 2 | Cells from the opposite end |
//! | `Wall` | 3 | Mirror image, normal momentum negated |

mod ghost_cells;

pub use ghost_cells::GhostCells;

use std::str::FromStr;

use crate::error::{ConfigError, SolverError};
use crate::solver::Field;

/// Boundary condition on one side of a 1D grid (the `mthbc` code).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Zero-order extrapolation
    Extrapolate,
    /// Periodic wrap-around
    Periodic,
    /// Solid wall
    Wall,
}

impl TryFrom<u8> for BoundaryKind {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BoundaryKind::Extrapolate),
            2 => Ok(BoundaryKind::Periodic),
            3 => Ok(BoundaryKind::Wall),
            _ => Err(ConfigError::UnknownBoundary(value.to_string())),
        }
    }
}

impl FromStr for BoundaryKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "extrapolate" | "extrap" | "outflow" => Ok(BoundaryKind::Extrapolate),
            "periodic" => Ok(BoundaryKind::Periodic),
            "wall" | "reflective" => Ok(BoundaryKind::Wall),
            _ => Err(ConfigError::UnknownBoundary(s.to_string())),
        }
    }
}

/// Supplier of ghost-filled local copies of a field.
///
/// Implementations must return `q.n_cells + 2 * num_ghost` cells with the
/// physical cells unchanged at offsets `num_ghost..num_ghost + q.n_cells`.
pub trait FieldProvider: Send + Sync {
    /// Ghost-filled copy of the conserved field along `dimension`.
    fn ghost_filled(
        &self,
        q: &Field,
        dimension: usize,
        num_ghost: usize,
    ) -> Result<Field, SolverError>;

    /// Ghost-filled copy of the aux field along `dimension`.
    ///
    /// Defaults to the conserved-field fill.
    fn ghost_filled_aux(
        &self,
        aux: &Field,
        dimension: usize,
        num_ghost: usize,
    ) -> Result<Field, SolverError> {
        self.ghost_filled(aux, dimension, num_ghost)
    }
}
