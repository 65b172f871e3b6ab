//! Solution container: grid, conserved field, aux field and time.

use crate::error::SolverError;
use crate::mesh::Grid1D;

use super::Field;

/// Solution on a 1D grid.
///
/// `q` and `aux` hold physical cells only; ghost cells are produced by the
/// field provider for each stage and never stored here.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The grid the solution lives on
    pub grid: Grid1D,
    /// Conserved quantities, one state vector per cell
    pub q: Field,
    /// Optional auxiliary parameters per cell
    pub aux: Option<Field>,
    /// Current time
    pub t: f64,
}

impl Solution {
    /// Create a zero solution with n_eqn conserved quantities at t = 0.
    pub fn new(grid: Grid1D, n_eqn: usize) -> Self {
        Self {
            grid,
            q: Field::new(grid.n_cells, n_eqn),
            aux: None,
            t: 0.0,
        }
    }

    /// Create a solution from an existing field.
    pub fn from_field(grid: Grid1D, q: Field) -> Result<Self, SolverError> {
        if q.n_cells != grid.n_cells {
            return Err(SolverError::dimension_mismatch(
                format!("{} cells", grid.n_cells),
                format!("{} cells", q.n_cells),
            ));
        }
        Ok(Self {
            grid,
            q,
            aux: None,
            t: 0.0,
        })
    }

    /// Attach an auxiliary field.
    pub fn with_aux(mut self, aux: Field) -> Result<Self, SolverError> {
        if aux.n_cells != self.grid.n_cells {
            return Err(SolverError::dimension_mismatch(
                format!("{} aux cells", self.grid.n_cells),
                format!("{} aux cells", aux.n_cells),
            ));
        }
        self.aux = Some(aux);
        Ok(self)
    }

    /// Set the starting time.
    pub fn with_time(mut self, t: f64) -> Self {
        self.t = t;
        self
    }

    /// Set the solution from a function of the cell centre.
    ///
    /// `f(x, state)` fills the state vector at position x.
    pub fn set_from_function<F>(&mut self, f: F)
    where
        F: Fn(f64, &mut [f64]),
    {
        for i in 0..self.grid.n_cells {
            let x = self.grid.center(i);
            f(x, self.q.cell_mut(i));
        }
    }

    /// Number of conserved quantities.
    pub fn n_eqn(&self) -> usize {
        self.q.n_eqn
    }
}
