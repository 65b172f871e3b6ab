//! Cell-averaged field storage for 1D finite-volume problems.

use crate::error::SolverError;

/// Cell-averaged state vectors on a 1D grid.
///
/// Stores `n_eqn` values per cell in a contiguous array with layout
/// `[n_cells, n_eqn]`. Access via `cell(i)` to get the state vector of cell i.
///
/// The same type holds the physical solution, ghost-filled local arrays,
/// reconstructed interface states, auxiliary parameters and increments.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Values, stored as data[i * n_eqn + m] for cell i, component m
    pub data: Vec<f64>,
    /// Number of cells
    pub n_cells: usize,
    /// Number of components per cell
    pub n_eqn: usize,
}

impl Field {
    /// Create a new field initialized to zero.
    pub fn new(n_cells: usize, n_eqn: usize) -> Self {
        Self {
            data: vec![0.0; n_cells * n_eqn],
            n_cells,
            n_eqn,
        }
    }

    /// Create a field with the same state vector in every cell.
    pub fn constant(n_cells: usize, state: &[f64]) -> Self {
        let n_eqn = state.len();
        let mut data = Vec::with_capacity(n_cells * n_eqn);
        for _ in 0..n_cells {
            data.extend_from_slice(state);
        }
        Self {
            data,
            n_cells,
            n_eqn,
        }
    }

    /// Wrap existing data, checking that it matches the shape.
    pub fn from_vec(data: Vec<f64>, n_cells: usize, n_eqn: usize) -> Result<Self, SolverError> {
        if data.len() != n_cells * n_eqn {
            return Err(SolverError::dimension_mismatch(
                format!("{} values ({} cells x {} eqns)", n_cells * n_eqn, n_cells, n_eqn),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self {
            data,
            n_cells,
            n_eqn,
        })
    }

    /// Build a field cell by cell.
    ///
    /// `f(i, state)` fills the state vector of cell i.
    pub fn from_fn<F>(n_cells: usize, n_eqn: usize, mut f: F) -> Self
    where
        F: FnMut(usize, &mut [f64]),
    {
        let mut field = Self::new(n_cells, n_eqn);
        for i in 0..n_cells {
            f(i, field.cell_mut(i));
        }
        field
    }

    /// Get the state vector of cell i.
    #[inline]
    pub fn cell(&self, i: usize) -> &[f64] {
        let start = i * self.n_eqn;
        &self.data[start..start + self.n_eqn]
    }

    /// Get the mutable state vector of cell i.
    #[inline]
    pub fn cell_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.n_eqn;
        &mut self.data[start..start + self.n_eqn]
    }

    /// Whether two fields have the same shape.
    pub fn same_shape(&self, other: &Field) -> bool {
        self.n_cells == other.n_cells && self.n_eqn == other.n_eqn
    }

    /// Scale all values by a constant.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }

    /// Add c * other to self (axpy operation).
    pub fn axpy(&mut self, c: f64, other: &Field) {
        assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += c * *b;
        }
    }

    /// Add other to self.
    pub fn add(&mut self, other: &Field) {
        self.axpy(1.0, other);
    }

    /// Get maximum absolute value.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }

    /// Sum of component m over all cells.
    pub fn component_sum(&self, m: usize) -> f64 {
        (0..self.n_cells).map(|i| self.cell(i)[m]).sum()
    }

    /// Whether every value is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_storage() {
        let mut q = Field::new(4, 2);
        assert_eq!(q.data.len(), 8);

        q.cell_mut(0)[0] = 1.0;
        q.cell_mut(0)[1] = 2.0;
        q.cell_mut(3)[1] = 3.0;

        assert_eq!(q.cell(0), &[1.0, 2.0]);
        assert_eq!(q.cell(3), &[0.0, 3.0]);
    }

    #[test]
    fn test_axpy() {
        let mut a = Field::constant(3, &[1.0]);
        let b = Field::constant(3, &[2.0]);

        a.axpy(0.5, &b); // a = 1 + 0.5 * 2 = 2

        for &v in &a.data {
            assert!((v - 2.0).abs() < 1e-14);
        }
    }

    #[test]
    fn test_from_vec_shape_check() {
        assert!(Field::from_vec(vec![0.0; 6], 3, 2).is_ok());
        let err = Field::from_vec(vec![0.0; 5], 3, 2).unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_component_sum() {
        let q = Field::from_fn(4, 2, |i, s| {
            s[0] = 1.0;
            s[1] = i as f64;
        });
        assert!((q.component_sum(0) - 4.0).abs() < 1e-14);
        assert!((q.component_sum(1) - 6.0).abs() < 1e-14);
    }
}
