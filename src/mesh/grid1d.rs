//! Uniform 1D finite-volume grid.
//!
//! A grid is a partition of an interval [x_lower, x_upper] into `n_cells`
//! cells of equal width `dx`. Ghost cells are not part of the grid; they are
//! added by a [`FieldProvider`](crate::boundary::FieldProvider) before each stage.

use crate::error::ConfigError;

/// Uniform grid of an interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid1D {
    /// Left endpoint of domain
    pub x_lower: f64,
    /// Right endpoint of domain
    pub x_upper: f64,
    /// Number of physical cells
    pub n_cells: usize,
}

impl Grid1D {
    /// Create a uniform grid of [x_lower, x_upper] with n_cells cells.
    pub fn uniform(x_lower: f64, x_upper: f64, n_cells: usize) -> Result<Self, ConfigError> {
        if n_cells == 0 || !(x_upper > x_lower) || !(x_upper - x_lower).is_finite() {
            return Err(ConfigError::InvalidSpacing(
                (x_upper - x_lower) / n_cells.max(1) as f64,
            ));
        }
        Ok(Self {
            x_lower,
            x_upper,
            n_cells,
        })
    }

    /// Cell width.
    pub fn dx(&self) -> f64 {
        (self.x_upper - self.x_lower) / self.n_cells as f64
    }

    /// Get total domain length.
    pub fn length(&self) -> f64 {
        self.x_upper - self.x_lower
    }

    /// Centre of cell i.
    pub fn center(&self, i: usize) -> f64 {
        self.x_lower + (i as f64 + 0.5) * self.dx()
    }

    /// Left edge of cell i.
    pub fn lower_edge(&self, i: usize) -> f64 {
        self.x_lower + i as f64 * self.dx()
    }

    /// All cell centres.
    pub fn centers(&self) -> Vec<f64> {
        (0..self.n_cells).map(|i| self.center(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_grid() {
        let grid = Grid1D::uniform(0.0, 2.0, 8).unwrap();
        assert!((grid.dx() - 0.25).abs() < 1e-14);
        assert!((grid.center(0) - 0.125).abs() < 1e-14);
        assert!((grid.lower_edge(8) - 2.0).abs() < 1e-14);
        assert_eq!(grid.centers().len(), 8);
    }

    #[test]
    fn test_invalid_grid() {
        assert!(Grid1D::uniform(1.0, 0.0, 10).is_err());
        assert!(Grid1D::uniform(0.0, 1.0, 0).is_err());
        assert!(Grid1D::uniform(0.0, f64::INFINITY, 4).is_err());
    }
}
