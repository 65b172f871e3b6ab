//! Grid representation.

mod grid1d;

pub use grid1d::Grid1D;
