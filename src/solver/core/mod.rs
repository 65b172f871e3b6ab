//! Core solution containers.

mod field;
mod solution;

pub use field::Field;
pub use solution::Solution;
