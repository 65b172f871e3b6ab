//! High-order reconstruction of interface states from cell averages.
//!
//! For every cell i the reconstruction produces two edge values:
//! `left[i]` at x_{i-1/2} and `right[i]` at x_{i+1/2}. The Riemann problem
//! at interface i+1/2 is then posed between `right[i]` and `left[i+1]`.
//!
//! Modes also convert from the numeric `lim_type` / `char_decomp` codes used
//! by existing run configurations:
//!
//! | `ReconstructionMode` | code | | `CharDecomposition` | code |
//! |---|---|---|---|---|
//! | `Unlimited` | 0 | | `None` | 0 |
//! | `Tvd` | 1 | | `WaveBased` | 1 |
//! | `Weno5` | 2 | | `Characteristic` | 2 |

mod weno;

pub use weno::{WENO_EPSILON, weno5, weno5_wave};

use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, SolverError};
use crate::riemann::RiemannSolver;
use crate::solver::Field;

/// Ghost cells needed on each side by WENO5.
pub const WENO5_GHOST_CELLS: usize = 3;

// =============================================================================
// Modes
// =============================================================================

/// Reconstruction scheme (the `lim_type` code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReconstructionMode {
    /// Unlimited polynomial reconstruction (not available)
    Unlimited,
    /// TVD slope-limited reconstruction (not available)
    Tvd,
    /// Fifth-order weighted essentially non-oscillatory
    #[default]
    Weno5,
}

impl ReconstructionMode {
    /// Ghost cells needed on each side of the grid.
    pub fn required_ghost_cells(&self) -> usize {
        match self {
            ReconstructionMode::Weno5 => WENO5_GHOST_CELLS,
            ReconstructionMode::Unlimited | ReconstructionMode::Tvd => 2,
        }
    }

    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            ReconstructionMode::Unlimited => "unlimited",
            ReconstructionMode::Tvd => "tvd",
            ReconstructionMode::Weno5 => "weno5",
        }
    }
}

impl fmt::Display for ReconstructionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ReconstructionMode {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReconstructionMode::Unlimited),
            1 => Ok(ReconstructionMode::Tvd),
            2 => Ok(ReconstructionMode::Weno5),
            _ => Err(ConfigError::UnknownReconstruction(value.to_string())),
        }
    }
}

impl FromStr for ReconstructionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unlimited" => Ok(ReconstructionMode::Unlimited),
            "tvd" => Ok(ReconstructionMode::Tvd),
            "weno5" | "weno" => Ok(ReconstructionMode::Weno5),
            _ => Err(ConfigError::UnknownReconstruction(s.to_string())),
        }
    }
}

/// How WENO is applied to systems (the `char_decomp` code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CharDecomposition {
    /// Component-wise on the conserved variables
    #[default]
    None,
    /// Along the waves of a preliminary Riemann sweep
    WaveBased,
    /// Characteristic-wise. Incomplete: interface states equal the cell
    /// averages, which gives a first-order Godunov update.
    Characteristic,
}

impl CharDecomposition {
    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            CharDecomposition::None => "none",
            CharDecomposition::WaveBased => "wave",
            CharDecomposition::Characteristic => "characteristic",
        }
    }
}

impl fmt::Display for CharDecomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for CharDecomposition {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CharDecomposition::None),
            1 => Ok(CharDecomposition::WaveBased),
            2 => Ok(CharDecomposition::Characteristic),
            _ => Err(ConfigError::UnknownCharDecomposition(value.to_string())),
        }
    }
}

impl FromStr for CharDecomposition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(CharDecomposition::None),
            "wave" | "wave-based" => Ok(CharDecomposition::WaveBased),
            "characteristic" => Ok(CharDecomposition::Characteristic),
            _ => Err(ConfigError::UnknownCharDecomposition(s.to_string())),
        }
    }
}

// =============================================================================
// Reconstruction
// =============================================================================

/// Reconstructed edge values, same shape as the input field.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceStates {
    /// Value at the left edge of each cell
    pub left: Field,
    /// Value at the right edge of each cell
    pub right: Field,
}

/// Reconstruct left/right edge values of every cell of a ghost-filled field.
///
/// The Riemann solver is only used by the wave-based decomposition.
///
/// # Errors
/// - `Unimplemented` for the unlimited and TVD modes
/// - `TooFewGhostCells` if WENO5 is run with fewer than three ghost cells
pub fn reconstruct<R: RiemannSolver + ?Sized>(
    q: &Field,
    aux: Option<&Field>,
    mode: ReconstructionMode,
    decomposition: CharDecomposition,
    rp: &R,
    num_ghost: usize,
) -> Result<InterfaceStates, SolverError> {
    match mode {
        ReconstructionMode::Unlimited => Err(SolverError::Unimplemented("unlimited reconstruction")),
        ReconstructionMode::Tvd => Err(SolverError::Unimplemented("TVD reconstruction")),
        ReconstructionMode::Weno5 => {
            if num_ghost < WENO5_GHOST_CELLS {
                return Err(ConfigError::TooFewGhostCells {
                    scheme: mode.name(),
                    required: WENO5_GHOST_CELLS,
                    actual: num_ghost,
                }
                .into());
            }
            match decomposition {
                CharDecomposition::None => Ok(weno5(q)),
                CharDecomposition::WaveBased => weno5_wave(q, aux, rp),
                CharDecomposition::Characteristic => Ok(InterfaceStates {
                    left: q.clone(),
                    right: q.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riemann::Advection;

    #[test]
    fn test_mode_codes() {
        assert_eq!(ReconstructionMode::try_from(2).unwrap(), ReconstructionMode::Weno5);
        assert_eq!(CharDecomposition::try_from(1).unwrap(), CharDecomposition::WaveBased);
        assert_eq!(
            ReconstructionMode::try_from(7).unwrap_err(),
            ConfigError::UnknownReconstruction("7".into())
        );
        assert!(CharDecomposition::try_from(3).is_err());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("WENO5".parse::<ReconstructionMode>().unwrap(), ReconstructionMode::Weno5);
        assert_eq!(
            "characteristic".parse::<CharDecomposition>().unwrap(),
            CharDecomposition::Characteristic
        );
        assert!("ppm".parse::<ReconstructionMode>().is_err());
    }

    #[test]
    fn test_unimplemented_modes() {
        let q = Field::constant(10, &[1.0]);
        let rp = Advection::new(1.0);
        for mode in [ReconstructionMode::Unlimited, ReconstructionMode::Tvd] {
            let err = reconstruct(&q, None, mode, CharDecomposition::None, &rp, 3).unwrap_err();
            assert!(matches!(err, SolverError::Unimplemented(_)));
        }
    }

    #[test]
    fn test_characteristic_passes_through() {
        let q = Field::from_fn(10, 1, |i, s| s[0] = (i as f64).sqrt());
        let rp = Advection::new(1.0);
        let states = reconstruct(
            &q,
            None,
            ReconstructionMode::Weno5,
            CharDecomposition::Characteristic,
            &rp,
            3,
        )
        .unwrap();
        assert_eq!(states.left, q);
        assert_eq!(states.right, q);
    }

    #[test]
    fn test_weno5_needs_three_ghost_cells() {
        let q = Field::constant(10, &[1.0]);
        let rp = Advection::new(1.0);
        let err = reconstruct(
            &q,
            None,
            ReconstructionMode::Weno5,
            CharDecomposition::None,
            &rp,
            2,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SolverError::Config(ConfigError::TooFewGhostCells {
                scheme: "weno5",
                required: 3,
                actual: 2,
            })
        );
    }
}
