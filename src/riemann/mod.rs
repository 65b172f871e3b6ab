//! Riemann solvers in wave-propagation form.
//!
//! Every solver decomposes the jump between two states into waves and
//! splits it into left-going and right-going fluctuations:
//! - [`Advection`]: scalar linear advection
//! - [`Burgers`]: inviscid Burgers with a transonic entropy fix
//! - [`Acoustics`]: linear acoustics (pressure, velocity)
//! - [`ShallowWaterRoe`]: shallow water with Roe averages
//!
//! [`solve_interfaces`] runs a solver over a whole row of interfaces and is
//! shared by the wave-based reconstruction and the flux assembler.

mod acoustics;
mod advection;
mod burgers;
mod shallow_water;
pub mod traits;

pub use acoustics::Acoustics;
pub use advection::Advection;
pub use burgers::Burgers;
pub use shallow_water::ShallowWaterRoe;
pub use traits::{
    BoxedRiemannSolver, InterfaceFan, RiemannPairs, RiemannSolver, WaveFan, solve_interfaces,
};
