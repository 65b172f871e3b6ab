//! Time integration methods.

mod integrator;
mod outcome;

pub use integrator::{
    BoxedIntegratorInfo, ForwardEuler, Integrable, IntegratorInfo, SspRk3, TimeIntegrator,
    TimeIntegratorKind, create_integrator_info,
};
pub use outcome::{Rejection, StageOutcome, StepOutcome};
