//! Results of stage and step evaluations.
//!
//! A CFL violation is an expected event in a variable time-step run, so it
//! is a variant of the result rather than an error.

/// A stage or step refused because the CFL limit was reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rejection {
    /// CFL number measured in the refused stage
    pub cfl: f64,
    /// Limit that was reached
    pub cfl_max: f64,
}

/// Result of a single stage evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum StageOutcome<S> {
    /// Increment dq (already multiplied by dt) and the stage CFL number
    Accepted { increment: S, cfl: f64 },
    /// CFL limit reached; no increment was produced
    Rejected(Rejection),
}

impl<S> StageOutcome<S> {
    /// Whether the stage produced an increment.
    pub fn is_accepted(&self) -> bool {
        matches!(self, StageOutcome::Accepted { .. })
    }

    /// CFL number measured in the stage.
    pub fn cfl(&self) -> f64 {
        match self {
            StageOutcome::Accepted { cfl, .. } => *cfl,
            StageOutcome::Rejected(rejection) => rejection.cfl,
        }
    }

    /// The increment, if the stage was accepted.
    pub fn into_increment(self) -> Option<S> {
        match self {
            StageOutcome::Accepted { increment, .. } => Some(increment),
            StageOutcome::Rejected(_) => None,
        }
    }
}

/// Result of a full time step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// State advanced; `cfl` is the largest stage CFL number
    Accepted { cfl: f64 },
    /// State left untouched
    Rejected(Rejection),
}

impl StepOutcome {
    /// Whether the state was advanced.
    pub fn is_accepted(&self) -> bool {
        matches!(self, StepOutcome::Accepted { .. })
    }

    /// CFL number of the step (of the refused stage when rejected).
    pub fn cfl(&self) -> f64 {
        match self {
            StepOutcome::Accepted { cfl } => *cfl,
            StepOutcome::Rejected(rejection) => rejection.cfl,
        }
    }
}
