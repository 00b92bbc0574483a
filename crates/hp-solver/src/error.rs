//! Error types for solver operations.

use hp_params::ComponentKind;
use thiserror::Error;

/// Errors surfaced across the solver boundary.
///
/// `NonConvergence` and `NonPhysical` mark a single solve attempt as failed
/// and are absorbed by callers (design failure, or one non-converged sweep
/// cell). The remaining variants mean the problem was never well-posed and
/// escalate.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Solver did not converge: {what}")]
    NonConvergence { what: String },

    #[error("Physically invalid state: {what}")]
    NonPhysical { what: String },

    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Unsupported component: {0}")]
    UnsupportedComponent(ComponentKind),
}

impl SolverError {
    /// Whether this error marks one solve attempt as failed rather than the
    /// solver layer as unusable.
    pub fn is_cell_failure(&self) -> bool {
        matches!(
            self,
            SolverError::NonConvergence { .. } | SolverError::NonPhysical { .. }
        )
    }
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<hp_core::CoreError> for SolverError {
    fn from(e: hp_core::CoreError) -> Self {
        SolverError::NonPhysical {
            what: e.to_string(),
        }
    }
}
