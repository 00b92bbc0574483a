//! hp-solver: cycle solver boundary and reference correlation solver.
//!
//! The orchestration layer treats the thermodynamic solver as an opaque
//! collaborator behind the [`CycleSolver`] trait: given a component network
//! and parameters it returns a converged design baseline, or a point solution
//! continued from one, or a non-convergence diagnostic. The built-in
//! [`CorrelationSolver`] is a correlation-based stand-in good enough to drive
//! the full pipeline and its tests.

pub mod correlation;
pub mod error;
pub mod network;
pub mod types;

pub use correlation::CorrelationSolver;
pub use error::{SolverError, SolverResult};
pub use network::NetworkSpec;
pub use types::{
    BoundaryConditions, DesignBaseline, DesignConditions, PerformanceSummary, PointSolution,
};

use hp_params::ComponentKind;
use serde_json::Value;

/// Blocking, CPU-bound cycle solver.
///
/// Implementations must be shareable across sweep workers; cells only read
/// the baseline and the solver.
pub trait CycleSolver: Send + Sync {
    /// Solver identity recorded in persisted baselines.
    fn version(&self) -> &str;

    /// Component vocabulary the linked solver supports. Checked against the
    /// catalog at service construction so mismatches fail at startup.
    fn supported_components(&self) -> &[ComponentKind];

    /// Solve the design point for a network under resolved parameters.
    fn solve_design(
        &self,
        network: &NetworkSpec,
        params: &Value,
    ) -> SolverResult<DesignBaseline>;

    /// Solve one off-design point, numerically anchored on a design baseline.
    fn solve_offdesign(
        &self,
        baseline: &DesignBaseline,
        conditions: BoundaryConditions,
    ) -> SolverResult<PointSolution>;
}
