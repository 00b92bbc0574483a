//! Solver boundary data types.

use serde::{Deserialize, Serialize};

/// Boundary conditions the design point was solved at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DesignConditions {
    pub source_temp_c: f64,
    pub sink_temp_c: f64,
    pub heat_demand_w: f64,
}

/// Headline performance numbers of a converged solution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub cop: f64,
    pub heat_output_w: f64,
    pub power_input_w: f64,
    /// Exergetic efficiency.
    pub epsilon: f64,
}

/// A converged design-point solution: the numerical anchor every off-design
/// continuation starts from. Immutable once written to the Design State
/// Store; a changed configuration produces a new baseline under a new
/// signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignBaseline {
    pub topology_key: String,
    pub refrigerants: Vec<String>,
    pub design: DesignConditions,
    pub summary: PerformanceSummary,
    /// Opaque converged state vector owned by the solver.
    pub state: Vec<f64>,
    pub solver_version: String,
    pub created_at: String,
}

/// One off-design grid cell's boundary conditions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundaryConditions {
    pub source_temp_c: f64,
    pub sink_temp_c: f64,
    pub load_ratio: f64,
}

/// Converged result for one off-design point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointSolution {
    pub cop: f64,
    pub heat_output_w: f64,
    pub power_input_w: f64,
    pub epsilon: f64,
}
