//! Result aggregation with partial-failure semantics.

use hp_solver::{DesignBaseline, PerformanceSummary};
use hp_sweep::OperatingPoint;
use serde::{Deserialize, Serialize};

/// Outcome of the design point driver. A failed design is terminal: no
/// off-design or part-load step runs without a converged anchor.
#[derive(Debug, Clone)]
pub enum DesignOutcome {
    Converged(DesignBaseline),
    Failed { message: String },
}

/// Response of a design-only request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignReport {
    pub topology_key: String,
    pub converged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_output_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_input_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DesignReport {
    pub fn from_outcome(topology_key: &str, outcome: &DesignOutcome) -> Self {
        match outcome {
            DesignOutcome::Converged(baseline) => Self {
                topology_key: topology_key.to_string(),
                converged: true,
                cop: Some(baseline.summary.cop),
                heat_output_w: Some(baseline.summary.heat_output_w),
                power_input_w: Some(baseline.summary.power_input_w),
                epsilon: Some(baseline.summary.epsilon),
                error_message: None,
            },
            DesignOutcome::Failed { message } => Self {
                topology_key: topology_key.to_string(),
                converged: false,
                cop: None,
                heat_output_w: None,
                power_input_w: None,
                epsilon: None,
                error_message: Some(message.clone()),
            },
        }
    }
}

/// Per-request aggregate of a sweep or part-load run.
///
/// `converged` reflects only whether the design anchor was obtained; per-cell
/// convergence lives in the individual point flags. A result with
/// `converged == true` and `converged_points == 0` is valid: the design
/// succeeded and every tested off-design condition was infeasible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub topology_key: String,
    pub converged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<PerformanceSummary>,
    pub points: Vec<OperatingPoint>,
    pub total_points: usize,
    pub converged_points: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Assemble the final result. On a design failure the points are dropped
/// regardless of what was passed in — no later step can have run.
pub fn aggregate(
    topology_key: &str,
    outcome: &DesignOutcome,
    points: Vec<OperatingPoint>,
) -> SimulationResult {
    match outcome {
        DesignOutcome::Failed { message } => SimulationResult {
            topology_key: topology_key.to_string(),
            converged: false,
            design: None,
            points: Vec::new(),
            total_points: 0,
            converged_points: 0,
            error_message: Some(message.clone()),
        },
        DesignOutcome::Converged(baseline) => {
            let converged_points = points.iter().filter(|p| p.converged).count();
            SimulationResult {
                topology_key: topology_key.to_string(),
                converged: true,
                design: Some(baseline.summary),
                total_points: points.len(),
                converged_points,
                points,
                error_message: None,
            }
        }
    }
}
