//! Part-load projection: the off-design sweep collapsed to one axis.

use crate::grid::Grid;
use crate::sweep::{OperatingPoint, SweepOptions, sweep};
use crate::SweepResult;
use hp_solver::{CycleSolver, DesignBaseline};

/// Evaluate the load-ratio axis at the design temperatures.
///
/// Equivalent to a full sweep whose temperature axes are pinned to the
/// design point, so the result is positionally aligned with `load_ratios`.
pub fn extract_partload(
    solver: &dyn CycleSolver,
    baseline: &DesignBaseline,
    load_ratios: Vec<f64>,
    options: &SweepOptions,
) -> SweepResult<Vec<OperatingPoint>> {
    let grid = Grid::partload_slice(&baseline.design, load_ratios);
    sweep(solver, baseline, &grid, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_params::ComponentKind;
    use hp_solver::{
        BoundaryConditions, DesignConditions, NetworkSpec, PerformanceSummary, PointSolution,
        SolverError, SolverResult,
    };
    use serde_json::Value;

    /// Only converges at the design temperatures; proves the projection pins
    /// both temperature axes.
    struct DesignPinnedSolver;

    impl CycleSolver for DesignPinnedSolver {
        fn version(&self) -> &str {
            "stub"
        }

        fn supported_components(&self) -> &[ComponentKind] {
            &[]
        }

        fn solve_design(&self, _: &NetworkSpec, _: &Value) -> SolverResult<DesignBaseline> {
            Err(SolverError::ProblemSetup {
                what: "stub has no design mode".to_string(),
            })
        }

        fn solve_offdesign(
            &self,
            baseline: &DesignBaseline,
            conditions: BoundaryConditions,
        ) -> SolverResult<PointSolution> {
            if conditions.source_temp_c != baseline.design.source_temp_c
                || conditions.sink_temp_c != baseline.design.sink_temp_c
            {
                return Err(SolverError::ProblemSetup {
                    what: "projection left the design temperatures".to_string(),
                });
            }
            Ok(PointSolution {
                cop: 4.0 - (1.0 - conditions.load_ratio),
                heat_output_w: conditions.load_ratio * baseline.design.heat_demand_w,
                power_input_w: 1.0e5,
                epsilon: 0.45,
            })
        }
    }

    #[test]
    fn projection_stays_at_design_temperatures() {
        let baseline = DesignBaseline {
            topology_key: "simple".to_string(),
            refrigerants: vec!["R290".to_string()],
            design: DesignConditions {
                source_temp_c: 10.0,
                sink_temp_c: 35.0,
                heat_demand_w: 1.0e6,
            },
            summary: PerformanceSummary {
                cop: 4.0,
                heat_output_w: 1.0e6,
                power_input_w: 2.5e5,
                epsilon: 0.45,
            },
            state: vec![5.0, 37.0, 3.3, 0.85, 1.0],
            solver_version: "stub".to_string(),
            created_at: "2026-02-26T00:00:00Z".to_string(),
        };

        let points = extract_partload(
            &DesignPinnedSolver,
            &baseline,
            vec![0.5, 0.75, 1.0],
            &SweepOptions::default(),
        )
        .expect("projection completes");

        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.converged));
        let ratios: Vec<_> = points.iter().map(|p| p.load_ratio).collect();
        assert_eq!(ratios, vec![0.5, 0.75, 1.0]);
    }
}
