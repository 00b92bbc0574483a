//! Off-design sweep execution.
//!
//! Every grid cell is an independent solver invocation anchored on the shared
//! design baseline. Cells are embarrassingly parallel: they read the baseline
//! and write only their own operating point, so the engine fans them out over
//! a bounded rayon pool and collects the results back in canonical grid
//! order.

use crate::grid::{Grid, GridCell};
use crate::{SweepError, SweepResult};
use hp_solver::{BoundaryConditions, CycleSolver, DesignBaseline, PointSolution};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// One evaluated grid cell. Performance fields are absent when the cell did
/// not converge; the sweep keeps going either way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub source_temp_c: f64,
    pub sink_temp_c: f64,
    pub load_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_output_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_input_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,
    pub converged: bool,
}

impl OperatingPoint {
    fn converged(cell: GridCell, solution: PointSolution) -> Self {
        Self {
            source_temp_c: cell.source_temp_c,
            sink_temp_c: cell.sink_temp_c,
            load_ratio: cell.load_ratio,
            cop: Some(solution.cop),
            heat_output_w: Some(solution.heat_output_w),
            power_input_w: Some(solution.power_input_w),
            epsilon: Some(solution.epsilon),
            converged: true,
        }
    }

    fn failed(cell: GridCell) -> Self {
        Self {
            source_temp_c: cell.source_temp_c,
            sink_temp_c: cell.sink_temp_c,
            load_ratio: cell.load_ratio,
            cop: None,
            heat_output_w: None,
            power_input_w: None,
            epsilon: None,
            converged: false,
        }
    }
}

/// Sweep execution options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepOptions {
    /// Upper bound on concurrent solver calls; rayon's default pool otherwise.
    pub max_workers: Option<usize>,
    /// Wall-clock budget. Expiry aborts only cells not yet started; cells
    /// already evaluated stay in the partial result.
    pub deadline: Option<Duration>,
}

/// Evaluate every grid cell against the baseline, in canonical grid order.
///
/// A non-convergent or physically invalid cell yields a point with
/// `converged == false` and does not abort the sweep; the engine errors only
/// when the solver layer itself is unusable.
pub fn sweep(
    solver: &dyn CycleSolver,
    baseline: &DesignBaseline,
    grid: &Grid,
    options: &SweepOptions,
) -> SweepResult<Vec<OperatingPoint>> {
    if baseline.state.is_empty() || baseline.state.iter().any(|v| !v.is_finite()) {
        return Err(SweepError::InvalidBaseline {
            what: format!(
                "baseline for '{}' has a non-finite or empty state vector",
                baseline.topology_key
            ),
        });
    }

    let cells = grid.cells();
    let total = cells.len();
    let started = Instant::now();

    let solve_cell = |cell: &GridCell| -> Result<Option<OperatingPoint>, SweepError> {
        if let Some(budget) = options.deadline
            && started.elapsed() >= budget
        {
            return Ok(None);
        }
        let conditions = BoundaryConditions {
            source_temp_c: cell.source_temp_c,
            sink_temp_c: cell.sink_temp_c,
            load_ratio: cell.load_ratio,
        };
        match solver.solve_offdesign(baseline, conditions) {
            Ok(solution) => Ok(Some(OperatingPoint::converged(*cell, solution))),
            Err(e) if e.is_cell_failure() => {
                warn!(
                    source = cell.source_temp_c,
                    sink = cell.sink_temp_c,
                    ratio = cell.load_ratio,
                    "off-design cell did not converge: {e}"
                );
                Ok(Some(OperatingPoint::failed(*cell)))
            }
            Err(e) => Err(SweepError::Solver {
                what: e.to_string(),
            }),
        }
    };

    // par_iter + collect preserves input order, which is canonical grid order.
    let run = || -> Result<Vec<Option<OperatingPoint>>, SweepError> {
        cells.par_iter().map(solve_cell).collect()
    };
    let outcomes = match options.max_workers {
        Some(workers) => rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| SweepError::WorkerPool {
                what: e.to_string(),
            })?
            .install(run),
        None => run(),
    }?;

    let points: Vec<OperatingPoint> = outcomes.into_iter().flatten().collect();
    let skipped = total - points.len();
    if skipped > 0 {
        warn!(skipped, total, "wall-clock budget expired before sweep completion");
    }
    info!(
        total,
        converged = points.iter().filter(|p| p.converged).count(),
        elapsed_s = started.elapsed().as_secs_f64(),
        "off-design sweep finished"
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_params::ComponentKind;
    use hp_solver::{
        DesignConditions, NetworkSpec, PerformanceSummary, SolverError, SolverResult,
    };
    use serde_json::Value;

    /// Test solver: fails cells at one sink temperature, errors fatally on a
    /// poison load ratio.
    struct StubSolver {
        fail_sink_temp_c: Option<f64>,
        poison_ratio: Option<f64>,
    }

    impl CycleSolver for StubSolver {
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
            if Some(conditions.load_ratio) == self.poison_ratio {
                return Err(SolverError::ProblemSetup {
                    what: "poisoned".to_string(),
                });
            }
            if Some(conditions.sink_temp_c) == self.fail_sink_temp_c {
                return Err(SolverError::NonConvergence {
                    what: "stub cell failure".to_string(),
                });
            }
            let cop = 4.0;
            let heat = conditions.load_ratio * baseline.design.heat_demand_w;
            Ok(PointSolution {
                cop,
                heat_output_w: heat,
                power_input_w: heat / cop,
                epsilon: 0.45,
            })
        }
    }

    fn baseline() -> DesignBaseline {
        DesignBaseline {
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
        }
    }

    fn grid() -> Grid {
        Grid {
            sources: vec![5.0, 10.0],
            sinks: vec![30.0, 40.0],
            load_ratios: vec![0.5, 1.0],
        }
    }

    #[test]
    fn infeasible_cells_do_not_abort_the_sweep() {
        let solver = StubSolver {
            fail_sink_temp_c: Some(40.0),
            poison_ratio: None,
        };
        let points = sweep(&solver, &baseline(), &grid(), &SweepOptions::default())
            .expect("sweep completes");

        assert_eq!(points.len(), 8);
        let failed: Vec<_> = points.iter().filter(|p| !p.converged).collect();
        assert_eq!(failed.len(), 4);
        for point in &failed {
            assert_eq!(point.sink_temp_c, 40.0);
            assert!(point.cop.is_none());
            assert!(point.heat_output_w.is_none());
            assert!(point.power_input_w.is_none());
            assert!(point.epsilon.is_none());
        }
        for point in points.iter().filter(|p| p.converged) {
            assert_eq!(point.cop, Some(4.0));
        }
    }

    #[test]
    fn points_come_back_in_canonical_grid_order() {
        let solver = StubSolver {
            fail_sink_temp_c: None,
            poison_ratio: None,
        };
        let points = sweep(
            &solver,
            &baseline(),
            &grid(),
            &SweepOptions {
                max_workers: Some(2),
                deadline: None,
            },
        )
        .expect("sweep completes");

        let expected: Vec<_> = grid()
            .cells()
            .iter()
            .map(|c| (c.source_temp_c, c.sink_temp_c, c.load_ratio))
            .collect();
        let actual: Vec<_> = points
            .iter()
            .map(|p| (p.source_temp_c, p.sink_temp_c, p.load_ratio))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn fatal_solver_errors_abort_the_sweep() {
        let solver = StubSolver {
            fail_sink_temp_c: None,
            poison_ratio: Some(0.5),
        };
        let err = sweep(&solver, &baseline(), &grid(), &SweepOptions::default()).unwrap_err();
        assert!(matches!(err, SweepError::Solver { .. }));
    }

    #[test]
    fn non_finite_baseline_state_is_rejected_up_front() {
        let solver = StubSolver {
            fail_sink_temp_c: None,
            poison_ratio: None,
        };
        let mut bad = baseline();
        bad.state[0] = f64::NAN;
        let err = sweep(&solver, &bad, &grid(), &SweepOptions::default()).unwrap_err();
        assert!(matches!(err, SweepError::InvalidBaseline { .. }));
    }

    #[test]
    fn expired_deadline_skips_unstarted_cells() {
        let solver = StubSolver {
            fail_sink_temp_c: None,
            poison_ratio: None,
        };
        let points = sweep(
            &solver,
            &baseline(),
            &grid(),
            &SweepOptions {
                max_workers: None,
                deadline: Some(Duration::ZERO),
            },
        )
        .expect("budget expiry is not an error");
        assert!(points.is_empty());
    }
}
