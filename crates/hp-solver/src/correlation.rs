//! Reference correlation solver.
//!
//! A Carnot-fraction correlation model of the vapor-compression cycle. It is
//! not a network solver: performance comes from the temperature lift, an
//! efficiency grade and a part-load roll-off, with a refrigerant
//! critical-point guard. The trait boundary is the contract; these constants
//! are stand-ins that keep the pipeline runnable end to end.

use crate::error::{SolverError, SolverResult};
use crate::network::NetworkSpec;
use crate::types::{
    BoundaryConditions, DesignBaseline, DesignConditions, PerformanceSummary, PointSolution,
};
use crate::CycleSolver;
use hp_core::{ensure_finite, kelvin};
use hp_params::{Catalog, ComponentKind, get_f64};
use serde_json::Value;
use tracing::debug;

const SOLVER_VERSION: &str = "0.1.0";

/// Fraction of the Carnot COP reached per unit isentropic efficiency.
const EFFICIENCY_GRADE: f64 = 0.53;

/// Evaporator / condenser approach temperatures.
const EVAP_APPROACH_K: f64 = 5.0;
const COND_APPROACH_K: f64 = 2.0;

/// Load ratios below this leave the compressor's stable envelope.
const MIN_STABLE_RATIO: f64 = 0.2;

/// Quadratic part-load efficiency roll-off coefficient.
const PL_ROLLOFF: f64 = 0.25;

/// Rough latent-heat scale used for the mass-flow estimate.
const LATENT_HEAT_SCALE_J_PER_KG: f64 = 300_000.0;

const SUPPORTED: [ComponentKind; 7] = [
    ComponentKind::Evaporator,
    ComponentKind::Compressor,
    ComponentKind::Condenser,
    ComponentKind::ExpansionValve,
    ComponentKind::InternalHeatExchanger,
    ComponentKind::Economizer,
    ComponentKind::CascadeHeatExchanger,
];

pub struct CorrelationSolver {
    catalog: &'static Catalog,
}

impl CorrelationSolver {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::builtin(),
        }
    }

    fn critical_temp(&self, refrigerant: &str) -> SolverResult<f64> {
        self.catalog
            .refrigerant(refrigerant)
            .map(|r| r.t_crit_c)
            .ok_or_else(|| SolverError::ProblemSetup {
                what: format!("unknown refrigerant '{refrigerant}'"),
            })
    }

    /// Subcritical operation requires condensing below the critical point of
    /// the sink-side circuit; a cascade also pins its source circuit below
    /// the intermediate transfer temperature.
    fn check_subcritical(
        &self,
        refrigerants: &[String],
        t_evap_c: f64,
        t_cond_c: f64,
    ) -> SolverResult<()> {
        let sink_side = refrigerants.last().ok_or_else(|| SolverError::ProblemSetup {
            what: "network has no refrigerant assigned".to_string(),
        })?;
        if t_cond_c >= self.critical_temp(sink_side)? {
            return Err(SolverError::NonPhysical {
                what: format!(
                    "condensing temperature {t_cond_c:.1} C above critical point of {sink_side}"
                ),
            });
        }
        if refrigerants.len() > 1 {
            let t_inter_c = 0.5 * (t_evap_c + t_cond_c);
            let source_side = &refrigerants[0];
            if t_inter_c >= self.critical_temp(source_side)? {
                return Err(SolverError::NonPhysical {
                    what: format!(
                        "cascade transfer temperature {t_inter_c:.1} C above critical point of {source_side}"
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for CorrelationSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn require_f64(params: &Value, path: &[&str]) -> SolverResult<f64> {
    get_f64(params, path).ok_or_else(|| SolverError::ProblemSetup {
        what: format!("missing numeric parameter '{}'", path.join(".")),
    })
}

/// Cycle bonus from recuperative components.
fn component_bonus(components: &[ComponentKind]) -> f64 {
    let ihx = components
        .iter()
        .filter(|c| **c == ComponentKind::InternalHeatExchanger)
        .count() as f64;
    let econ = components
        .iter()
        .filter(|c| **c == ComponentKind::Economizer)
        .count() as f64;
    1.0 + 0.03 * ihx + 0.05 * econ
}

fn effective_temps(source_temp_c: f64, sink_temp_c: f64) -> SolverResult<(f64, f64, f64)> {
    let t_evap_c = source_temp_c - EVAP_APPROACH_K;
    let t_cond_c = sink_temp_c + COND_APPROACH_K;
    let lift_k = t_cond_c - t_evap_c;
    if lift_k <= 0.0 {
        return Err(SolverError::NonConvergence {
            what: format!(
                "temperature lift {lift_k:.1} K is not positive (source {source_temp_c:.1} C, sink {sink_temp_c:.1} C)"
            ),
        });
    }
    Ok((t_evap_c, t_cond_c, lift_k))
}

impl CycleSolver for CorrelationSolver {
    fn version(&self) -> &str {
        SOLVER_VERSION
    }

    fn supported_components(&self) -> &[ComponentKind] {
        &SUPPORTED
    }

    fn solve_design(
        &self,
        network: &NetworkSpec,
        params: &Value,
    ) -> SolverResult<DesignBaseline> {
        network.check_supported(&SUPPORTED)?;

        let source_temp_c = require_f64(params, &["T_hs_ff"])?;
        let sink_temp_c = require_f64(params, &["T_cons_ff"])?;
        let heat_demand_w = require_f64(params, &["cons", "Q"])?;
        let eta_s = require_f64(params, &["comp", "eta_s"])?;

        if heat_demand_w <= 0.0 {
            return Err(SolverError::ProblemSetup {
                what: format!("heat demand must be positive, got {heat_demand_w}"),
            });
        }
        if !(0.0..=1.0).contains(&eta_s) {
            return Err(SolverError::NonPhysical {
                what: format!("isentropic efficiency {eta_s} resolved outside [0, 1]"),
            });
        }

        let (t_evap_c, t_cond_c, lift_k) = effective_temps(source_temp_c, sink_temp_c)?;
        self.check_subcritical(&network.refrigerants, t_evap_c, t_cond_c)?;

        let carnot = kelvin(t_cond_c) / lift_k;
        let bonus = component_bonus(&network.components);
        let cop = ensure_finite(EFFICIENCY_GRADE * eta_s * bonus * carnot, "design cop")?;
        let power_input_w = heat_demand_w / cop;
        let epsilon = cop / carnot;
        let mdot_kg_s = heat_demand_w / LATENT_HEAT_SCALE_J_PER_KG;

        debug!(
            topology = network.topology_key,
            cop, lift_k, "design point converged"
        );

        Ok(DesignBaseline {
            topology_key: network.topology_key.clone(),
            refrigerants: network.refrigerants.clone(),
            design: DesignConditions {
                source_temp_c,
                sink_temp_c,
                heat_demand_w,
            },
            summary: PerformanceSummary {
                cop,
                heat_output_w: heat_demand_w,
                power_input_w,
                epsilon,
            },
            state: vec![t_evap_c, t_cond_c, mdot_kg_s, eta_s, bonus],
            solver_version: SOLVER_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    fn solve_offdesign(
        &self,
        baseline: &DesignBaseline,
        conditions: BoundaryConditions,
    ) -> SolverResult<PointSolution> {
        let [_t_evap, _t_cond, _mdot, eta_s, bonus] = baseline.state[..] else {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "baseline state vector has {} entries, expected 5",
                    baseline.state.len()
                ),
            });
        };

        let ratio = conditions.load_ratio;
        if ratio <= 0.0 {
            return Err(SolverError::NonPhysical {
                what: format!("load ratio {ratio} is not positive"),
            });
        }
        if ratio < MIN_STABLE_RATIO {
            return Err(SolverError::NonConvergence {
                what: format!(
                    "compressor below stable envelope at load ratio {ratio:.2} (minimum {MIN_STABLE_RATIO})"
                ),
            });
        }

        let (t_evap_c, t_cond_c, lift_k) =
            effective_temps(conditions.source_temp_c, conditions.sink_temp_c)?;
        self.check_subcritical(&baseline.refrigerants, t_evap_c, t_cond_c)?;

        let eta_pl = eta_s * (1.0 - PL_ROLLOFF * (1.0 - ratio).powi(2));
        if !(0.0..=1.0).contains(&eta_pl) {
            return Err(SolverError::NonPhysical {
                what: format!("isentropic efficiency {eta_pl:.3} resolved outside [0, 1]"),
            });
        }

        let carnot = kelvin(t_cond_c) / lift_k;
        let cop = ensure_finite(EFFICIENCY_GRADE * eta_pl * bonus * carnot, "off-design cop")?;
        let heat_output_w = ratio * baseline.design.heat_demand_w;
        let power_input_w = heat_output_w / cop;
        let epsilon = cop / carnot;

        Ok(PointSolution {
            cop,
            heat_output_w,
            power_input_w,
            epsilon,
        })
    }
}
