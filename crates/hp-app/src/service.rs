//! Simulation orchestration service.

use crate::error::{AppError, AppResult};
use crate::result::{DesignOutcome, DesignReport, SimulationResult, aggregate};
use hp_params::{
    Catalog, OffdesignConfig, PartloadConfig, TopologyDescriptor, get_f64, get_str, resolve,
    validate_offdesign_config, validate_partload_config,
};
use hp_solver::{CycleSolver, NetworkSpec};
use hp_store::{BaselineStore, Signature};
use hp_sweep::{Grid, SweepOptions, extract_partload, load_axis, sweep};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// One resolved request, validated against catalog and refrigerant registry.
struct Prepared<'a> {
    descriptor: &'a TopologyDescriptor,
    resolved: Value,
    refrigerants: Vec<String>,
}

/// Transport-agnostic request surface over the simulation pipeline.
pub struct SimulationService {
    catalog: &'static Catalog,
    solver: Arc<dyn CycleSolver>,
    store: BaselineStore,
    sweep_options: SweepOptions,
}

impl std::fmt::Debug for SimulationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationService")
            .field("catalog", &self.catalog)
            .field("solver", &"<dyn CycleSolver>")
            .field("store", &"<BaselineStore>")
            .field("sweep_options", &self.sweep_options)
            .finish()
    }
}

impl SimulationService {
    pub fn new(solver: Arc<dyn CycleSolver>, store: BaselineStore) -> AppResult<Self> {
        Self::with_options(solver, store, SweepOptions::default())
    }

    /// Construct the service, checking every catalog topology against the
    /// solver's component vocabulary so a mismatch fails here rather than
    /// deep inside a sweep.
    pub fn with_options(
        solver: Arc<dyn CycleSolver>,
        store: BaselineStore,
        sweep_options: SweepOptions,
    ) -> AppResult<Self> {
        let catalog = Catalog::builtin();
        let supported = solver.supported_components();
        for descriptor in catalog.descriptors() {
            for kind in &descriptor.components {
                if !supported.contains(kind) {
                    return Err(AppError::VocabularyMismatch {
                        component: kind.to_string(),
                        topology: descriptor.key.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            catalog,
            solver,
            store,
            sweep_options,
        })
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Run the design point only.
    pub fn simulate_design(
        &self,
        topology_key: &str,
        overrides: &Value,
    ) -> AppResult<DesignReport> {
        let prepared = self.prepare(topology_key, overrides)?;
        let outcome = self.ensure_baseline(&prepared)?;
        Ok(DesignReport::from_outcome(prepared.descriptor.key, &outcome))
    }

    /// Run the design point, then project the load-ratio axis at the design
    /// temperatures.
    pub fn simulate_partload(
        &self,
        topology_key: &str,
        overrides: &Value,
        config: Option<&PartloadConfig>,
    ) -> AppResult<SimulationResult> {
        if let Some(config) = config {
            validate_partload_config(config)?;
        }
        let prepared = self.prepare(topology_key, overrides)?;
        let outcome = self.ensure_baseline(&prepared)?;

        let points = match &outcome {
            DesignOutcome::Failed { .. } => Vec::new(),
            DesignOutcome::Converged(baseline) => {
                let defaults = partload_defaults(&prepared.resolved);
                let ratios = load_axis(&defaults, config)?;
                info!(
                    topology = prepared.descriptor.key,
                    points = ratios.len(),
                    "running part-load projection"
                );
                extract_partload(self.solver.as_ref(), baseline, ratios, &self.sweep_options)?
            }
        };
        Ok(aggregate(prepared.descriptor.key, &outcome, points))
    }

    /// Run the design point, then sweep the three-dimensional operating
    /// envelope.
    pub fn simulate_offdesign(
        &self,
        topology_key: &str,
        overrides: &Value,
        config: Option<&OffdesignConfig>,
    ) -> AppResult<SimulationResult> {
        if let Some(config) = config {
            validate_offdesign_config(config)?;
        }
        let prepared = self.prepare(topology_key, overrides)?;
        let outcome = self.ensure_baseline(&prepared)?;

        let points = match &outcome {
            DesignOutcome::Failed { .. } => Vec::new(),
            DesignOutcome::Converged(baseline) => {
                let defaults = partload_defaults(&prepared.resolved);
                let grid = Grid::build(&baseline.design, &defaults, config)?;
                info!(
                    topology = prepared.descriptor.key,
                    sources = grid.sources.len(),
                    sinks = grid.sinks.len(),
                    load_ratios = grid.load_ratios.len(),
                    "running off-design sweep"
                );
                sweep(self.solver.as_ref(), baseline, &grid, &self.sweep_options)?
            }
        };
        Ok(aggregate(prepared.descriptor.key, &outcome, points))
    }

    /// Resolve overrides against the topology defaults and validate the
    /// refrigerant selection. Rejections here happen before any solver call.
    fn prepare<'a>(&'a self, topology_key: &str, overrides: &Value) -> AppResult<Prepared<'a>> {
        let descriptor = self
            .catalog
            .get(topology_key)
            .ok_or_else(|| AppError::UnknownTopology(topology_key.to_string()))?;

        let resolved = resolve(&descriptor.defaults, overrides);

        let mut refrigerants = Vec::with_capacity(descriptor.refrigerant_slots);
        for slot in descriptor.refrigerant_keys() {
            let name = get_str(&resolved, &["fluids", slot.as_str()]).ok_or_else(|| {
                AppError::InvalidInput(format!("no refrigerant configured in slot '{slot}'"))
            })?;
            if self.catalog.refrigerant(name).is_none() {
                return Err(AppError::UnknownRefrigerant {
                    refrigerant: name.to_string(),
                    slot,
                });
            }
            refrigerants.push(name.to_string());
        }

        Ok(Prepared {
            descriptor,
            resolved,
            refrigerants,
        })
    }

    /// Load the cached baseline for this configuration signature, or solve
    /// the design point and persist it. Non-convergence is a terminal
    /// outcome, not an error.
    fn ensure_baseline(&self, prepared: &Prepared<'_>) -> AppResult<DesignOutcome> {
        let signature = Signature::of(prepared.descriptor.key, &prepared.resolved);

        if let Some(baseline) = self.store.load(&signature)? {
            info!(%signature, topology = prepared.descriptor.key, "reusing cached baseline");
            return Ok(DesignOutcome::Converged(baseline));
        }

        let network =
            NetworkSpec::for_topology(prepared.descriptor, prepared.refrigerants.clone());
        match self.solver.solve_design(&network, &prepared.resolved) {
            Ok(baseline) => {
                self.store.save(&signature, &baseline)?;
                info!(
                    %signature,
                    topology = prepared.descriptor.key,
                    cop = baseline.summary.cop,
                    "design point solved and persisted"
                );
                Ok(DesignOutcome::Converged(baseline))
            }
            Err(e) if e.is_cell_failure() => {
                warn!(topology = prepared.descriptor.key, "design point failed: {e}");
                Ok(DesignOutcome::Failed {
                    message: e.to_string(),
                })
            }
            Err(e) => Err(AppError::Solver(e.to_string())),
        }
    }
}

/// The topology's default load range, read from the resolved tree.
fn partload_defaults(resolved: &Value) -> PartloadConfig {
    PartloadConfig {
        min_ratio: get_f64(resolved, &["offdesign", "partload_min"]).unwrap_or(0.3),
        max_ratio: get_f64(resolved, &["offdesign", "partload_max"]).unwrap_or(1.0),
        steps: None,
    }
}
