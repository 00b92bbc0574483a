use clap::{Parser, Subcommand};
use hp_app::{AppError, AppResult, SimulationService, report_document};
use hp_params::{OffdesignConfig, PartloadConfig};
use hp_solver::CorrelationSolver;
use hp_store::BaselineStore;
use hp_sweep::SweepOptions;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hp-cli")]
#[command(about = "Heatsim CLI - parametric heat-pump cycle simulation", long_about = None)]
struct Cli {
    /// Directory holding cached design baselines
    #[arg(long, global = true, default_value = ".heatsim/baselines")]
    state_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog topologies
    Topologies,
    /// List supported refrigerants
    Refrigerants,
    /// Run a design point simulation
    Design {
        /// Topology key (see `topologies`)
        topology: String,
        /// YAML file with parameter overrides
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Run an off-design sweep over the operating envelope
    Offdesign {
        /// Topology key (see `topologies`)
        topology: String,
        /// YAML file with parameter overrides
        #[arg(long)]
        params: Option<PathBuf>,
        /// YAML file with the off-design sweep configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Upper bound on concurrent solver calls
        #[arg(long)]
        max_workers: Option<usize>,
    },
    /// Run part-load characteristics at the design temperatures
    Partload {
        /// Topology key (see `topologies`)
        topology: String,
        /// YAML file with parameter overrides
        #[arg(long)]
        params: Option<PathBuf>,
        /// Minimum load ratio
        #[arg(long)]
        min_ratio: Option<f64>,
        /// Maximum load ratio
        #[arg(long)]
        max_ratio: Option<f64>,
        /// Number of load points
        #[arg(long)]
        steps: Option<usize>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Topologies => cmd_topologies(),
        Commands::Refrigerants => cmd_refrigerants(),
        Commands::Design { topology, params } => {
            let service = build_service(&cli.state_dir, None)?;
            cmd_design(&service, &topology, params.as_deref())
        }
        Commands::Offdesign {
            topology,
            params,
            config,
            max_workers,
        } => {
            let service = build_service(&cli.state_dir, max_workers)?;
            cmd_offdesign(&service, &topology, params.as_deref(), config.as_deref())
        }
        Commands::Partload {
            topology,
            params,
            min_ratio,
            max_ratio,
            steps,
        } => {
            let service = build_service(&cli.state_dir, None)?;
            cmd_partload(&service, &topology, params.as_deref(), min_ratio, max_ratio, steps)
        }
    }
}

fn build_service(
    state_dir: &Path,
    max_workers: Option<usize>,
) -> AppResult<SimulationService> {
    SimulationService::with_options(
        Arc::new(CorrelationSolver::new()),
        BaselineStore::on_dir(state_dir.to_path_buf()),
        SweepOptions {
            max_workers,
            deadline: None,
        },
    )
}

fn cmd_topologies() -> AppResult<()> {
    let catalog = hp_params::Catalog::builtin();
    println!("{:<14} {:<8} {:<5} NAME", "KEY", "SLOTS", "IHX");
    for topo in catalog.descriptors() {
        println!(
            "{:<14} {:<8} {:<5} {}",
            topo.key, topo.refrigerant_slots, topo.ihx_variants, topo.display_name
        );
    }
    Ok(())
}

fn cmd_refrigerants() -> AppResult<()> {
    let catalog = hp_params::Catalog::builtin();
    println!("{:<10} {:>10} {:>12}", "KEY", "T_CRIT_C", "P_CRIT_BAR");
    for refrigerant in catalog.refrigerants() {
        println!(
            "{:<10} {:>10.1} {:>12.1}",
            refrigerant.key, refrigerant.t_crit_c, refrigerant.p_crit_bar
        );
    }
    Ok(())
}

fn cmd_design(
    service: &SimulationService,
    topology: &str,
    params: Option<&Path>,
) -> AppResult<()> {
    let overrides = load_overrides(params)?;
    let report = service.simulate_design(topology, &overrides)?;
    print_json(&serde_json::to_value(&report).unwrap_or(Value::Null))
}

fn cmd_offdesign(
    service: &SimulationService,
    topology: &str,
    params: Option<&Path>,
    config: Option<&Path>,
) -> AppResult<()> {
    let overrides = load_overrides(params)?;
    let config: Option<OffdesignConfig> = match config {
        Some(path) => Some(load_yaml(path)?),
        None => None,
    };
    let result = service.simulate_offdesign(topology, &overrides, config.as_ref())?;
    print_json(&report_document(&result))
}

fn cmd_partload(
    service: &SimulationService,
    topology: &str,
    params: Option<&Path>,
    min_ratio: Option<f64>,
    max_ratio: Option<f64>,
    steps: Option<usize>,
) -> AppResult<()> {
    let overrides = load_overrides(params)?;
    let config = if min_ratio.is_some() || max_ratio.is_some() || steps.is_some() {
        let mut config = PartloadConfig::default();
        if let Some(value) = min_ratio {
            config.min_ratio = value;
        }
        if let Some(value) = max_ratio {
            config.max_ratio = value;
        }
        config.steps = steps;
        Some(config)
    } else {
        None
    };
    let result = service.simulate_partload(topology, &overrides, config.as_ref())?;
    print_json(&report_document(&result))
}

/// Parameter overrides from a YAML file; an absent file means no overrides.
fn load_overrides(path: Option<&Path>) -> AppResult<Value> {
    match path {
        Some(path) => load_yaml(path),
        None => Ok(Value::Object(Default::default())),
    }
}

fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content)
        .map_err(|e| AppError::InvalidInput(format!("{}: {e}", path.display())))
}

fn print_json(document: &Value) -> AppResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(document)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?
    );
    Ok(())
}
