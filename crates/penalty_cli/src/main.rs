//! penalty_sim CLI
//!
//! Roster CSV/XLSX → validation, simulation runs and expected-goal grids

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use penalty_core::{HeatmapPanel, Roster, SimulationConfig, SimulationEngine};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "penalty_sim")]
#[command(about = "Monte Carlo penalty-kick simulation", long_about = None)]
struct Cli {
    /// Log at DEBUG instead of INFO
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Load a roster and report whether it can be simulated
    Check {
        /// Roster file, .csv or .xlsx (Name, Role, Z1..Z18)
        #[arg(long)]
        csv: PathBuf,
    },

    /// Run the simulation and print per-shooter results
    Simulate {
        /// Roster file, .csv or .xlsx (Name, Role, Z1..Z18)
        #[arg(long)]
        csv: PathBuf,

        /// Shots per shooter (positive integer, overrides config)
        #[arg(long)]
        shots: Option<String>,

        /// Fixed seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Simulate shooters on the rayon pool
        #[arg(long, default_value = "false")]
        parallel: bool,

        /// JSON or YAML config file (defaults to $PENALTY_SIM_CONFIG_PATH)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the report and heatmap data as JSON
        #[arg(long)]
        json_out: Option<PathBuf>,
    },

    /// Print the goalkeeper's save grid and shooters' expected-goal grids
    Grids {
        /// Roster file, .csv or .xlsx (Name, Role, Z1..Z18)
        #[arg(long)]
        csv: PathBuf,

        /// Number of shooter grids to show
        #[arg(long, default_value_t = penalty_core::DISPLAY_CAPACITY)]
        capacity: usize,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) -> Result<()> {
    use tracing_subscriber::prelude::*;

    let max_level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(move |meta| {
            meta.target().starts_with("penalty") && *meta.level() <= max_level
        }));
    tracing::subscriber::set_global_default(registry).context("failed to install tracing subscriber")
}

#[cfg(feature = "cli")]
fn load(csv: &Path) -> Result<Roster> {
    let mut roster = Roster::new();
    penalty_cli::import_into(&mut roster, csv)
        .with_context(|| format!("failed to import roster from {}", csv.display()))?;
    Ok(roster)
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Check { csv } => {
            let roster = load(&csv)?;
            println!("Roster: {}", csv.display());
            println!("   {}", roster.status());

            roster.validate_for_simulation().context("roster cannot be simulated")?;
            println!("✅ Ready to simulate");
        }

        Commands::Simulate { csv, shots, seed, parallel, config, json_out } => {
            let mut config = match config {
                Some(path) => SimulationConfig::from_path(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => SimulationConfig::load_from_env().context("failed to load config")?,
            };
            if let Some(raw) = shots {
                config.shots_per_shooter = penalty_core::parse_shot_count(&raw)?;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.parallel |= parallel;

            let roster = load(&csv)?;
            let engine = SimulationEngine::new(config);
            let report = engine
                .run(&roster, engine.config().shots_per_shooter)
                .context("simulation failed")?;

            println!("Goalkeeper: {}", report.goalkeeper);
            println!("Shots per shooter: {}", report.shots_per_shooter);
            if let Some(seed) = report.seed {
                println!("Seed: {seed}");
            }
            println!();
            print!("{}", penalty_cli::render_results(&report.results));
            println!();
            print!("{}", penalty_cli::render_goal_map(&report.goal_map));

            if let Some(out) = json_out {
                let panel = HeatmapPanel::build(&roster, engine.config().display_capacity)?;
                let record =
                    penalty_cli::RunRecord::new(csv.display().to_string(), &report, &panel);
                let json = serde_json::to_string_pretty(&record)?;
                std::fs::write(&out, json)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("\n📄 Report saved to: {}", out.display());
            }
        }

        Commands::Grids { csv, capacity } => {
            let roster = load(&csv)?;
            let panel = HeatmapPanel::build(&roster, capacity).context("cannot build heatmaps")?;
            print!("{}", penalty_cli::render_heatmap_panel(&panel));
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("penalty_sim CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
