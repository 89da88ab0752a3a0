//! # penalty_core - Monte Carlo Penalty-Kick Simulation Engine
//!
//! Simulates penalty shooters against a single goalkeeper over an 18-zone
//! (3 rows x 6 columns) goal grid.
//!
//! ## Features
//! - Validated player records and roster store
//! - Seeded, reproducible trial loops (same seed = same result)
//! - Optional parallel execution across shooters
//! - Analytic expected-goal grids for heatmap views
//! - JSON API for front ends

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_penalties_json, SimulationRequest, SimulationResponse};
pub use config::{SimulationConfig, DISPLAY_CAPACITY};
pub use engine::{
    expected_goal_grid, expected_goal_probability, parse_shot_count, run_simulation,
    run_simulation_with_rng, GoalZoneMap, HeatmapPanel, ShotOutcome, SimulationEngine,
    SimulationReport, SimulationResult,
};
pub use error::{
    ConfigError, EntryError, FieldError, PenaltyError, Result, RosterError, SimulationError,
};
pub use models::{PlayerRecord, Role, Roster, ZoneGrid, ZoneId, ZoneProbabilities};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
