//! Penalty simulation engine
//!
//! - [`shot`]: one stochastic trial
//! - [`simulation`]: per-shooter trial loops and aggregation
//! - [`goal_map`]: goals per zone across a run
//! - [`expected_goals`]: analytic expected-goal grids and the heatmap panel

pub mod expected_goals;
pub mod goal_map;
pub mod shot;
pub mod simulation;

pub use expected_goals::{
    expected_goal_grid, expected_goal_probability, expected_goals_per_attempt, HeatmapPanel,
    ShooterHeatmap,
};
pub use goal_map::GoalZoneMap;
pub use shot::{resolve_shot, ShotOutcome, ShotResolution};
pub use simulation::{
    effectiveness_percent, parse_shot_count, run_simulation, run_simulation_with_rng,
    SimulationEngine, SimulationReport, SimulationResult,
};
