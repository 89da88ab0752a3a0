//! Expected goals
//!
//! Analytic per-zone scoring probability: on target × not saved.
//! Pure functions of the two probability vectors; no trials involved.

use crate::config::DISPLAY_CAPACITY;
use crate::error::RosterError;
use crate::models::{to_grid, Roster, ZoneGrid, ZoneId, ZoneProbabilities, ZONE_COUNT};
use serde::{Deserialize, Serialize};

/// P(goal | shot at `zone`) = shooter(z) × (1 − goalkeeper(z)).
pub fn expected_goal_probability(
    shooter: &ZoneProbabilities,
    goalkeeper: &ZoneProbabilities,
    zone: ZoneId,
) -> f64 {
    shooter.get(zone) * (1.0 - goalkeeper.get(zone))
}

pub fn expected_goal_grid(
    shooter: &ZoneProbabilities,
    goalkeeper: &ZoneProbabilities,
) -> ZoneGrid<f64> {
    let mut flat = [0.0; ZONE_COUNT];
    for zone in ZoneId::all() {
        flat[zone.index()] = expected_goal_probability(shooter, goalkeeper, zone);
    }
    to_grid(&flat)
}

/// Expected goals per attempt with the zone drawn uniformly.
/// Times 100 this is the long-run effectiveness a simulation converges to.
pub fn expected_goals_per_attempt(
    shooter: &ZoneProbabilities,
    goalkeeper: &ZoneProbabilities,
) -> f64 {
    let sum: f64 =
        ZoneId::all().map(|zone| expected_goal_probability(shooter, goalkeeper, zone)).sum();
    sum / ZONE_COUNT as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShooterHeatmap {
    pub name: String,
    pub grid: ZoneGrid<f64>,
    pub expected_per_attempt: f64,
}

/// Data behind the heatmap view: the goalkeeper's save grid and one
/// expected-goal grid per displayed shooter, in roster order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPanel {
    pub goalkeeper: String,
    pub save_grid: ZoneGrid<f64>,
    pub shooters: Vec<ShooterHeatmap>,
    pub capacity: usize,
    /// Shooters in the roster that did not fit in `capacity`.
    pub hidden_shooters: usize,
}

impl HeatmapPanel {
    pub fn build(roster: &Roster, capacity: usize) -> Result<Self, RosterError> {
        roster.validate_for_simulation()?;
        let counts = roster.counts();
        let goalkeeper = roster.goalkeeper().ok_or(RosterError::GoalkeeperCount {
            goalkeepers: counts.goalkeepers,
            shooters: counts.shooters,
        })?;

        let shooters: Vec<ShooterHeatmap> = roster
            .shooters()
            .take(capacity)
            .map(|shooter| ShooterHeatmap {
                name: shooter.name.clone(),
                grid: expected_goal_grid(&shooter.zones, &goalkeeper.zones),
                expected_per_attempt: expected_goals_per_attempt(&shooter.zones, &goalkeeper.zones),
            })
            .collect();

        Ok(Self {
            goalkeeper: goalkeeper.name.clone(),
            save_grid: goalkeeper.zones.as_grid(),
            hidden_shooters: counts.shooters - shooters.len(),
            shooters,
            capacity,
        })
    }

    pub fn with_default_capacity(roster: &Roster) -> Result<Self, RosterError> {
        Self::build(roster, DISPLAY_CAPACITY)
    }

    /// Slots left blank ("no more shooters").
    pub fn empty_slots(&self) -> usize {
        self.capacity.saturating_sub(self.shooters.len())
    }
}
