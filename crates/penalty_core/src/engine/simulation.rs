//! Monte Carlo penalty simulation
//!
//! Every shooter takes `shots_per_shooter` independent shots at the single
//! goalkeeper. Results come back in roster order together with the goal
//! map for the whole run.
//!
//! ## Random streams
//!
//! Seeded runs give each shooter its own ChaCha8 stream
//! (`seed`, stream = shooter index). Shooters therefore never share draws,
//! and sequential and parallel execution produce identical reports.
//! [`run_simulation_with_rng`] instead threads one caller-supplied source
//! through all shooters in order.

use super::goal_map::GoalZoneMap;
use super::shot::resolve_shot;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::models::{PlayerRecord, Roster};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Outcome summary for one shooter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub shooter: String,
    pub goals: u32,
    /// Saved and off-target shots combined.
    pub non_goals: u32,
    /// goals / shots × 100, rounded to 2 decimals.
    pub effectiveness: f64,
}

impl SimulationResult {
    fn new(shooter: &str, goals: u32, shots: u32) -> Self {
        Self {
            shooter: shooter.to_string(),
            goals,
            non_goals: shots - goals,
            effectiveness: effectiveness_percent(goals, shots),
        }
    }

    pub fn shots(&self) -> u32 {
        self.goals + self.non_goals
    }
}

/// Percentage of `shots` that were goals, rounded to 2 decimal places.
/// Exact ties go to the even digit (12.125 -> 12.12).
pub fn effectiveness_percent(goals: u32, shots: u32) -> f64 {
    if shots == 0 {
        return 0.0;
    }
    let pct = goals as f64 / shots as f64 * 100.0;
    (pct * 100.0).round_ties_even() / 100.0
}

/// Everything one simulation run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub goalkeeper: String,
    pub shots_per_shooter: u32,
    /// Seed the run used; `None` for caller-supplied random sources.
    pub seed: Option<u64>,
    pub results: Vec<SimulationResult>,
    pub goal_map: GoalZoneMap,
}

impl SimulationReport {
    pub fn total_goals(&self) -> u64 {
        self.results.iter().map(|r| r.goals as u64).sum()
    }

    pub fn total_shots(&self) -> u64 {
        self.results.len() as u64 * self.shots_per_shooter as u64
    }

    pub fn result_for(&self, shooter: &str) -> Option<&SimulationResult> {
        self.results.iter().find(|r| r.shooter == shooter)
    }
}

/// Parse a shot count typed by a user. Zero, negative and non-numeric
/// input are rejected.
pub fn parse_shot_count(raw: &str) -> Result<u32, SimulationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SimulationError::InvalidShotCount(trimmed.to_string())),
    }
}

fn check_shot_count(shots: u32) -> Result<(), SimulationError> {
    if shots == 0 {
        return Err(SimulationError::InvalidShotCount(shots.to_string()));
    }
    Ok(())
}

/// Validated roster split into the goalkeeper and the shooters.
fn lineup(roster: &Roster) -> Result<(&PlayerRecord, Vec<&PlayerRecord>), SimulationError> {
    if let Err(e) = roster.validate_for_simulation() {
        warn!(error = %e, "roster rejected");
        return Err(e.into());
    }
    let goalkeeper = roster.goalkeeper().ok_or_else(|| {
        let counts = roster.counts();
        SimulationError::from(crate::error::RosterError::GoalkeeperCount {
            goalkeepers: counts.goalkeepers,
            shooters: counts.shooters,
        })
    })?;
    Ok((goalkeeper, roster.shooters().collect()))
}

fn simulate_shooter<R: Rng + ?Sized>(
    rng: &mut R,
    shooter: &PlayerRecord,
    goalkeeper: &PlayerRecord,
    shots: u32,
    goal_map: &mut GoalZoneMap,
) -> SimulationResult {
    let mut goals = 0u32;
    for _ in 0..shots {
        let shot = resolve_shot(rng, &shooter.zones, &goalkeeper.zones);
        if shot.outcome.is_goal() {
            goals += 1;
            goal_map.record(shot.zone);
        }
    }

    let result = SimulationResult::new(&shooter.name, goals, shots);
    debug!(
        shooter = %result.shooter,
        goals = result.goals,
        non_goals = result.non_goals,
        effectiveness = result.effectiveness,
        "shooter simulated"
    );
    result
}

fn shooter_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Run with a caller-supplied random source.
///
/// Shooters draw from `rng` one after another in roster order, so an
/// identical source yields an identical report.
pub fn run_simulation_with_rng<R: Rng + ?Sized>(
    roster: &Roster,
    shots_per_shooter: u32,
    rng: &mut R,
) -> Result<SimulationReport, SimulationError> {
    check_shot_count(shots_per_shooter)?;
    let (goalkeeper, shooters) = lineup(roster)?;

    let mut goal_map = GoalZoneMap::new();
    let results = shooters
        .iter()
        .map(|shooter| simulate_shooter(rng, shooter, goalkeeper, shots_per_shooter, &mut goal_map))
        .collect();

    Ok(SimulationReport {
        goalkeeper: goalkeeper.name.clone(),
        shots_per_shooter,
        seed: None,
        results,
        goal_map,
    })
}

/// Seeded sequential run with default settings.
pub fn run_simulation(
    roster: &Roster,
    shots_per_shooter: u32,
    seed: u64,
) -> Result<SimulationReport, SimulationError> {
    SimulationEngine::new(SimulationConfig::with_seed(seed)).run(roster, shots_per_shooter)
}

/// Simulation runner configured by [`SimulationConfig`].
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(
        &self,
        roster: &Roster,
        shots_per_shooter: u32,
    ) -> Result<SimulationReport, SimulationError> {
        self.run_inner(roster, shots_per_shooter, None)
    }

    /// Like [`run`](Self::run), but stops before the next shooter once
    /// `cancel` is set. A cancelled run yields no partial report.
    pub fn run_cancellable(
        &self,
        roster: &Roster,
        shots_per_shooter: u32,
        cancel: &AtomicBool,
    ) -> Result<SimulationReport, SimulationError> {
        self.run_inner(roster, shots_per_shooter, Some(cancel))
    }

    fn run_inner(
        &self,
        roster: &Roster,
        shots_per_shooter: u32,
        cancel: Option<&AtomicBool>,
    ) -> Result<SimulationReport, SimulationError> {
        check_shot_count(shots_per_shooter)?;
        let (goalkeeper, shooters) = lineup(roster)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        info!(
            goalkeeper = %goalkeeper.name,
            shooters = shooters.len(),
            shots_per_shooter,
            seed,
            parallel = self.config.parallel,
            "simulation started"
        );

        let is_cancelled = || cancel.map_or(false, |flag| flag.load(Ordering::Relaxed));

        let run_one = |index: usize, shooter: &PlayerRecord| {
            if is_cancelled() {
                return None;
            }
            let mut rng = shooter_rng(seed, index);
            let mut goal_map = GoalZoneMap::new();
            let result =
                simulate_shooter(&mut rng, shooter, goalkeeper, shots_per_shooter, &mut goal_map);
            Some((result, goal_map))
        };

        let tallies: Vec<Option<(SimulationResult, GoalZoneMap)>> = if self.config.parallel {
            shooters.par_iter().enumerate().map(|(i, s)| run_one(i, *s)).collect()
        } else {
            let mut out = Vec::with_capacity(shooters.len());
            for (i, s) in shooters.iter().enumerate() {
                let tally = run_one(i, *s);
                let stop = tally.is_none();
                out.push(tally);
                if stop {
                    break;
                }
            }
            out
        };

        let completed = tallies.iter().filter(|t| t.is_some()).count();
        if completed < shooters.len() {
            warn!(completed, total = shooters.len(), "simulation cancelled");
            return Err(SimulationError::Cancelled { completed, total: shooters.len() });
        }

        // Merge per-shooter maps in roster order.
        let mut goal_map = GoalZoneMap::new();
        let mut results = Vec::with_capacity(shooters.len());
        for (result, shooter_map) in tallies.into_iter().flatten() {
            goal_map.merge(&shooter_map);
            results.push(result);
        }

        let report = SimulationReport {
            goalkeeper: goalkeeper.name.clone(),
            shots_per_shooter,
            seed: Some(seed),
            results,
            goal_map,
        };
        info!(total_goals = report.total_goals(), "simulation finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, ZoneId, ZoneProbabilities, ZONE_COUNT};

    fn player(name: &str, role: Role, p: f64) -> PlayerRecord {
        PlayerRecord::new(name, role, ZoneProbabilities::uniform(p).unwrap())
    }

    fn roster(keeper: f64, shooters: &[(&str, f64)]) -> Roster {
        let mut roster = Roster::new();
        roster.add_player(player("Keeper", Role::Goalkeeper, keeper));
        for (name, p) in shooters {
            roster.add_player(player(name, Role::Shooter, *p));
        }
        roster
    }

    #[test]
    fn effectiveness_rounds_to_two_decimals() {
        assert_eq!(effectiveness_percent(1, 3), 33.33);
        assert_eq!(effectiveness_percent(2, 3), 66.67);
        assert_eq!(effectiveness_percent(0, 10), 0.0);
        assert_eq!(effectiveness_percent(10, 10), 100.0);
    }

    #[test]
    fn effectiveness_ties_round_to_even() {
        assert_eq!(effectiveness_percent(1, 800), 0.12);
        assert_eq!(effectiveness_percent(3, 800), 0.38);
        assert_eq!(effectiveness_percent(5, 800), 0.62);
        assert_eq!(effectiveness_percent(1, 8), 12.5);
    }

    #[test]
    fn parse_shot_count_rejects_bad_input() {
        assert_eq!(parse_shot_count(" 1000 ").unwrap(), 1000);
        assert!(parse_shot_count("0").is_err());
        assert!(parse_shot_count("-5").is_err());
        assert!(parse_shot_count("many").is_err());
        assert!(parse_shot_count("").is_err());
    }

    #[test]
    fn zero_shots_rejected_before_running() {
        let r = roster(0.3, &[("A", 0.5)]);
        assert!(matches!(run_simulation(&r, 0, 1), Err(SimulationError::InvalidShotCount(_))));
    }

    #[test]
    fn invalid_roster_rejected_before_running() {
        let mut r = roster(0.3, &[("A", 0.5)]);
        r.add_player(player("Keeper 2", Role::Goalkeeper, 0.3));
        let err = run_simulation(&r, 100, 1).unwrap_err();
        assert!(err.to_string().contains("found 2 goalkeepers"));
    }

    #[test]
    fn goals_plus_non_goals_equals_shots() {
        let r = roster(0.3, &[("A", 0.5), ("B", 0.9), ("C", 0.1)]);
        let report = run_simulation(&r, 777, 2024).unwrap();

        assert_eq!(report.results.len(), 3);
        for result in &report.results {
            assert_eq!(result.shots(), 777);
            assert_eq!(result.effectiveness, effectiveness_percent(result.goals, 777));
        }
        assert_eq!(report.goal_map.total(), report.total_goals());
        assert_eq!(report.total_shots(), 3 * 777);
    }

    #[test]
    fn results_follow_roster_order() {
        let mut r = Roster::new();
        r.add_player(player("Zed", Role::Shooter, 0.5));
        r.add_player(player("Keeper", Role::Goalkeeper, 0.2));
        r.add_player(player("Amy", Role::Shooter, 0.5));

        let report = run_simulation(&r, 10, 5).unwrap();
        let names: Vec<_> = report.results.iter().map(|r| r.shooter.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
        assert_eq!(report.goalkeeper, "Keeper");
    }

    #[test]
    fn same_seed_same_report() {
        let r = roster(0.4, &[("A", 0.6), ("B", 0.7)]);
        let first = run_simulation(&r, 500, 42).unwrap();
        let second = run_simulation(&r, 500, 42).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, Some(42));
    }

    #[test]
    fn parallel_matches_sequential() {
        let r = roster(0.25, &[("A", 0.6), ("B", 0.7), ("C", 0.8), ("D", 0.2)]);
        let sequential = SimulationEngine::new(SimulationConfig::with_seed(9)).run(&r, 400).unwrap();
        let parallel = SimulationEngine::new(SimulationConfig {
            parallel: true,
            ..SimulationConfig::with_seed(9)
        })
        .run(&r, 400)
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn caller_rng_is_reproducible() {
        let r = roster(0.3, &[("A", 0.5), ("B", 0.5)]);
        let a = run_simulation_with_rng(&r, 300, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        let b = run_simulation_with_rng(&r, 300, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, None);
    }

    #[test]
    fn unseeded_run_records_its_seed() {
        let r = roster(0.3, &[("A", 0.5)]);
        let report = SimulationEngine::default().run(&r, 50).unwrap();
        let seed = report.seed.unwrap();
        assert_eq!(run_simulation(&r, 50, seed).unwrap(), report);
    }

    #[test]
    fn all_zero_shooter_never_scores() {
        let r = roster(0.0, &[("Blind", 0.0)]);
        let report = run_simulation(&r, 1000, 3).unwrap();
        assert_eq!(report.results[0].goals, 0);
        assert_eq!(report.results[0].non_goals, 1000);
        assert_eq!(report.goal_map.total(), 0);
    }

    #[test]
    fn perfect_shooter_against_empty_goal_always_scores() {
        let r = roster(0.0, &[("Ace", 1.0)]);
        let report = run_simulation(&r, 1000, 3).unwrap();
        assert_eq!(report.results[0].goals, 1000);
        assert_eq!(report.results[0].effectiveness, 100.0);
    }

    #[test]
    fn keeper_covering_only_reachable_zone_concedes_nothing() {
        let mut only_z1 = [0.0; ZONE_COUNT];
        only_z1[0] = 1.0;
        let zones = ZoneProbabilities::new(only_z1).unwrap();

        let mut r = Roster::new();
        r.add_player(PlayerRecord::new("Keeper", Role::Goalkeeper, zones));
        r.add_player(PlayerRecord::new("Shooter", Role::Shooter, zones));

        let report = run_simulation(&r, 1000, 1234).unwrap();
        assert_eq!(report.results[0].goals, 0);
        assert_eq!(report.goal_map.get(ZoneId::FIRST), 0);
    }

    #[test]
    fn cancelled_run_returns_no_report() {
        let r = roster(0.3, &[("A", 0.5), ("B", 0.5)]);
        let cancel = AtomicBool::new(true);
        let engine = SimulationEngine::new(SimulationConfig::with_seed(1));
        let err = engine.run_cancellable(&r, 100, &cancel).unwrap_err();
        assert_eq!(err, SimulationError::Cancelled { completed: 0, total: 2 });

        let cancel = AtomicBool::new(false);
        assert!(engine.run_cancellable(&r, 100, &cancel).is_ok());
    }
}
