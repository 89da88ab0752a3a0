use serde::{Deserialize, Serialize};

use crate::config::{SimulationConfig, DISPLAY_CAPACITY};
use crate::engine::{HeatmapPanel, SimulationEngine, SimulationReport};
use crate::error::{PenaltyError, Result};
use crate::models::{PlayerRecord, Role, Roster};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub seed: Option<u64>,
    pub shots_per_shooter: u32,
    #[serde(default)]
    pub parallel: bool,
    /// Shooter heatmap slots in the response (default: 3)
    #[serde(default)]
    pub display_capacity: Option<usize>,
    pub players: Vec<PlayerData>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerData {
    pub name: String,
    pub role: Role,
    pub zones: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub schema_version: u8,
    pub report: SimulationReport,
    pub heatmap: HeatmapPanel,
}

fn build_roster(players: Vec<PlayerData>) -> Result<Roster> {
    let mut roster = Roster::new();
    for player in players {
        let record = PlayerRecord::from_values(player.name, player.role, &player.zones)?;
        roster.add_player(record);
    }
    Ok(roster)
}

/// Run a simulation described by a JSON request and return the JSON
/// response.
///
/// Request:
/// ```json
/// {
///   "schema_version": 1,
///   "seed": 42,
///   "shots_per_shooter": 1000,
///   "players": [
///     { "name": "Keeper", "role": "goalkeeper", "zones": [0.3, ...] },
///     { "name": "Taker",  "role": "shooter",    "zones": [0.5, ...] }
///   ]
/// }
/// ```
pub fn simulate_penalties_json(request_json: &str) -> Result<String> {
    let request: SimulationRequest = serde_json::from_str(request_json)?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(PenaltyError::UnsupportedSchema(request.schema_version));
    }

    let config = SimulationConfig {
        shots_per_shooter: request.shots_per_shooter,
        seed: request.seed,
        parallel: request.parallel,
        display_capacity: request.display_capacity.unwrap_or(DISPLAY_CAPACITY),
    };
    config.validate()?;

    let roster = build_roster(request.players)?;
    roster.validate_for_simulation()?;

    let report = SimulationEngine::new(config.clone()).run(&roster, config.shots_per_shooter)?;
    let heatmap = HeatmapPanel::build(&roster, config.display_capacity)?;

    let response = SimulationResponse { schema_version: SCHEMA_VERSION, report, heatmap };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sha2::{Digest, Sha256};

    fn request(seed: u64, players: serde_json::Value) -> String {
        json!({
            "schema_version": 1,
            "seed": seed,
            "shots_per_shooter": 500,
            "players": players,
        })
        .to_string()
    }

    fn standard_players() -> serde_json::Value {
        json!([
            { "name": "Keeper", "role": "goalkeeper", "zones": vec![0.3; 18] },
            { "name": "Ana", "role": "shooter", "zones": vec![0.7; 18] },
            { "name": "Bea", "role": "Tirador", "zones": vec![0.5; 18] },
        ])
    }

    #[test]
    fn basic_simulation() {
        let out = simulate_penalties_json(&request(42, standard_players())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["report"]["goalkeeper"], "Keeper");
        assert_eq!(parsed["report"]["results"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["heatmap"]["shooters"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["report"]["seed"], 42);
    }

    #[test]
    fn same_seed_same_bytes() {
        let req = request(999, standard_players());
        let a = simulate_penalties_json(&req).unwrap();
        let b = simulate_penalties_json(&req).unwrap();

        let digest = |s: &str| format!("{:x}", Sha256::digest(s.as_bytes()));
        assert_eq!(digest(&a), digest(&b));
    }

    #[test]
    fn unsupported_schema_rejected() {
        let req = json!({
            "schema_version": 2,
            "shots_per_shooter": 10,
            "players": standard_players(),
        })
        .to_string();
        assert!(matches!(simulate_penalties_json(&req), Err(PenaltyError::UnsupportedSchema(2))));
    }

    #[test]
    fn out_of_range_zone_rejected() {
        let players = json!([
            { "name": "Keeper", "role": "goalkeeper", "zones": vec![1.3; 18] },
            { "name": "Ana", "role": "shooter", "zones": vec![0.7; 18] },
        ]);
        assert!(matches!(simulate_penalties_json(&request(1, players)), Err(PenaltyError::Entry(_))));
    }

    #[test]
    fn spanish_and_mixed_case_roles_accepted() {
        let players = json!([
            { "name": "Portero", "role": "PORTERO", "zones": vec![0.3; 18] },
            { "name": "Ana", "role": "tirador", "zones": vec![0.7; 18] },
            { "name": "Bea", "role": "Shooter", "zones": vec![0.5; 18] },
        ]);
        let out = simulate_penalties_json(&request(3, players)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["report"]["goalkeeper"], "Portero");
        assert_eq!(parsed["report"]["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn missing_goalkeeper_rejected() {
        let players = json!([{ "name": "Ana", "role": "shooter", "zones": vec![0.7; 18] }]);
        let err = simulate_penalties_json(&request(1, players)).unwrap_err();
        assert!(matches!(err, PenaltyError::Roster(_)));
        assert!(err.to_string().contains("found 0 goalkeepers"));
    }

    #[test]
    fn zero_shots_rejected() {
        let req = json!({
            "schema_version": 1,
            "shots_per_shooter": 0,
            "players": standard_players(),
        })
        .to_string();
        assert!(matches!(simulate_penalties_json(&req), Err(PenaltyError::Config(_))));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            simulate_penalties_json("{ not json"),
            Err(PenaltyError::Deserialization(_))
        ));
    }
}
