pub mod json_api;

pub use json_api::{
    simulate_penalties_json, PlayerData, SimulationRequest, SimulationResponse, SCHEMA_VERSION,
};
