//! Simulation configuration
//!
//! Loaded from JSON or YAML. `PENALTY_SIM_CONFIG_PATH` points at an
//! optional file that replaces the defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "PENALTY_SIM_CONFIG_PATH";

/// Number of shooter heatmaps shown next to the goalkeeper's.
pub const DISPLAY_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Trials per shooter (default: 1000)
    #[serde(default = "default_shots_per_shooter")]
    pub shots_per_shooter: u32,

    /// Fixed seed for reproducible runs. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Spread shooters across the rayon pool.
    #[serde(default)]
    pub parallel: bool,

    /// Shooter heatmap slots (default: 3)
    #[serde(default = "default_display_capacity")]
    pub display_capacity: usize,
}

fn default_shots_per_shooter() -> u32 {
    1000
}

fn default_display_capacity() -> usize {
    DISPLAY_CAPACITY
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            shots_per_shooter: default_shots_per_shooter(),
            seed: None,
            parallel: false,
            display_capacity: default_display_capacity(),
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file, choosing the format from its extension (`.yaml`/`.yml`
    /// or JSON otherwise).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Config named by `PENALTY_SIM_CONFIG_PATH`, or defaults when unset.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        tracing::info!(path, "loading simulation config from {}", CONFIG_PATH_ENV);
        Self::from_path(Path::new(path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shots_per_shooter == 0 {
            return Err(ConfigError::Validation(
                "shots_per_shooter must be at least 1".to_string(),
            ));
        }
        if self.display_capacity == 0 {
            return Err(ConfigError::Validation(
                "display_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
