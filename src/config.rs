//! Settings for the self-play soak runner.
//!
//! Values come from [`SimulationConfig::default`], optionally replaced by a TOML
//! file; the command line overrides whatever the file says.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub games: u32,
    /// Seed of the first game; game `i` uses `seed + i`.
    pub seed: u64,
    /// Turns after which an unfinished game is abandoned.
    pub max_turns: u32,
    pub white_name: String,
    pub black_name: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: 42,
            max_turns: 2_000,
            white_name: "White".into(),
            black_name: "Black".into(),
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::Invalid("games must be at least 1".into()));
        }
        if self.max_turns == 0 {
            return Err(ConfigError::Invalid("max_turns must be at least 1".into()));
        }
        if self.white_name == self.black_name {
            return Err(ConfigError::Invalid("players need different names".into()));
        }
        Ok(())
    }
}
