//! Game configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Individual fields can also be overridden at runtime through
//! `setoption`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::PlayerNo;

/// Errors raised while loading or updating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },
}

/// Tunable parameters for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_ships_per_squad: usize,
    pub initiative: PlayerNo,
    /// Side length of the square play area.
    pub play_area_mm: f64,
    /// RNG seed for AI choices; 0 seeds from entropy.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_ships_per_squad: 8,
            initiative: PlayerNo::Player1,
            play_area_mm: 914.4,
            seed: 0,
        }
    }
}

/// Runtime options as advertised in the handshake: name, type, default.
pub const OPTIONS: [(&str, &str); 3] = [
    ("MaxShips", "spin default 8 min 1 max 8"),
    ("Initiative", "combo default p1 var p1 var p2"),
    ("Seed", "spin default 0 min 0 max 18446744073709551615"),
];

impl GameConfig {
    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<GameConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Applies a `setoption` override. Names are case-insensitive.
    pub fn apply_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue { name: name.to_string(), value: value.to_string() };
        match name.to_ascii_lowercase().as_str() {
            "maxships" => {
                let n: usize = value.parse().map_err(|_| invalid())?;
                if n == 0 {
                    return Err(invalid());
                }
                self.max_ships_per_squad = n;
            }
            "initiative" => {
                self.initiative = PlayerNo::from_name(value).ok_or_else(invalid)?;
            }
            "seed" => {
                self.seed = value.parse().map_err(|_| invalid())?;
            }
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}
