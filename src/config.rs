use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const ENV_GAP_COEFFICIENT: &str = "RUNNR_GAP_COEFFICIENT";
pub const ENV_FPS_CAP: &str = "RUNNR_FPS_CAP";

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub game: GameSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameSettings {
    /// Scales every obstacle type's minimum gap. Higher values spread
    /// obstacles further apart.
    #[serde(default = "default_gap_coefficient")]
    pub gap_coefficient: f64,
    /// Maximum run of consecutive same-kind obstacles.
    #[serde(default = "default_max_obstacle_duplication")]
    pub max_obstacle_duplication: usize,
    /// Doubles obstacle gaps, for players relying on timing cues.
    #[serde(default)]
    pub audio_cues: bool,
    /// Halves the game speed; the alt-mode type table compensates by
    /// inflating gaps and halving speed thresholds.
    #[serde(default)]
    pub slowdown: bool,
    /// Allows collectable obstacle kinds into the spawn pool even outside
    /// the alt game mode.
    #[serde(default)]
    pub alt_game_mode: bool,
    /// Use the reduced y-slot table for flying obstacles (short terminals).
    #[serde(default)]
    pub compact_layout: bool,
    /// Upper bound on frames rendered per second.
    #[serde(default = "default_fps_cap")]
    pub fps_cap: u64,
}

pub fn default_gap_coefficient() -> f64 {
    0.6
}

pub fn default_max_obstacle_duplication() -> usize {
    2
}

pub fn default_fps_cap() -> u64 {
    30
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            gap_coefficient: default_gap_coefficient(),
            max_obstacle_duplication: default_max_obstacle_duplication(),
            audio_cues: false,
            slowdown: false,
            alt_game_mode: false,
            compact_layout: false,
            fps_cap: default_fps_cap(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let mut config = Self::default();
            config.apply_env_overrides()?;
            return Ok(config);
        }

        let mut config = Self::load_from_path(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(ENV_GAP_COEFFICIENT) {
            let coefficient =
                val.trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidEnvVar {
                        name: ENV_GAP_COEFFICIENT,
                        value: val.clone(),
                    })?;
            self.game.gap_coefficient = coefficient;
        }

        if let Ok(val) = env::var(ENV_FPS_CAP) {
            let cap = val
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: ENV_FPS_CAP,
                    value: val.clone(),
                })?;
            self.game.fps_cap = cap;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.gap_coefficient <= 0.0 || self.game.gap_coefficient > 10.0 {
            return Err(ConfigError::InvalidGapCoefficient(
                self.game.gap_coefficient,
            ));
        }

        if self.game.max_obstacle_duplication == 0 {
            return Err(ConfigError::InvalidMaxDuplication(
                self.game.max_obstacle_duplication,
            ));
        }

        if self.game.fps_cap == 0 || self.game.fps_cap > 120 {
            return Err(ConfigError::InvalidFpsCap(self.game.fps_cap));
        }

        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(ConfigError::ParseError)
    }

    pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            dirs::config_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
                .ok_or(ConfigError::NoConfigDir)?
        };

        Ok(config_dir.join("runnr"))
    }

    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.display().to_string(),
            source: e,
        })
    }
}
