//! Runtime settings read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | clock-derived | Piece factory seed (u32) |
//! | `BLOCKFALL_SOUND` | `on` | `0/1/true/false/on/off` |
//! | `BLOCKFALL_FPS` | `60` | Frame rate, `1..=240` |
//! | `BLOCKFALL_LOG` | unset | Log file path; no logging when unset |

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::engine::EngineConfig;
use crate::types::TARGET_FPS;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const SOUND_VAR: &str = "BLOCKFALL_SOUND";
pub const FPS_VAR: &str = "BLOCKFALL_FPS";
pub const LOG_VAR: &str = "BLOCKFALL_LOG";

pub const MAX_FPS: u32 = 240;

/// Errors from reading settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an unsigned 32-bit integer, got {value:?}")]
    InvalidSeed { var: &'static str, value: String },

    #[error("{var} must be one of 0/1/true/false/on/off, got {value:?}")]
    InvalidSound { var: &'static str, value: String },

    #[error("{var} must be between 1 and {max}, got {value:?}")]
    InvalidFps {
        var: &'static str,
        value: String,
        max: u32,
    },
}

/// Result type alias for settings parsing
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed: u32,
    pub sound_enabled: bool,
    pub fps: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            sound_enabled: true,
            fps: TARGET_FPS,
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match var(SEED_VAR) {
            Some(value) => value.parse::<u32>().map_err(|_| ConfigError::InvalidSeed {
                var: SEED_VAR,
                value,
            })?,
            None => clock_seed(),
        };

        let sound_enabled = match var(SOUND_VAR) {
            Some(value) => parse_switch(&value).ok_or(ConfigError::InvalidSound {
                var: SOUND_VAR,
                value,
            })?,
            None => true,
        };

        let fps = match var(FPS_VAR) {
            Some(value) => match value.parse::<u32>() {
                Ok(fps) if (1..=MAX_FPS).contains(&fps) => fps,
                _ => {
                    return Err(ConfigError::InvalidFps {
                        var: FPS_VAR,
                        value,
                        max: MAX_FPS,
                    })
                }
            },
            None => TARGET_FPS,
        };

        let log_path = var(LOG_VAR).map(PathBuf::from);

        Ok(Self {
            seed,
            sound_enabled,
            fps,
            log_path,
        })
    }

    /// Target duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            sound_enabled: self.sound_enabled,
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
