//! Session configuration: defaults, an optional JSON file, then env overrides.
use std::{env, fs, path::PathBuf, str::FromStr};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::map::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, MIN_MAP_HEIGHT, MIN_MAP_WIDTH};

pub const CONFIG_ENV: &str = "ROGUELINE_CONFIG";
pub const SEED_ENV: &str = "ROGUELINE_SEED";
pub const DEPTH_ENV: &str = "ROGUELINE_DEPTH";
pub const SCRIPT_ENV: &str = "ROGUELINE_SCRIPT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed config")]
    Json(#[from] serde_json::Error),
    #[error("{field} = {value} is outside {min}..={max}")]
    Invalid {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed; a clock-derived one is used when absent.
    pub seed: Option<u64>,
    pub depth: i32,
    pub map_width: i32,
    pub map_height: i32,
    pub debug: bool,
    /// Command script to play instead of reading the keyboard.
    pub script: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            depth: 1,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            debug: true,
            script: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    /// Reads `ROGUELINE_CONFIG` if set, then applies the seed, depth and
    /// script variables on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_ENV).map(PathBuf::from) {
            Some(path) => {
                let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                let config: Self =
                    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                info!(?path, "loaded config file");
                config
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()
    }

    /// Clamps depth to at least 1 and rejects maps the console cannot hold.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.depth = self.depth.max(1);
        check_range("map_width", self.map_width, MIN_MAP_WIDTH, DEFAULT_MAP_WIDTH)?;
        check_range("map_height", self.map_height, MIN_MAP_HEIGHT, DEFAULT_MAP_HEIGHT)?;
        Ok(self)
    }

    fn apply_env(&mut self) {
        if let Some(seed) = read_env::<u64>(SEED_ENV) {
            self.seed = Some(seed);
        }
        if let Some(depth) = read_env::<i32>(DEPTH_ENV) {
            self.depth = depth;
        }
        if let Some(script) = env::var_os(SCRIPT_ENV) {
            self.script = Some(PathBuf::from(script));
        }
    }

    /// Seed to use for this run, falling back to the wall clock.
    pub fn resolved_seed(&self) -> u64 {
        self.seed
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs())
    }
}

fn check_range(field: &'static str, value: i32, min: i32, max: i32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value,
            min,
            max,
        })
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
