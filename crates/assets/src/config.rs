use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::GameConfig;

/// Load the game config, or the defaults when no path is given.
///
/// The file only needs the fields it overrides.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&json)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

/// Launch settings for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub levels_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub seed: u32,
    pub event_log_path: Option<PathBuf>,
    pub start_level: u32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            levels_dir: PathBuf::from("levels"),
            config_path: None,
            seed: 1,
            event_log_path: None,
            start_level: 1,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

impl LaunchConfig {
    /// Create from environment variables. Unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let levels_dir = non_empty_var("NINJA_LEVELS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.levels_dir);
        let config_path = non_empty_var("NINJA_CONFIG").map(PathBuf::from);
        let seed = non_empty_var("NINJA_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);
        let event_log_path = non_empty_var("NINJA_EVENT_LOG").map(PathBuf::from);
        let start_level = non_empty_var("NINJA_START_LEVEL")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n >= 1)
            .unwrap_or(defaults.start_level);

        Self {
            levels_dir,
            config_path,
            seed,
            event_log_path,
            start_level,
        }
    }
}
