use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{LevelData, LevelLayers};
use crate::types::GameConfig;

/// On-disk shape of a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    pub width: usize,
    pub height: usize,
    pub platforms: Vec<u8>,
    pub extras: Vec<u8>,
    pub entity_spawns: Vec<u8>,
}

impl From<LevelFile> for LevelLayers {
    fn from(value: LevelFile) -> Self {
        Self {
            width: value.width,
            height: value.height,
            platforms: value.platforms,
            extras: value.extras,
            entity_spawns: value.entity_spawns,
        }
    }
}

/// Parse and validate a level document.
///
/// The grid must match the configured dimensions.
pub fn parse_level(json: &str, config: &GameConfig) -> Result<LevelData> {
    let file: LevelFile = serde_json::from_str(json).context("invalid level JSON")?;

    let geometry = &config.geometry;
    if file.width != geometry.width_tiles || file.height != geometry.height_tiles {
        bail!(
            "level is {}x{} tiles, config expects {}x{}",
            file.width,
            file.height,
            geometry.width_tiles,
            geometry.height_tiles
        );
    }

    Ok(LevelData::from_layers(file.into(), config)?)
}

/// Read and parse one level file.
pub fn load_level(path: &Path, config: &GameConfig) -> Result<LevelData> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    parse_level(&json, config).with_context(|| format!("failed to load level {}", path.display()))
}

/// Path of level `number` (1-based) inside `dir`.
pub fn level_path(dir: &Path, number: u32) -> PathBuf {
    dir.join(format!("level_{}.json", number))
}

/// Number of consecutive level files starting at `level_1.json`.
pub fn count_levels(dir: &Path) -> u32 {
    let mut n = 0;
    while level_path(dir, n + 1).is_file() {
        n += 1;
    }
    n
}
