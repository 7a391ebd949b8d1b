//! Tunable game configuration.
//!
//! Every section is `#[serde(default)]`, so a config file only needs to name
//! the values it overrides:
//!
//! ```
//! use ninja_thief_types::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{"physics":{"gravity":500.0}}"#).unwrap();
//! assert_eq!(config.physics.gravity, 500.0);
//! assert_eq!(config.player.jump_speed, 125.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    BLANK_TILE, COIN_SCORE, COIN_TILE, COLLECTABLE_SIZE, ENEMY_CLIMBING_SPEED,
    ENEMY_CLIMB_NEXT_LADDER_CHANCE, ENEMY_MAX_SPEED, ENEMY_MIN_SPEED,
    ENEMY_PLATFORM_DETECTION_WIDTH, ENEMY_SPAWN_TILE, GAME_HEIGHT_TILES, GAME_WIDTH_TILES,
    GEM_SCORE, GEM_TILE, GRAVITY_ACCELERATION, LADDER_TILE, NINJA_WIDTH,
    ONE_WAY_PLATFORM_TOLERANCE, PLATFORM_TILES, PLAYER_CELEBRATION_JUMP_COUNT,
    PLAYER_CELEBRATION_JUMP_SPEED, PLAYER_CLIMBING_SPEED, PLAYER_DEATH_JUMP_SPEED,
    PLAYER_JUMP_SPEED, PLAYER_MAX_SPEED, PLAYER_SPAWN_TILE, TILE_SIZE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub geometry: GeometryConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub collectables: CollectableConfig,
    pub tiles: TileIdConfig,
}

/// A config value the engine cannot run with.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Must be a finite number greater than zero.
    NotPositive { field: &'static str, value: f32 },
    /// Must be a finite number, zero or more.
    Negative { field: &'static str, value: f32 },
    /// Must lie in `0.0..=1.0`.
    NotProbability { field: &'static str, value: f32 },
    /// `field` may not exceed `limit`.
    TooLarge {
        field: &'static str,
        value: f32,
        limit: &'static str,
    },
    /// The grid needs at least one tile in each direction.
    EmptyGrid,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must be zero or more, got {}", field, value)
            }
            ConfigError::NotProbability { field, value } => {
                write!(f, "{} must be between 0 and 1, got {}", field, value)
            }
            ConfigError::TooLarge { field, value, limit } => {
                write!(f, "{} ({}) may not exceed {}", field, value, limit)
            }
            ConfigError::EmptyGrid => write!(f, "grid has zero width or height"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn at_most(
    field: &'static str,
    value: f32,
    limit_name: &'static str,
    limit: f32,
) -> Result<(), ConfigError> {
    if value <= limit {
        Ok(())
    } else {
        Err(ConfigError::TooLarge {
            field,
            value,
            limit: limit_name,
        })
    }
}

impl GameConfig {
    /// Reject values the engine cannot run with.
    ///
    /// Speeds and sizes must be finite and not negative. The ninja and the
    /// collectables must fit inside one tile, and enemy speeds must form a
    /// range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        positive("geometry.tile_size", g.tile_size)?;
        if g.width_tiles == 0 || g.height_tiles == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        positive("geometry.ninja_width", g.ninja_width)?;
        at_most(
            "geometry.ninja_width",
            g.ninja_width,
            "geometry.tile_size",
            g.tile_size,
        )?;
        non_negative(
            "geometry.one_way_platform_tolerance",
            g.one_way_platform_tolerance,
        )?;

        non_negative("physics.gravity", self.physics.gravity)?;

        let p = &self.player;
        non_negative("player.max_speed", p.max_speed)?;
        non_negative("player.jump_speed", p.jump_speed)?;
        non_negative("player.climbing_speed", p.climbing_speed)?;
        non_negative("player.death_jump_speed", p.death_jump_speed)?;
        non_negative("player.celebration_jump_speed", p.celebration_jump_speed)?;

        let e = &self.enemy;
        non_negative("enemy.min_speed", e.min_speed)?;
        non_negative("enemy.max_speed", e.max_speed)?;
        at_most("enemy.min_speed", e.min_speed, "enemy.max_speed", e.max_speed)?;
        non_negative("enemy.climbing_speed", e.climbing_speed)?;
        non_negative(
            "enemy.platform_detection_width",
            e.platform_detection_width,
        )?;
        if !(0.0..=1.0).contains(&e.climb_next_ladder_chance) {
            return Err(ConfigError::NotProbability {
                field: "enemy.climb_next_ladder_chance",
                value: e.climb_next_ladder_chance,
            });
        }

        positive("collectables.size", self.collectables.size)?;
        at_most(
            "collectables.size",
            self.collectables.size,
            "geometry.tile_size",
            g.tile_size,
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub tile_size: f32,
    pub width_tiles: usize,
    pub height_tiles: usize,
    pub ninja_width: f32,
    pub one_way_platform_tolerance: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            width_tiles: GAME_WIDTH_TILES,
            height_tiles: GAME_HEIGHT_TILES,
            ninja_width: NINJA_WIDTH,
            one_way_platform_tolerance: ONE_WAY_PLATFORM_TOLERANCE,
        }
    }
}

impl GeometryConfig {
    /// Gap between the sprite edge and the hitbox on each side.
    pub fn ninja_border(&self) -> f32 {
        (self.tile_size - self.ninja_width) / 2.0
    }

    pub fn width_px(&self) -> f32 {
        self.width_tiles as f32 * self.tile_size
    }

    pub fn height_px(&self) -> f32 {
        self.height_tiles as f32 * self.tile_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY_ACCELERATION,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_speed: f32,
    pub jump_speed: f32,
    pub climbing_speed: f32,
    pub death_jump_speed: f32,
    pub celebration_jump_speed: f32,
    pub celebration_jump_count: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_speed: PLAYER_MAX_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            climbing_speed: PLAYER_CLIMBING_SPEED,
            death_jump_speed: PLAYER_DEATH_JUMP_SPEED,
            celebration_jump_speed: PLAYER_CELEBRATION_JUMP_SPEED,
            celebration_jump_count: PLAYER_CELEBRATION_JUMP_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub min_speed: f32,
    pub max_speed: f32,
    pub climbing_speed: f32,
    pub platform_detection_width: f32,
    pub climb_next_ladder_chance: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            min_speed: ENEMY_MIN_SPEED,
            max_speed: ENEMY_MAX_SPEED,
            climbing_speed: ENEMY_CLIMBING_SPEED,
            platform_detection_width: ENEMY_PLATFORM_DETECTION_WIDTH,
            climb_next_ladder_chance: ENEMY_CLIMB_NEXT_LADDER_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectableConfig {
    /// Hit size of coins and gems, centred inside their tile.
    pub size: f32,
    pub coin_score: u32,
    pub gem_score: u32,
}

impl Default for CollectableConfig {
    fn default() -> Self {
        Self {
            size: COLLECTABLE_SIZE,
            coin_score: COIN_SCORE,
            gem_score: GEM_SCORE,
        }
    }
}

impl CollectableConfig {
    /// Inset of the collectable hit square from the tile edge.
    pub fn border(&self, tile_size: f32) -> f32 {
        (tile_size - self.size) / 2.0
    }
}

/// Tile ids with gameplay meaning. Anything else is decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileIdConfig {
    pub blank: u8,
    pub platforms: Vec<u8>,
    pub ladder: u8,
    pub coin: u8,
    pub gem: u8,
    pub player_spawn: u8,
    pub enemy_spawn: u8,
}

impl Default for TileIdConfig {
    fn default() -> Self {
        Self {
            blank: BLANK_TILE,
            platforms: PLATFORM_TILES.to_vec(),
            ladder: LADDER_TILE,
            coin: COIN_TILE,
            gem: GEM_TILE,
            player_spawn: PLAYER_SPAWN_TILE,
            enemy_spawn: ENEMY_SPAWN_TILE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = GameConfig::default();
        assert_eq!(config.geometry.width_px(), 120.0);
        assert_eq!(config.geometry.height_px(), 120.0);
        assert_eq!(config.collectables.border(config.geometry.tile_size), 2.0);
        assert_eq!(config.player.celebration_jump_count, 3);
        assert_eq!(config.tiles.platforms, vec![0, 1, 2, 3]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{"player":{"jump_speed":150.0},"tiles":{"ladder":12}}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.player.jump_speed, 150.0);
        assert_eq!(config.player.max_speed, PLAYER_MAX_SPEED);
        assert_eq!(config.tiles.ladder, 12);
        assert_eq!(config.tiles.coin, COIN_TILE);
        assert_eq!(config.enemy, EnemyConfig::default());
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let config: GameConfig =
            serde_json::from_str(r#"{"player":{"max_speed":-50.0}}"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "player.max_speed",
                value: -50.0
            })
        );
    }

    #[test]
    fn nan_speed_is_rejected() {
        let mut config = GameConfig::default();
        config.enemy.climbing_speed = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn ninja_wider_than_tile_is_rejected() {
        let mut config = GameConfig::default();
        config.geometry.ninja_width = 20.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("geometry.ninja_width"));
    }

    #[test]
    fn enemy_speed_range_must_be_ordered() {
        let mut config = GameConfig::default();
        config.enemy.min_speed = 30.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge {
                field: "enemy.min_speed",
                ..
            })
        ));
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let mut config = GameConfig::default();
        config.geometry.tile_size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { .. })
        ));
    }
}
