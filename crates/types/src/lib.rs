//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the game. They are
//! plain data with no I/O, usable from the simulation core, the terminal view
//! and the asset loader alike.
//!
//! # Geometry
//!
//! The reference levels are 15x15 tiles of 8x8 pixels (a 120x120 pixel play
//! area). Positions are measured in pixels from the top-left corner, with `y`
//! growing downwards.
//!
//! # Tuning Constants
//!
//! Speeds are in pixels per second, accelerations in pixels per second squared:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_ACCELERATION` | 375 | Applied while not climbing |
//! | `PLAYER_MAX_SPEED` | 50 | Horizontal walking speed |
//! | `PLAYER_JUMP_SPEED` | 125 | Upward speed of a normal jump |
//! | `PLAYER_CLIMBING_SPEED` | 40 | Ladder speed |
//! | `PLAYER_DEATH_JUMP_SPEED` | 100 | Bounce when caught |
//! | `PLAYER_CELEBRATION_JUMP_SPEED` | 75 | Victory hops |
//! | `ENEMY_MIN_SPEED` / `ENEMY_MAX_SPEED` | 10 / 20 | Patrol speed range |
//! | `ENEMY_CLIMBING_SPEED` | 20 | Enemy ladder speed |
//!
//! Every constant is mirrored into [`GameConfig::default`], which is what the
//! simulation actually reads.
//!
//! # Examples
//!
//! ```
//! use ninja_thief_types::{ClimbingState, GameConfig, HorizontalDirection, TILE_SIZE};
//!
//! let config = GameConfig::default();
//! assert_eq!(config.geometry.tile_size, TILE_SIZE);
//! assert_eq!(config.geometry.ninja_border(), 2.0);
//!
//! assert_eq!(HorizontalDirection::Left.flipped(), HorizontalDirection::Right);
//! assert!(ClimbingState::Up.is_climbing());
//! assert!(!ClimbingState::None.is_climbing());
//! ```

pub mod config;
pub mod input;

pub use config::{
    CollectableConfig, ConfigError, EnemyConfig, GameConfig, GeometryConfig, PhysicsConfig, PlayerConfig,
    TileIdConfig,
};
pub use input::{Button, InputFrame, InputProvider};

/// Size of one tile (and one ninja sprite) in pixels.
pub const TILE_SIZE: f32 = 8.0;

/// Play area width in tiles.
pub const GAME_WIDTH_TILES: usize = 15;

/// Play area height in tiles.
pub const GAME_HEIGHT_TILES: usize = 15;

/// Visible width of a ninja inside its sprite cell.
pub const NINJA_WIDTH: f32 = 4.0;

/// How far (in pixels) a ninja may already have sunk into a one-way platform
/// and still be moved back on top of it.
pub const ONE_WAY_PLATFORM_TOLERANCE: f32 = 2.0;

/// Downward acceleration while not climbing.
pub const GRAVITY_ACCELERATION: f32 = 375.0;

pub const PLAYER_MAX_SPEED: f32 = 50.0;
pub const PLAYER_JUMP_SPEED: f32 = 125.0;
pub const PLAYER_CLIMBING_SPEED: f32 = 40.0;
pub const PLAYER_DEATH_JUMP_SPEED: f32 = 100.0;
pub const PLAYER_CELEBRATION_JUMP_SPEED: f32 = 75.0;

/// Number of victory hops after the last coin is collected.
pub const PLAYER_CELEBRATION_JUMP_COUNT: u8 = 3;

pub const ENEMY_MIN_SPEED: f32 = 10.0;
pub const ENEMY_MAX_SPEED: f32 = 20.0;
pub const ENEMY_CLIMBING_SPEED: f32 = 20.0;

/// Width of the probe an enemy uses to notice the end of its platform.
pub const ENEMY_PLATFORM_DETECTION_WIDTH: f32 = 6.0;

/// Chance that an enemy climbs a ladder it walks onto.
pub const ENEMY_CLIMB_NEXT_LADDER_CHANCE: f32 = 0.2;

/// Coins and gems are drawn smaller than a full tile.
pub const COLLECTABLE_SIZE: f32 = 4.0;
pub const COIN_SCORE: u32 = 2;
pub const GEM_SCORE: u32 = 5;

/// Universal "nothing here" tile id across all level layers.
pub const BLANK_TILE: u8 = 0xff;

/// Platform ids: left edge, middle, right edge, single.
pub const PLATFORM_TILES: [u8; 4] = [0x00, 0x01, 0x02, 0x03];

pub const LADDER_TILE: u8 = 0x0b;
pub const GEM_TILE: u8 = 0x12;
pub const COIN_TILE: u8 = 0x13;

/// Spawn marker for the player (the blue idle sprite).
pub const PLAYER_SPAWN_TILE: u8 = 0x20;

/// Red sprites sit this many ids after their blue counterparts.
pub const RED_OFFSET: u8 = 4;

/// Spawn marker for enemies (the red idle sprite).
pub const ENEMY_SPAWN_TILE: u8 = PLAYER_SPAWN_TILE + RED_OFFSET;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Horizontal facing of a ninja.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalDirection {
    Left,
    Right,
}

impl HorizontalDirection {
    /// -1 for left, +1 for right.
    pub fn sign(&self) -> f32 {
        match self {
            HorizontalDirection::Left => -1.0,
            HorizontalDirection::Right => 1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            HorizontalDirection::Left => HorizontalDirection::Right,
            HorizontalDirection::Right => HorizontalDirection::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HorizontalDirection::Left => "left",
            HorizontalDirection::Right => "right",
        }
    }
}

/// Ladder state of a ninja.
///
/// - **None**: free movement, gravity applies
/// - **Idle**: attached to a ladder, not moving vertically
/// - **Up** / **Down**: moving along the ladder at climbing speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClimbingState {
    #[default]
    None,
    Idle,
    Up,
    Down,
}

impl ClimbingState {
    /// True while attached to a ladder (gravity suppressed).
    pub fn is_climbing(&self) -> bool {
        !matches!(self, ClimbingState::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimbingState::None => "none",
            ClimbingState::Idle => "idle",
            ClimbingState::Up => "up",
            ClimbingState::Down => "down",
        }
    }
}

/// Skin of a ninja. Only affects rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    Blue,
    Red,
}
