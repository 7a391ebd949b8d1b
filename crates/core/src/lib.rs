//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the movement engine, the player and enemy behaviour
//! and the level state machine. It has **no dependencies** on the terminal,
//! files or clocks, making it:
//!
//! - **Deterministic**: same level data, seed and inputs give the same run
//! - **Testable**: every rule is exercised without a terminal
//! - **Fast**: the per-frame update path does not allocate
//!
//! # Module Structure
//!
//! - [`tiles`]: tile id classification
//! - [`level_data`]: the platform, extras and spawn layers of one level
//! - [`geometry`]: strict rectangle overlap
//! - [`ninja`]: shared movement/collision engine and the [`Steer`] capability
//! - [`player`]: input-driven ninja with scoring, death and celebration
//! - [`enemy`]: patrolling ninja with seedable randomness
//! - [`rng`]: LCG random source
//! - [`level`]: one playable level and its state machine
//! - [`snapshot`]: read-only copy of a level for rendering
//!
//! # Physics
//!
//! | Rule | Behaviour |
//! |------|-----------|
//! | Gravity | 375 px/s² while not on a ladder |
//! | Platforms | one-way, landable from above within a 2px tolerance |
//! | Ladders | climb at a fixed speed, no gravity |
//! | Walls | none, only the left and right edges of the level |
//!
//! # Example
//!
//! ```
//! use ninja_thief_core::{Level, LevelData, LevelState};
//! use ninja_thief_types::{Button, GameConfig, InputFrame, COIN_TILE, PLAYER_SPAWN_TILE};
//!
//! let config = GameConfig::default();
//! let mut data = LevelData::blank(6, 4, &config);
//! for x in 0..6 {
//!     data.set_platform(x, 3, 0x01);
//! }
//! data.set_spawn(1, 2, PLAYER_SPAWN_TILE);
//! data.set_extra(3, 2, COIN_TILE);
//!
//! let mut level = Level::new(1, data, &config, 1).unwrap();
//! let right = InputFrame::new().hold(Button::Right);
//! for _ in 0..60 {
//!     level.update(0.016, &right);
//! }
//!
//! assert_eq!(level.coins_left(), 0);
//! assert_eq!(level.player().score(), 2);
//! assert_eq!(level.state(), LevelState::PlayerWon);
//! ```
//!
//! # Timing
//!
//! Callers pass the elapsed time in seconds to [`Level::update`]. The
//! terminal front end uses a fixed 16ms step; larger steps are accepted but
//! fast bodies may tunnel through platforms.

pub mod enemy;
pub mod geometry;
pub mod level;
pub mod level_data;
pub mod ninja;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod tiles;

pub use ninja_thief_types as types;

// Re-export commonly used types for convenience
pub use enemy::{EnemyBrain, EnemyNinja};
pub use level::{Level, LevelEvent, LevelState, MAX_LEVEL_EVENTS};
pub use level_data::{LevelData, LevelDataError, LevelLayers, TileSpan};
pub use ninja::{Ninja, NinjaParams, Steer};
pub use player::{Collectible, CollectibleKind, InputSteer, PlayerNinja, PlayerState};
pub use rng::{RandomSource, SimpleRng};
pub use snapshot::{LevelSnapshot, NinjaSnapshot};
pub use tiles::{Extra, Spawn, TileSet};
