//! Asset loading module - level files and the game config file
//!
//! Everything here touches the filesystem or the environment and reports
//! failures as `anyhow` errors with the offending path attached. The core
//! crate never sees a file.
//!
//! # Level files
//!
//! One JSON document per level, named `level_<n>.json` (1-based) inside the
//! levels directory:
//!
//! ```json
//! { "width": 15, "height": 15, "platforms": [...], "extras": [...], "entity_spawns": [...] }
//! ```
//!
//! Each layer is a row-major array of `width * height` tile ids; `255` is
//! blank.
//!
//! # Environment
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `NINJA_LEVELS_DIR` | `levels` | directory holding the level files |
//! | `NINJA_CONFIG` | unset | JSON file overriding [`GameConfig`](crate::types::GameConfig) fields |
//! | `NINJA_SEED` | `1` | enemy RNG seed |
//! | `NINJA_EVENT_LOG` | unset | JSON-lines gameplay event log |
//! | `NINJA_START_LEVEL` | `1` | first level to play |

pub mod config;
pub mod level_file;

pub use ninja_thief_core as core;
pub use ninja_thief_types as types;

pub use config::{load_config, LaunchConfig};
pub use level_file::{count_levels, level_path, load_level, parse_level, LevelFile};
