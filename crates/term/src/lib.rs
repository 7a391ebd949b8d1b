//! Terminal front end rendering.
//!
//! A small game-oriented rendering layer: the level is drawn into a plain
//! [`FrameBuffer`] of styled characters by [`LevelView`], and
//! [`TerminalRenderer`] flushes only the changed runs of cells to the
//! terminal.
//!
//! - Pure drawing ([`fb`], [`game_view`]) is unit-testable without a terminal
//! - Each tile is two columns wide to keep the square tile grid square on
//!   screen

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use ninja_thief_core as core;
pub use ninja_thief_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, LevelView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
