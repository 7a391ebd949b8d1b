//! Terminal input module (engine-facing).
//!
//! This crate is independent of the simulation. It maps `crossterm` key
//! events onto the logical [`Button`](crate::types::Button)s and front-end
//! [`Command`]s, and provides [`KeyboardInput`], an
//! [`InputProvider`](crate::types::InputProvider) that works in terminals
//! with and without key-release events.

pub mod handler;
pub mod map;

pub use ninja_thief_types as types;

pub use handler::KeyboardInput;
pub use map::{map_button, map_command, should_quit, Command};
