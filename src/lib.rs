//! Ninja Thief (workspace facade crate).
//!
//! The game lives in dedicated crates under `crates/`; this package re-exports
//! them as `ninja_thief::{assets,core,input,term,types}` and adds the pieces
//! the terminal binary is built from:
//!
//! - [`session`]: level progression (retry on failure, advance on completion)
//! - [`event_log`]: optional JSON-lines record of gameplay events

pub mod event_log;
pub mod session;

pub use ninja_thief_assets as assets;
pub use ninja_thief_core as core;
pub use ninja_thief_input as input;
pub use ninja_thief_term as term;
pub use ninja_thief_types as types;
