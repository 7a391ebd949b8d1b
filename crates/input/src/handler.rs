//! Keyboard state for terminal environments.
//!
//! Terminals report key presses, but many never report releases. Without
//! release events a key counts as held until no press or repeat for it has
//! arrived within `key_release_timeout_ms`. As soon as one release event is
//! seen the terminal is trusted and the timeout is no longer applied.

use std::time::Instant;

use crossterm::event::KeyCode;

use crate::map::map_button;
use crate::types::{Button, InputProvider};

// Bridges the gap between repeats once auto-repeat is running. The initial
// repeat delay is usually 250-500ms, so without release events a held key
// drops out after 150ms and comes back as a fresh press on the first repeat.
// A held jump key can therefore jump twice. Terminals with release events
// are unaffected.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

const BUTTON_COUNT: usize = Button::ALL.len();

/// Held and just-pressed state for every [`Button`].
#[derive(Debug, Clone)]
pub struct KeyboardInput {
    /// Time of the last press or repeat, `None` when released.
    held_since: [Option<Instant>; BUTTON_COUNT],
    /// Presses since the last [`KeyboardInput::end_frame`].
    pressed: [bool; BUTTON_COUNT],
    release_events_seen: bool,
    key_release_timeout_ms: u32,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            held_since: [None; BUTTON_COUNT],
            pressed: [false; BUTTON_COUNT],
            release_events_seen: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Record a key press. Returns the button it maps to, if any.
    ///
    /// Only a press of a released button counts as a fresh press.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Button> {
        let button = map_button(code)?;
        let i = button.index();
        if self.held_since[i].is_none() {
            self.pressed[i] = true;
        }
        self.held_since[i] = Some(Instant::now());
        Some(button)
    }

    /// Record an auto-repeat event: keeps the button held, never a fresh press.
    pub fn handle_key_repeat(&mut self, code: KeyCode) {
        if let Some(button) = map_button(code) {
            self.held_since[button.index()] = Some(Instant::now());
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.release_events_seen = true;
        if let Some(button) = map_button(code) {
            self.held_since[button.index()] = None;
        }
    }

    /// Release buttons whose key has gone quiet, for terminals without
    /// release events. Call once per frame before the simulation reads input.
    pub fn update(&mut self) {
        if self.release_events_seen {
            return;
        }
        let timeout = self.key_release_timeout_ms as u128;
        for held in &mut self.held_since {
            if let Some(since) = *held {
                if since.elapsed().as_millis() > timeout {
                    *held = None;
                }
            }
        }
    }

    /// Forget this frame's fresh presses. Call after the simulation step.
    pub fn end_frame(&mut self) {
        self.pressed = [false; BUTTON_COUNT];
    }

    pub fn reset(&mut self) {
        self.held_since = [None; BUTTON_COUNT];
        self.pressed = [false; BUTTON_COUNT];
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for KeyboardInput {
    fn held(&self, button: Button) -> bool {
        self.held_since[button.index()].is_some()
    }

    fn just_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }
}
