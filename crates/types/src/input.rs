//! Input capability consumed by the player.
//!
//! The simulation only asks two questions per logical button: is it held right
//! now, and was it pressed since the previous frame. Devices implement
//! [`InputProvider`]; [`InputFrame`] is a plain value implementation used for
//! tests and scripted play.

/// Logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Jump,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::Jump,
    ];

    /// Dense index, stable for per-button arrays.
    pub fn index(&self) -> usize {
        match self {
            Button::Left => 0,
            Button::Right => 1,
            Button::Up => 2,
            Button::Down => 3,
            Button::Jump => 4,
        }
    }

    fn bit(&self) -> u8 {
        1 << self.index()
    }
}

/// Source of per-frame button state.
pub trait InputProvider {
    /// Button is currently held down.
    fn held(&self, button: Button) -> bool;

    /// Button went from released to pressed since the previous frame.
    fn just_pressed(&self, button: Button) -> bool;
}

/// One frame of button state.
///
/// # Examples
///
/// ```
/// use ninja_thief_types::{Button, InputFrame, InputProvider};
///
/// let frame = InputFrame::new().hold(Button::Left).press(Button::Jump);
/// assert!(frame.held(Button::Left));
/// assert!(!frame.just_pressed(Button::Left));
/// assert!(frame.held(Button::Jump));
/// assert!(frame.just_pressed(Button::Jump));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    held: u8,
    pressed: u8,
}

impl InputFrame {
    /// Nothing held, nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(mut self, button: Button) -> Self {
        self.held |= button.bit();
        self
    }

    /// Marks a fresh press. A pressed button is also held.
    pub fn press(mut self, button: Button) -> Self {
        self.held |= button.bit();
        self.pressed |= button.bit();
        self
    }

    /// Same buttons held, no new presses.
    pub fn without_presses(mut self) -> Self {
        self.pressed = 0;
        self
    }
}

impl InputProvider for InputFrame {
    fn held(&self, button: Button) -> bool {
        self.held & button.bit() != 0
    }

    fn just_pressed(&self, button: Button) -> bool {
        self.pressed & button.bit() != 0
    }
}
