use crate::level::LevelState;
use crate::ninja::Ninja;
use crate::tiles::Extra;
use crate::types::{ClimbingState, Colour, HorizontalDirection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NinjaSnapshot {
    pub x: f32,
    pub y: f32,
    pub facing: HorizontalDirection,
    pub climbing: ClimbingState,
    pub colour: Colour,
}

impl From<&Ninja> for NinjaSnapshot {
    fn from(value: &Ninja) -> Self {
        Self {
            x: value.x(),
            y: value.y(),
            facing: value.facing(),
            climbing: value.climbing_state(),
            colour: value.colour(),
        }
    }
}

impl Default for NinjaSnapshot {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            facing: HorizontalDirection::Right,
            climbing: ClimbingState::None,
            colour: Colour::Blue,
        }
    }
}

/// Read-only copy of a level for rendering.
///
/// Layers are classified (`platforms[i]` is true for a platform cell) so a
/// renderer never needs the tile id table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelSnapshot {
    pub level_number: u32,
    pub state: LevelState,
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub platforms: Vec<bool>,
    pub extras: Vec<Extra>,
    pub player: NinjaSnapshot,
    pub player_dead: bool,
    pub player_won: bool,
    pub score: u32,
    pub coins_left: usize,
    pub enemies: Vec<NinjaSnapshot>,
}

impl LevelSnapshot {
    pub fn is_platform(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.platforms[y * self.width + x]
    }

    pub fn extra(&self, x: usize, y: usize) -> Extra {
        if x < self.width && y < self.height {
            self.extras[y * self.width + x]
        } else {
            Extra::Empty
        }
    }

    pub fn playable(&self) -> bool {
        self.state == LevelState::Playing
    }
}
