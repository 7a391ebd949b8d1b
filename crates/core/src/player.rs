//! Player module - the input-driven ninja
//!
//! [`PlayerNinja`] wraps a blue [`Ninja`] and adds:
//!
//! - **Steering** from an [`InputProvider`] through [`InputSteer`]
//! - **Scoring**: coins and gems touched by the hitbox are removed from the
//!   level and added to the score
//! - **Death**: a bounce off the bottom of the screen with collisions disabled
//! - **Winning**: a fixed number of celebration hops, then
//!   [`PlayerNinja::finished_celebrating`]
//!
//! Dead and won are mutually exclusive latches. Once either is set the
//! player ignores input for the rest of the level.

use arrayvec::ArrayVec;

use crate::level_data::LevelData;
use crate::ninja::{Ninja, NinjaParams, Steer};
use crate::tiles::Extra;
use crate::types::{
    Button, ClimbingState, CollectableConfig, Colour, GameConfig, InputProvider, PlayerConfig,
};

/// Most items collected in one frame. A hitbox no larger than a tile
/// overlaps at most 2x2 collectables; anything beyond waits a frame.
pub const MAX_COLLECTED_PER_FRAME: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    Coin,
    Gem,
}

impl CollectibleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::Coin => "coin",
            CollectibleKind::Gem => "gem",
        }
    }
}

/// A coin or gem removed from the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub x: i32,
    pub y: i32,
    pub points: u32,
}

/// Coarse player phase, derived from the latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Alive,
    Dead,
    Celebrating,
}

/// Steering from held and just-pressed buttons.
///
/// Horizontal velocity is rebuilt from scratch: left subtracts, right adds, so
/// holding both cancels out. Climbing intent only applies near a ladder.
#[derive(Debug)]
pub struct InputSteer<'a, I: ?Sized> {
    input: &'a I,
    max_speed: f32,
    jump_speed: f32,
}

impl<'a, I: InputProvider + ?Sized> InputSteer<'a, I> {
    pub fn new(input: &'a I, max_speed: f32, jump_speed: f32) -> Self {
        Self {
            input,
            max_speed,
            jump_speed,
        }
    }
}

impl<I: InputProvider + ?Sized> Steer for InputSteer<'_, I> {
    fn steer(&mut self, body: &mut Ninja, _level: &LevelData) {
        let mut vx = 0.0;
        if self.input.held(Button::Left) {
            vx -= self.max_speed;
        }
        if self.input.held(Button::Right) {
            vx += self.max_speed;
        }
        body.set_vx(vx);

        if body.can_climb() {
            let up = self.input.held(Button::Up);
            let down = self.input.held(Button::Down);
            if up != down {
                body.set_climbing_state(if up {
                    ClimbingState::Up
                } else {
                    ClimbingState::Down
                });
            } else if body.climbing_state().is_climbing() {
                body.set_climbing_state(ClimbingState::Idle);
            }
        }

        if self.input.just_pressed(Button::Jump) && body.can_jump() {
            body.jump(self.jump_speed);
        }
    }
}

/// The player-controlled ninja.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerNinja {
    ninja: Ninja,
    score: u32,
    dead: bool,
    won: bool,
    celebration_jumps_remaining: u8,
    tuning: PlayerConfig,
    collectables: CollectableConfig,
}

impl PlayerNinja {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            ninja: Ninja::new(Colour::Blue, x, y, NinjaParams::player(config)),
            score: 0,
            dead: false,
            won: false,
            celebration_jumps_remaining: config.player.celebration_jump_count,
            tuning: config.player,
            collectables: config.collectables,
        }
    }

    /// Start with a score carried over from earlier levels.
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    pub fn ninja(&self) -> &Ninja {
        &self.ninja
    }

    pub fn ninja_mut(&mut self) -> &mut Ninja {
        &mut self.ninja
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn state(&self) -> PlayerState {
        if self.dead {
            PlayerState::Dead
        } else if self.won {
            PlayerState::Celebrating
        } else {
            PlayerState::Alive
        }
    }

    pub fn celebration_jumps_remaining(&self) -> u8 {
        self.celebration_jumps_remaining
    }

    /// One frame: steer, move, then collect whatever the hitbox touches.
    pub fn update<I: InputProvider + ?Sized>(
        &mut self,
        dt: f32,
        level: &mut LevelData,
        input: &I,
    ) -> ArrayVec<Collectible, MAX_COLLECTED_PER_FRAME> {
        if self.won {
            self.ninja.set_vx(0.0);
            if self.ninja.can_jump() && self.celebration_jumps_remaining > 0 {
                self.ninja.jump(self.tuning.celebration_jump_speed);
                self.celebration_jumps_remaining -= 1;
            }
            self.ninja.update(dt, level);
        } else if self.dead {
            self.ninja.set_vx(0.0);
            self.ninja.update(dt, level);
        } else {
            let mut steer =
                InputSteer::new(input, self.tuning.max_speed, self.tuning.jump_speed);
            self.ninja.step(dt, level, &mut steer);
        }

        let mut collected = ArrayVec::new();
        if self.dead {
            return collected;
        }
        for (tx, ty) in level.span(&self.ninja.hitbox()).cells() {
            if collected.is_full() {
                break;
            }
            if let Some(item) = self.handle_scoring(level, tx, ty) {
                collected.push(item);
            }
        }
        collected
    }

    /// Collect the coin or gem at tile `(x, y)` if the hitbox overlaps it.
    ///
    /// Blank cells and other extras are ignored, so repeated calls on the
    /// same cell score at most once.
    pub fn handle_scoring(&mut self, level: &mut LevelData, x: i32, y: i32) -> Option<Collectible> {
        let (kind, points) = match level.extra_kind(x, y) {
            Extra::Coin => (CollectibleKind::Coin, self.collectables.coin_score),
            Extra::Gem => (CollectibleKind::Gem, self.collectables.gem_score),
            Extra::Empty | Extra::Ladder => return None,
        };

        let border = self.collectables.border(level.tile_size());
        let (left, top) = level.tile_origin(x, y);
        if !self
            .ninja
            .check_colliding(left + border, top + border, self.collectables.size)
        {
            return None;
        }

        level.clear_extra(x, y);
        self.score = self.score.saturating_add(points);
        Some(Collectible { kind, x, y, points })
    }

    /// Latch death: bounce up, then fall through everything.
    pub fn set_dead(&mut self) {
        if self.won || self.dead {
            return;
        }
        self.dead = true;
        self.ninja.set_climbing_state(ClimbingState::None);
        self.ninja.set_collides(false);
        self.ninja.jump(self.tuning.death_jump_speed);
    }

    /// Latch victory and restart the celebration count.
    pub fn set_won(&mut self) {
        if self.dead || self.won {
            return;
        }
        self.won = true;
        self.ninja.set_climbing_state(ClimbingState::None);
        self.celebration_jumps_remaining = self.tuning.celebration_jump_count;
    }

    /// All celebration hops done and back on the ground.
    pub fn finished_celebrating(&self) -> bool {
        self.ninja.can_jump() && self.celebration_jumps_remaining == 0
    }
}
