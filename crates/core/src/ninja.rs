//! Ninja module - shared movement and collision engine
//!
//! A [`Ninja`] is a sprite-sized body moving over a [`LevelData`] grid. Each
//! frame [`Ninja::update`] runs, in order:
//!
//! 1. Vertical velocity: gravity when not climbing, otherwise the climbing speed
//!    for the current [`ClimbingState`]
//! 2. Horizontal velocity clamp to `±max_speed`
//! 3. Position integration, keeping the hitbox inside the grid horizontally
//! 4. One-way platform landing
//! 5. Ladder detection, dropping out of the climb when no ladder is near
//!
//! Platforms only stop a ninja falling onto them from above. Walking into one
//! from the side or jumping into one from below passes straight through.
//!
//! The hitbox is narrower than the sprite: `border` pixels are trimmed from
//! each side, the full sprite height is kept.
//!
//! Player and enemy behaviour live outside the engine and drive it through
//! the [`Steer`] capability.

use crate::geometry::Rect;
use crate::level_data::LevelData;
use crate::types::{ClimbingState, Colour, GameConfig, HorizontalDirection};

/// Ladders are detected this far below the feet so a ninja standing on the
/// top of a ladder can climb down it.
const LADDER_REACH: f32 = 1.0;

/// Per-body tuning, copied out of [`GameConfig`] at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NinjaParams {
    pub max_speed: f32,
    pub climbing_speed: f32,
    pub gravity: f32,
    pub size: f32,
    pub border: f32,
    pub platform_tolerance: f32,
}

impl NinjaParams {
    pub fn player(config: &GameConfig) -> Self {
        Self::with_speeds(config, config.player.max_speed, config.player.climbing_speed)
    }

    pub fn enemy(config: &GameConfig) -> Self {
        Self::with_speeds(config, config.enemy.max_speed, config.enemy.climbing_speed)
    }

    fn with_speeds(config: &GameConfig, max_speed: f32, climbing_speed: f32) -> Self {
        Self {
            max_speed,
            climbing_speed,
            gravity: config.physics.gravity,
            size: config.geometry.tile_size,
            border: config.geometry.ninja_border(),
            platform_tolerance: config.geometry.one_way_platform_tolerance,
        }
    }
}

/// Capability that decides a ninja's intent before the engine moves it.
pub trait Steer {
    /// Set velocity, facing, climbing state or jump on `body` for this frame.
    fn steer(&mut self, body: &mut Ninja, level: &LevelData);
}

/// Generic ninja body.
#[derive(Debug, Clone, PartialEq)]
pub struct Ninja {
    colour: Colour,
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    facing: HorizontalDirection,
    climbing: ClimbingState,
    can_jump: bool,
    can_climb: bool,
    collides: bool,
    params: NinjaParams,
}

impl Ninja {
    /// New body at rest with its sprite's top-left corner at `(x, y)`.
    pub fn new(colour: Colour, x: f32, y: f32, params: NinjaParams) -> Self {
        Self {
            colour,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            facing: HorizontalDirection::Right,
            climbing: ClimbingState::None,
            can_jump: false,
            can_climb: false,
            collides: true,
            params,
        }
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn vx(&self) -> f32 {
        self.vx
    }

    pub fn vy(&self) -> f32 {
        self.vy
    }

    pub fn set_vx(&mut self, vx: f32) {
        self.vx = vx;
    }

    pub fn set_vy(&mut self, vy: f32) {
        self.vy = vy;
    }

    pub fn facing(&self) -> HorizontalDirection {
        self.facing
    }

    pub fn set_facing(&mut self, facing: HorizontalDirection) {
        self.facing = facing;
    }

    pub fn climbing_state(&self) -> ClimbingState {
        self.climbing
    }

    pub fn set_climbing_state(&mut self, state: ClimbingState) {
        self.climbing = state;
    }

    /// Landed on a platform during the last update.
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Overlapped a ladder during the last update.
    pub fn can_climb(&self) -> bool {
        self.can_climb
    }

    pub fn collides(&self) -> bool {
        self.collides
    }

    /// Disabling collisions makes the body ignore platforms and ladders.
    pub fn set_collides(&mut self, collides: bool) {
        self.collides = collides;
    }

    pub fn params(&self) -> &NinjaParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut NinjaParams {
        &mut self.params
    }

    /// Hitbox at the current position.
    pub fn hitbox(&self) -> Rect {
        self.hitbox_at(self.x, self.y)
    }

    fn hitbox_at(&self, x: f32, y: f32) -> Rect {
        Rect::new(
            x + self.params.border,
            y,
            x + self.params.size - self.params.border,
            y + self.params.size,
        )
    }

    /// Horizontal centre of the hitbox.
    pub fn center_x(&self) -> f32 {
        self.x + self.params.size / 2.0
    }

    /// Launch upwards. Always accepted; callers check [`Ninja::can_jump`].
    pub fn jump(&mut self, jump_speed: f32) {
        self.vy = -jump_speed;
        self.can_jump = false;
    }

    /// Let `steer` set intent, then advance the body by `dt` seconds.
    pub fn step<S: Steer + ?Sized>(&mut self, dt: f32, level: &LevelData, steer: &mut S) {
        steer.steer(self, level);
        self.update(dt, level);
    }

    /// Advance the body by `dt` seconds and resolve collisions against `level`.
    pub fn update(&mut self, dt: f32, level: &LevelData) {
        match self.climbing {
            ClimbingState::None => self.vy += self.params.gravity * dt,
            ClimbingState::Idle => self.vy = 0.0,
            ClimbingState::Up => self.vy = -self.params.climbing_speed,
            ClimbingState::Down => self.vy = self.params.climbing_speed,
        }
        self.vx = self.vx.clamp(-self.params.max_speed, self.params.max_speed);

        let prev_y = self.y;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.clamp_to_level(level);

        if self.vx < 0.0 {
            self.facing = HorizontalDirection::Left;
        } else if self.vx > 0.0 {
            self.facing = HorizontalDirection::Right;
        }

        self.can_jump = false;
        self.can_climb = false;
        if self.collides {
            self.handle_platforms(level, prev_y);
            self.handle_ladders(level);
        }

        if !self.can_climb {
            self.climbing = ClimbingState::None;
        }
    }

    fn clamp_to_level(&mut self, level: &LevelData) {
        let min_x = -self.params.border;
        let max_x = level.width_px() - self.params.size + self.params.border;
        if min_x <= max_x {
            self.x = self.x.clamp(min_x, max_x);
        }
    }

    /// Leftmost or rightmost position allowed by the grid width.
    pub fn at_level_edge(&self, level: &LevelData, direction: HorizontalDirection) -> bool {
        match direction {
            HorizontalDirection::Left => self.x <= -self.params.border,
            HorizontalDirection::Right => {
                self.x >= level.width_px() - self.params.size + self.params.border
            }
        }
    }

    fn handle_platforms(&mut self, level: &LevelData, prev_y: f32) {
        if matches!(self.climbing, ClimbingState::Up | ClimbingState::Idle) || self.vy < 0.0 {
            return;
        }

        let hitbox = self.hitbox();
        let prev_bottom = prev_y + self.params.size;
        let swept = Rect::new(hitbox.left, prev_y, hitbox.right, hitbox.bottom);
        let passing_ladders = self.climbing == ClimbingState::Down;

        let mut landing: Option<f32> = None;
        for (tx, ty) in level.span(&swept).cells() {
            if !level.is_platform(tx, ty) {
                continue;
            }
            if passing_ladders && level.is_ladder(tx, ty) {
                continue;
            }
            let (left, top) = level.tile_origin(tx, ty);
            if !hitbox.overlaps_x(left, left + level.tile_size()) {
                continue;
            }
            if prev_bottom <= top + self.params.platform_tolerance && hitbox.bottom >= top {
                landing = Some(landing.map_or(top, |best: f32| best.min(top)));
            }
        }

        if let Some(top) = landing {
            self.y = top - self.params.size;
            self.vy = 0.0;
            self.can_jump = true;
            if self.climbing == ClimbingState::Down {
                self.climbing = ClimbingState::None;
            }
        }
    }

    fn handle_ladders(&mut self, level: &LevelData) {
        let reach = self.hitbox().extend_down(LADDER_REACH);
        for (tx, ty) in level.span(&reach).cells() {
            if !level.is_ladder(tx, ty) {
                continue;
            }
            let (left, top) = level.tile_origin(tx, ty);
            if reach.overlaps(&Rect::square(left, top, level.tile_size())) {
                self.can_climb = true;
                return;
            }
        }
    }

    /// Strict overlap between the hitbox and a square object.
    pub fn check_colliding(&self, object_x: f32, object_y: f32, object_size: f32) -> bool {
        self.hitbox()
            .overlaps(&Rect::square(object_x, object_y, object_size))
    }

    /// Strict overlap between two hitboxes.
    pub fn check_ninja_colliding(&self, other: &Ninja) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LADDER_TILE;

    const DT: f32 = 0.016;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn ninja_at(x: f32, y: f32) -> Ninja {
        Ninja::new(Colour::Blue, x, y, NinjaParams::player(&config()))
    }

    #[test]
    fn test_gravity_in_open_air() {
        let level = LevelData::blank(5, 5, &config());
        let mut ninja = ninja_at(8.0, 0.0);
        ninja.update(DT, &level);
        assert!((ninja.vy() - 375.0 * DT).abs() < 1e-4);
        assert!(!ninja.can_jump());
    }

    #[test]
    fn test_landing_snaps_to_platform_top() {
        let mut level = LevelData::blank(3, 3, &config());
        level.set_platform(1, 2, 0x01);

        let mut ninja = ninja_at(8.0, 7.0);
        ninja.set_vy(100.0);
        ninja.update(DT, &level);

        assert_eq!(ninja.y(), 8.0);
        assert_eq!(ninja.vy(), 0.0);
        assert!(ninja.can_jump());
    }

    #[test]
    fn test_resting_keeps_can_jump() {
        let mut level = LevelData::blank(3, 3, &config());
        level.set_platform(1, 2, 0x01);

        let mut ninja = ninja_at(8.0, 8.0);
        for _ in 0..30 {
            ninja.update(DT, &level);
            assert_eq!(ninja.y(), 8.0);
            assert!(ninja.can_jump());
        }
    }

    #[test]
    fn test_jump_passes_up_through_platform() {
        let mut level = LevelData::blank(3, 5, &config());
        level.set_platform(1, 2, 0x01);

        let mut ninja = ninja_at(8.0, 24.0);
        ninja.jump(125.0);
        for _ in 0..20 {
            ninja.update(DT, &level);
        }
        assert!(ninja.y() < 16.0);
    }

    #[test]
    fn test_feet_inside_tolerance_snap_up() {
        let mut level = LevelData::blank(3, 3, &config());
        level.set_platform(1, 2, 0x01);

        // Feet 1.5px below the platform top.
        let mut ninja = ninja_at(8.0, 9.5);
        ninja.update(DT, &level);
        assert_eq!(ninja.y(), 8.0);
        assert_eq!(ninja.vy(), 0.0);
        assert!(ninja.can_jump());
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let mut level = LevelData::blank(3, 3, &config());
        level.set_platform(1, 2, 0x01);

        let mut ninja = ninja_at(8.0, 10.0);
        ninja.update(DT, &level);
        assert_eq!(ninja.y(), 8.0);
        assert_eq!(ninja.vy(), 0.0);
        assert!(ninja.can_jump());
    }

    #[test]
    fn test_deep_below_tolerance_does_not_snap() {
        let mut level = LevelData::blank(3, 3, &config());
        level.set_platform(1, 2, 0x01);

        // Feet already 3px into the platform, beyond the 2px tolerance.
        let mut ninja = ninja_at(8.0, 11.0);
        ninja.update(DT, &level);
        assert!(ninja.y() > 11.0);
        assert!(!ninja.can_jump());
    }

    #[test]
    fn test_hitbox_border_misses_platform_edge() {
        let mut level = LevelData::blank(3, 3, &config());
        level.set_platform(0, 2, 0x01);

        // Sprite overlaps column 0 by 2px, hitbox does not.
        let mut ninja = ninja_at(6.0, 8.0);
        ninja.update(DT, &level);
        assert!(!ninja.can_jump());
    }

    #[test]
    fn test_horizontal_clamp_to_max_speed() {
        let level = LevelData::blank(10, 10, &config());
        let mut ninja = ninja_at(40.0, 0.0);
        ninja.set_vx(1000.0);
        ninja.update(DT, &level);
        assert_eq!(ninja.vx(), 50.0);
        assert_eq!(ninja.facing(), HorizontalDirection::Right);
    }

    #[test]
    fn test_stays_inside_level_horizontally() {
        let level = LevelData::blank(3, 3, &config());
        let mut ninja = ninja_at(0.0, 0.0);
        ninja.set_vx(-50.0);
        for _ in 0..10 {
            ninja.update(DT, &level);
        }
        assert_eq!(ninja.x(), -2.0);
        assert!(ninja.at_level_edge(&level, HorizontalDirection::Left));
    }

    #[test]
    fn test_facing_kept_when_stopped() {
        let level = LevelData::blank(10, 10, &config());
        let mut ninja = ninja_at(40.0, 0.0);
        ninja.set_vx(-10.0);
        ninja.update(DT, &level);
        ninja.set_vx(0.0);
        ninja.update(DT, &level);
        assert_eq!(ninja.facing(), HorizontalDirection::Left);
    }

    #[test]
    fn test_climbing_without_ladder_resets() {
        let level = LevelData::blank(3, 3, &config());
        let mut ninja = ninja_at(8.0, 0.0);
        ninja.set_climbing_state(ClimbingState::Up);
        ninja.update(DT, &level);
        assert_eq!(ninja.climbing_state(), ClimbingState::None);
    }

    #[test]
    fn test_climb_up_ignores_gravity() {
        let mut level = LevelData::blank(3, 5, &config());
        for y in 0..5 {
            level.set_extra(1, y, LADDER_TILE);
        }
        let mut ninja = ninja_at(8.0, 24.0);
        ninja.update(DT, &level);
        assert!(ninja.can_climb());

        ninja.set_climbing_state(ClimbingState::Up);
        ninja.update(DT, &level);
        assert_eq!(ninja.vy(), -40.0);
        assert_eq!(ninja.climbing_state(), ClimbingState::Up);

        ninja.set_climbing_state(ClimbingState::Idle);
        let y = ninja.y();
        ninja.update(DT, &level);
        assert_eq!(ninja.vy(), 0.0);
        assert_eq!(ninja.y(), y);
    }

    #[test]
    fn test_climb_down_passes_ladder_platform_and_lands_on_plain_one() {
        let mut level = LevelData::blank(3, 5, &config());
        // Ladder from row 1 to row 3 through a platform at row 1,
        // with a plain floor at row 4.
        for y in 1..4 {
            level.set_extra(1, y, LADDER_TILE);
        }
        level.set_platform(1, 1, 0x01);
        level.set_platform(1, 4, 0x01);

        let mut ninja = ninja_at(8.0, 0.0);
        ninja.update(DT, &level);
        assert!(ninja.can_jump());
        assert!(ninja.can_climb());

        for _ in 0..200 {
            if ninja.climbing_state() == ClimbingState::None && ninja.y() > 8.0 {
                break;
            }
            ninja.set_climbing_state(ClimbingState::Down);
            ninja.update(DT, &level);
        }
        assert_eq!(ninja.y(), 24.0);
        assert_eq!(ninja.climbing_state(), ClimbingState::None);
        assert!(ninja.can_jump());
    }

    #[test]
    fn test_no_collisions_falls_through_platforms() {
        let mut level = LevelData::blank(3, 3, &config());
        level.set_platform(1, 2, 0x01);
        let mut ninja = ninja_at(8.0, 8.0);
        ninja.set_collides(false);
        ninja.update(DT, &level);
        assert!(ninja.y() > 8.0);
        assert!(!ninja.can_jump());
    }

    #[test]
    fn test_check_colliding_is_strict() {
        let ninja = ninja_at(0.0, 0.0);
        // Hitbox spans x in (2, 6), y in (0, 8).
        assert!(ninja.check_colliding(5.0, 4.0, 4.0));
        assert!(!ninja.check_colliding(6.0, 0.0, 4.0));
        assert!(!ninja.check_colliding(-2.0, 0.0, 4.0));
        assert!(!ninja.check_colliding(2.0, 8.0, 4.0));
    }

    #[test]
    fn test_check_ninja_colliding() {
        let a = ninja_at(0.0, 0.0);
        let b = ninja_at(3.0, 0.0);
        let c = ninja_at(4.0, 0.0);
        assert!(a.check_ninja_colliding(&b));
        assert!(!a.check_ninja_colliding(&c));
    }

    #[test]
    fn test_step_runs_steer_before_update() {
        struct Right;
        impl Steer for Right {
            fn steer(&mut self, body: &mut Ninja, _level: &LevelData) {
                body.set_vx(50.0);
            }
        }

        let level = LevelData::blank(10, 10, &config());
        let mut ninja = ninja_at(40.0, 0.0);
        ninja.step(0.1, &level, &mut Right);
        assert!((ninja.x() - 45.0).abs() < 1e-4);
    }
}
