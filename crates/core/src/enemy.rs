//! Enemy module - patrolling red ninjas
//!
//! An [`EnemyNinja`] walks back and forth along its platform at a patrol
//! speed drawn once at spawn. It turns around when:
//!
//! - the ground probe ahead of it finds no platform (the end of a ledge), or
//! - it reaches the left or right edge of the level.
//!
//! When its centre column arrives on a ladder it may climb it, with
//! probability `climb_next_ladder_chance`. It climbs up if the ladder runs
//! through its body, down if the ladder only starts below its feet, and
//! stops walking until it leaves the ladder.
//!
//! All randomness comes from an injected [`RandomSource`].

use crate::level_data::LevelData;
use crate::ninja::{Ninja, NinjaParams, Steer};
use crate::rng::{RandomSource, SimpleRng};
use crate::types::{ClimbingState, Colour, EnemyConfig, GameConfig};

/// Enemy steering: patrol, turn at ledges, sometimes climb.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBrain<R = SimpleRng> {
    patrol_speed: f32,
    platform_detection_width: f32,
    climb_chance: f32,
    on_ladder: bool,
    rng: R,
}

impl<R: RandomSource> EnemyBrain<R> {
    pub fn new(config: &EnemyConfig, mut rng: R) -> Self {
        let patrol_speed = rng.next_range_f32(config.min_speed, config.max_speed);
        Self {
            patrol_speed,
            platform_detection_width: config.platform_detection_width,
            climb_chance: config.climb_next_ladder_chance,
            on_ladder: false,
            rng,
        }
    }

    pub fn patrol_speed(&self) -> f32 {
        self.patrol_speed
    }

    /// Ladder in the centre column: running through the body (`Some(true)`)
    /// or starting just below the feet (`Some(false)`).
    fn ladder_under(body: &Ninja, level: &LevelData) -> Option<bool> {
        let size = body.params().size;
        let (tx, ty) = level.tile_at(body.center_x(), body.y() + size / 2.0);
        let (_, feet_ty) = level.tile_at(body.center_x(), body.y() + size + 1.0);
        if level.is_ladder(tx, ty) {
            Some(true)
        } else if level.is_ladder(tx, feet_ty) {
            Some(false)
        } else {
            None
        }
    }

    fn ledge_ahead(&self, body: &Ninja, level: &LevelData) -> bool {
        let probe_x =
            body.center_x() + body.facing().sign() * self.platform_detection_width / 2.0;
        let probe_y = body.y() + body.params().size + 1.0;
        let (tx, ty) = level.tile_at(probe_x, probe_y);
        !level.in_bounds(tx, ty) || !level.is_platform(tx, ty)
    }
}

impl<R: RandomSource> Steer for EnemyBrain<R> {
    fn steer(&mut self, body: &mut Ninja, level: &LevelData) {
        let ladder = Self::ladder_under(body, level);
        let arrived = ladder.is_some() && !self.on_ladder;
        self.on_ladder = ladder.is_some();

        if let Some(through_body) = ladder {
            if arrived && body.can_jump() && self.rng.chance(self.climb_chance) {
                let (tx, _) = level.tile_at(body.center_x(), body.y());
                let (column_x, _) = level.tile_origin(tx, 0);
                body.set_position(column_x, body.y());
                body.set_climbing_state(if through_body {
                    ClimbingState::Up
                } else {
                    ClimbingState::Down
                });
            }
        }

        if body.climbing_state().is_climbing() {
            body.set_vx(0.0);
            return;
        }

        if body.can_jump()
            && (self.ledge_ahead(body, level) || body.at_level_edge(level, body.facing()))
        {
            body.set_facing(body.facing().flipped());
        }
        body.set_vx(body.facing().sign() * self.patrol_speed);
    }
}

/// A red ninja driven by an [`EnemyBrain`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyNinja<R = SimpleRng> {
    ninja: Ninja,
    brain: EnemyBrain<R>,
}

impl EnemyNinja<SimpleRng> {
    /// Enemy whose behaviour is fully determined by `seed`.
    pub fn seeded(x: f32, y: f32, config: &GameConfig, seed: u32) -> Self {
        Self::new(x, y, config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> EnemyNinja<R> {
    pub fn new(x: f32, y: f32, config: &GameConfig, rng: R) -> Self {
        Self {
            ninja: Ninja::new(Colour::Red, x, y, NinjaParams::enemy(config)),
            brain: EnemyBrain::new(&config.enemy, rng),
        }
    }

    pub fn ninja(&self) -> &Ninja {
        &self.ninja
    }

    pub fn ninja_mut(&mut self) -> &mut Ninja {
        &mut self.ninja
    }

    pub fn brain(&self) -> &EnemyBrain<R> {
        &self.brain
    }

    pub fn update(&mut self, dt: f32, level: &LevelData) {
        self.ninja.step(dt, level, &mut self.brain);
    }
}
