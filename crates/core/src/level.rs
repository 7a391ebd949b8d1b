//! Level module - one playable level
//!
//! A [`Level`] owns the tile layers, the player and the enemies spawned from
//! the `entity_spawns` layer, and runs the per-level state machine:
//!
//! ```text
//!            last coin collected           celebration done / fell off
//! Playing ─────────────────────► PlayerWon ───────────────────────────► Complete
//!    │
//!    │ caught by an enemy             fell off the bottom
//!    ├──────────────────► PlayerDead ─────────────────────► Failed
//!    │                                                        ▲
//!    └────────────────────────────────────────────────────────┘
//!                         fell off the bottom
//! ```
//!
//! Enemies only move while the level is `Playing`. `Failed` and `Complete`
//! are terminal; the caller builds a fresh level to retry or advance.

use arrayvec::ArrayVec;

use crate::enemy::EnemyNinja;
use crate::level_data::{LevelData, LevelDataError};
use crate::player::{Collectible, PlayerNinja};
use crate::snapshot::{LevelSnapshot, NinjaSnapshot};
use crate::tiles::Spawn;
use crate::types::{GameConfig, InputProvider};

/// Upper bound on events emitted by one [`Level::update`].
pub const MAX_LEVEL_EVENTS: usize = 8;

/// Level lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelState {
    #[default]
    Playing,
    PlayerDead,
    PlayerWon,
    Failed,
    Complete,
}

impl LevelState {
    /// True for `Failed` and `Complete`.
    pub fn is_finished(&self) -> bool {
        matches!(self, LevelState::Failed | LevelState::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelState::Playing => "playing",
            LevelState::PlayerDead => "player_dead",
            LevelState::PlayerWon => "player_won",
            LevelState::Failed => "failed",
            LevelState::Complete => "complete",
        }
    }
}

/// Something that happened during one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    Collected(Collectible),
    PlayerDied,
    PlayerWon,
    Failed,
    Complete,
}

/// Seed for the `index`-th enemy of a level.
fn enemy_seed(level_seed: u32, index: usize) -> u32 {
    level_seed.wrapping_add((index as u32).wrapping_add(1).wrapping_mul(0x9E37_79B9))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    number: u32,
    data: LevelData,
    player: PlayerNinja,
    enemies: Vec<EnemyNinja>,
    state: LevelState,
}

impl Level {
    /// Spawn the player and enemies from `data`.
    ///
    /// The first player marker in row-major order wins; further ones are
    /// ignored. Enemy `i` gets a seed derived from `seed` and `i`.
    pub fn new(
        number: u32,
        data: LevelData,
        config: &GameConfig,
        seed: u32,
    ) -> Result<Self, LevelDataError> {
        let mut player = None;
        let mut enemies = Vec::new();

        for (x, y, spawn) in data.spawns() {
            let (px, py) = data.tile_origin(x as i32, y as i32);
            match spawn {
                Spawn::Player if player.is_none() => {
                    player = Some(PlayerNinja::new(px, py, config));
                }
                Spawn::Player => {}
                Spawn::Enemy => {
                    let enemy_seed = enemy_seed(seed, enemies.len());
                    enemies.push(EnemyNinja::seeded(px, py, config, enemy_seed));
                }
            }
        }

        let player = player.ok_or(LevelDataError::MissingPlayerSpawn)?;
        Ok(Self {
            number,
            data,
            player,
            enemies,
            state: LevelState::Playing,
        })
    }

    /// Carry a score over from the previous level.
    pub fn with_player_score(mut self, score: u32) -> Self {
        self.player = self.player.with_score(score);
        self
    }

    pub fn level_number(&self) -> u32 {
        self.number
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn data(&self) -> &LevelData {
        &self.data
    }

    pub fn player(&self) -> &PlayerNinja {
        &self.player
    }

    pub fn enemies(&self) -> &[EnemyNinja] {
        &self.enemies
    }

    pub fn coins_left(&self) -> usize {
        self.data.coins_left()
    }

    pub fn level_failed(&self) -> bool {
        self.state == LevelState::Failed
    }

    pub fn level_complete(&self) -> bool {
        self.state == LevelState::Complete
    }

    fn player_below_level(&self) -> bool {
        self.player.ninja().y() > self.data.height_px()
    }

    /// Advance the level by `dt` seconds.
    pub fn update<I: InputProvider + ?Sized>(
        &mut self,
        dt: f32,
        input: &I,
    ) -> ArrayVec<LevelEvent, MAX_LEVEL_EVENTS> {
        let mut events = ArrayVec::new();

        match self.state {
            LevelState::Playing => {
                for item in self.player.update(dt, &mut self.data, input) {
                    let _ = events.try_push(LevelEvent::Collected(item));
                }

                if self.data.coins_left() == 0 {
                    self.state = LevelState::PlayerWon;
                    self.player.set_won();
                    let _ = events.try_push(LevelEvent::PlayerWon);
                }

                for enemy in &mut self.enemies {
                    enemy.update(dt, &self.data);
                    if self.state == LevelState::Playing
                        && self.player.ninja().check_ninja_colliding(enemy.ninja())
                    {
                        self.state = LevelState::PlayerDead;
                        self.player.set_dead();
                        let _ = events.try_push(LevelEvent::PlayerDied);
                    }
                }

                // Applies even if the player died or won earlier this frame.
                if self.player_below_level() {
                    self.state = LevelState::Failed;
                    let _ = events.try_push(LevelEvent::Failed);
                }
            }
            LevelState::PlayerDead => {
                self.player.update(dt, &mut self.data, input);
                if self.player_below_level() {
                    self.state = LevelState::Failed;
                    let _ = events.try_push(LevelEvent::Failed);
                }
            }
            LevelState::PlayerWon => {
                self.player.update(dt, &mut self.data, input);
                if self.player.finished_celebrating() || self.player_below_level() {
                    self.state = LevelState::Complete;
                    let _ = events.try_push(LevelEvent::Complete);
                }
            }
            LevelState::Failed | LevelState::Complete => {}
        }

        events
    }

    /// Write everything a renderer needs into `out`, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut LevelSnapshot) {
        out.level_number = self.number;
        out.state = self.state;
        out.width = self.data.width();
        out.height = self.data.height();
        out.tile_size = self.data.tile_size();

        let tiles = self.data.tiles();
        out.platforms.clear();
        out.platforms.extend(
            self.data
                .platforms_layer()
                .iter()
                .map(|&id| tiles.is_platform(id)),
        );
        out.extras.clear();
        out.extras
            .extend(self.data.extras_layer().iter().map(|&id| tiles.extra(id)));

        out.player = NinjaSnapshot::from(self.player.ninja());
        out.player_dead = self.player.is_dead();
        out.player_won = self.player.has_won();
        out.score = self.player.score();
        out.coins_left = self.data.coins_left();

        out.enemies.clear();
        out.enemies
            .extend(self.enemies.iter().map(|e| NinjaSnapshot::from(e.ninja())));
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        let mut s = LevelSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InputFrame, COIN_TILE, ENEMY_SPAWN_TILE, PLAYER_SPAWN_TILE};

    const DT: f32 = 0.016;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    /// 10x6 level with a floor on row 5 and the player on (2, 4).
    fn base_data() -> LevelData {
        let mut data = LevelData::blank(10, 6, &config());
        for x in 0..10 {
            data.set_platform(x, 5, 0x01);
        }
        data.set_spawn(2, 4, PLAYER_SPAWN_TILE);
        data
    }

    fn run_until_finished(level: &mut Level, input: &InputFrame) -> Vec<LevelEvent> {
        let mut all = Vec::new();
        for _ in 0..2_000 {
            all.extend(level.update(DT, input));
            if level.state().is_finished() {
                break;
            }
        }
        all
    }

    #[test]
    fn test_missing_player_spawn() {
        let mut data = base_data();
        data.set_spawn(2, 4, 0xff);
        let err = Level::new(1, data, &config(), 1).unwrap_err();
        assert_eq!(err, LevelDataError::MissingPlayerSpawn);
    }

    #[test]
    fn test_spawns_at_marker_positions() {
        let mut data = base_data();
        data.set_spawn(7, 4, ENEMY_SPAWN_TILE);
        data.set_spawn(8, 1, ENEMY_SPAWN_TILE);
        let level = Level::new(1, data, &config(), 1).unwrap();
        assert_eq!(level.player().ninja().position(), (16.0, 32.0));
        assert_eq!(level.enemies().len(), 2);
        assert_eq!(level.enemies()[0].ninja().position(), (64.0, 8.0));
        assert_eq!(level.enemies()[1].ninja().position(), (56.0, 32.0));
    }

    #[test]
    fn test_no_coins_wins_immediately_then_completes() {
        let mut level = Level::new(1, base_data(), &config(), 1).unwrap();
        let events = level.update(DT, &InputFrame::new());
        assert!(events.contains(&LevelEvent::PlayerWon));
        assert_eq!(level.state(), LevelState::PlayerWon);

        let rest = run_until_finished(&mut level, &InputFrame::new());
        assert_eq!(rest.last(), Some(&LevelEvent::Complete));
        assert!(level.level_complete());
    }

    #[test]
    fn test_collecting_last_coin_wins() {
        let mut data = base_data();
        data.set_extra(4, 4, COIN_TILE);
        let mut level = Level::new(1, data, &config(), 1).unwrap();
        assert_eq!(level.coins_left(), 1);

        let input = InputFrame::new().hold(crate::types::Button::Right);
        let mut collected = false;
        for _ in 0..200 {
            for event in level.update(DT, &input) {
                if let LevelEvent::Collected(item) = event {
                    assert_eq!(item.points, 2);
                    collected = true;
                }
            }
            if level.state() == LevelState::PlayerWon {
                break;
            }
        }
        assert!(collected);
        assert_eq!(level.state(), LevelState::PlayerWon);
        assert_eq!(level.player().score(), 2);
    }

    #[test]
    fn test_enemy_contact_kills_then_fails() {
        let mut data = base_data();
        data.set_extra(9, 0, COIN_TILE);
        data.set_spawn(3, 4, ENEMY_SPAWN_TILE);
        let mut level = Level::new(1, data, &config(), 1).unwrap();

        let events = run_until_finished(&mut level, &InputFrame::new());
        assert!(events.contains(&LevelEvent::PlayerDied));
        assert_eq!(events.last(), Some(&LevelEvent::Failed));
        assert!(level.player().is_dead());
        assert!(level.level_failed());
    }

    #[test]
    fn test_falling_off_fails() {
        let mut data = LevelData::blank(5, 5, &config());
        data.set_spawn(2, 0, PLAYER_SPAWN_TILE);
        data.set_extra(0, 0, COIN_TILE);
        let mut level = Level::new(1, data, &config(), 1).unwrap();

        let events = run_until_finished(&mut level, &InputFrame::new());
        assert_eq!(events, vec![LevelEvent::Failed]);
        assert!(!level.player().is_dead());
    }

    #[test]
    fn test_falling_off_overrides_win_in_same_frame() {
        let mut level = Level::new(1, base_data(), &config(), 1).unwrap();
        let below = level.data().height_px() + 1.0;
        level.player.ninja_mut().set_position(16.0, below);

        let events = level.update(DT, &InputFrame::new());
        assert_eq!(
            events.as_slice(),
            &[LevelEvent::PlayerWon, LevelEvent::Failed]
        );
        assert!(level.level_failed());
    }

    #[test]
    fn test_finished_level_ignores_updates() {
        let mut data = LevelData::blank(5, 5, &config());
        data.set_spawn(2, 0, PLAYER_SPAWN_TILE);
        data.set_extra(0, 0, COIN_TILE);
        let mut level = Level::new(1, data, &config(), 1).unwrap();
        run_until_finished(&mut level, &InputFrame::new());

        let y = level.player().ninja().y();
        assert!(level.update(DT, &InputFrame::new()).is_empty());
        assert_eq!(level.player().ninja().y(), y);
    }

    #[test]
    fn test_snapshot_reflects_level() {
        let mut data = base_data();
        data.set_extra(4, 4, COIN_TILE);
        data.set_spawn(7, 4, ENEMY_SPAWN_TILE);
        let level = Level::new(3, data, &config(), 9)
            .unwrap()
            .with_player_score(40);

        let snap = level.snapshot();
        assert_eq!(snap.level_number, 3);
        assert_eq!(snap.width, 10);
        assert_eq!(snap.platforms.len(), 60);
        assert!(snap.platforms[5 * 10 + 3]);
        assert_eq!(snap.extras[4 * 10 + 4], crate::tiles::Extra::Coin);
        assert_eq!(snap.score, 40);
        assert_eq!(snap.coins_left, 1);
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.player.x, 16.0);
    }
}
