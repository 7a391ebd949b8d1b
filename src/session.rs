//! Level progression for one play session.
//!
//! A [`Session`] keeps a pristine copy of every loaded level and plays one of
//! them at a time:
//!
//! | Level ends in | Next |
//! |---------------|------|
//! | `Failed` | same level from its file data, score reset to the level-start score |
//! | `Complete` | next level (wrapping to level 1), score carried over |
//!
//! Pausing freezes the simulation; [`Session::update`] then does nothing.

use std::path::Path;

use anyhow::{bail, Context, Result};
use arrayvec::ArrayVec;

use crate::assets::{count_levels, level_path, load_level};
use crate::core::{Level, LevelData, LevelEvent, LevelState, MAX_LEVEL_EVENTS};
use crate::types::{GameConfig, InputProvider};

/// A level that was (re)started during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStart {
    pub level: u32,
    pub score: u32,
}

/// What one [`Session::update`] did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Level the events belong to.
    pub level_number: u32,
    /// Player score after the update, before any restart.
    pub score: u32,
    pub events: ArrayVec<LevelEvent, MAX_LEVEL_EVENTS>,
    pub started: Option<LevelStart>,
}

#[derive(Debug, Clone)]
pub struct Session {
    /// Levels as loaded, never played.
    levels: Vec<Level>,
    current: Level,
    index: usize,
    level_start_score: u32,
    paused: bool,
    frame: u64,
}

impl Session {
    /// Build a session over `levels`, numbered from 1 in order.
    ///
    /// `start_level` is 1-based and wraps around the level count.
    pub fn new(
        levels: Vec<LevelData>,
        config: &GameConfig,
        seed: u32,
        start_level: u32,
    ) -> Result<Self> {
        if levels.is_empty() {
            bail!("no levels to play");
        }
        config.validate().context("invalid game config")?;

        let levels = levels
            .into_iter()
            .enumerate()
            .map(|(i, data)| {
                let number = i as u32 + 1;
                Level::new(number, data, config, seed)
                    .with_context(|| format!("level {} cannot be played", number))
            })
            .collect::<Result<Vec<_>>>()?;

        let index = (start_level.max(1) as usize - 1) % levels.len();
        let current = levels[index].clone();
        Ok(Self {
            levels,
            current,
            index,
            level_start_score: 0,
            paused: false,
            frame: 0,
        })
    }

    /// Load `level_1.json`, `level_2.json`, ... from `dir`.
    pub fn load(dir: &Path, config: &GameConfig, seed: u32, start_level: u32) -> Result<Self> {
        let count = count_levels(dir);
        if count == 0 {
            bail!("no level files found in {}", dir.display());
        }
        let levels = (1..=count)
            .map(|n| load_level(&level_path(dir, n), config))
            .collect::<Result<Vec<_>>>()?;
        Self::new(levels, config, seed, start_level)
    }

    pub fn level(&self) -> &Level {
        &self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Score the current level started with.
    pub fn level_start_score(&self) -> u32 {
        self.level_start_score
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Updates run so far, pauses excluded.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Replay the current level from its file data.
    pub fn restart(&mut self) -> LevelStart {
        self.current = self.levels[self.index]
            .clone()
            .with_player_score(self.level_start_score);
        self.paused = false;
        LevelStart {
            level: self.current.level_number(),
            score: self.level_start_score,
        }
    }

    fn advance(&mut self) -> LevelStart {
        self.level_start_score = self.current.player().score();
        self.index = (self.index + 1) % self.levels.len();
        self.restart()
    }

    /// Advance the current level by `dt` seconds and move on when it ends.
    pub fn update<I: InputProvider + ?Sized>(&mut self, dt: f32, input: &I) -> FrameReport {
        if self.paused {
            return FrameReport {
                level_number: self.current.level_number(),
                score: self.current.player().score(),
                ..FrameReport::default()
            };
        }

        self.frame += 1;
        let events = self.current.update(dt, input);
        let mut report = FrameReport {
            level_number: self.current.level_number(),
            score: self.current.player().score(),
            events,
            started: None,
        };

        report.started = match self.current.state() {
            LevelState::Failed => Some(self.restart()),
            LevelState::Complete => Some(self.advance()),
            _ => None,
        };
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Button, InputFrame, COIN_TILE, ENEMY_SPAWN_TILE, PLAYER_SPAWN_TILE};

    const DT: f32 = 0.016;

    fn floor_level(config: &GameConfig, coin_x: i32) -> LevelData {
        let mut data = LevelData::blank(6, 4, config);
        for x in 0..6 {
            data.set_platform(x, 3, 0x01);
        }
        data.set_spawn(1, 2, PLAYER_SPAWN_TILE);
        data.set_extra(coin_x, 2, COIN_TILE);
        data
    }

    #[test]
    fn test_rejects_empty_level_list() {
        assert!(Session::new(Vec::new(), &GameConfig::default(), 1, 1).is_err());
    }

    #[test]
    fn test_rejects_level_without_player() {
        let config = GameConfig::default();
        let err = Session::new(vec![LevelData::blank(3, 3, &config)], &config, 1, 1).unwrap_err();
        assert!(format!("{:#}", err).contains("level 1"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GameConfig::default();
        let levels = vec![floor_level(&config, 3)];
        config.player.max_speed = -50.0;
        let err = Session::new(levels, &config, 1, 1).unwrap_err();
        assert!(format!("{:#}", err).contains("player.max_speed"));
    }

    #[test]
    fn test_start_level_wraps() {
        let config = GameConfig::default();
        let levels = vec![floor_level(&config, 3), floor_level(&config, 4)];
        let session = Session::new(levels, &config, 1, 3).unwrap();
        assert_eq!(session.level().level_number(), 1);
        assert_eq!(session.level_count(), 2);
    }

    #[test]
    fn test_pause_freezes_updates() {
        let config = GameConfig::default();
        let mut session = Session::new(vec![floor_level(&config, 3)], &config, 1, 1).unwrap();
        session.toggle_pause();

        let before = session.level().player().ninja().position();
        let report = session.update(DT, &InputFrame::new().hold(Button::Right));
        assert!(report.events.is_empty());
        assert_eq!(session.frame(), 0);
        assert_eq!(session.level().player().ninja().position(), before);
    }

    #[test]
    fn test_completed_level_advances_with_score() {
        let config = GameConfig::default();
        let levels = vec![floor_level(&config, 3), floor_level(&config, 4)];
        let mut session = Session::new(levels, &config, 1, 1).unwrap();

        let right = InputFrame::new().hold(Button::Right);
        let mut started = None;
        for _ in 0..2000 {
            let report = session.update(DT, &right);
            if report.started.is_some() {
                started = report.started;
                break;
            }
        }

        assert_eq!(started, Some(LevelStart { level: 2, score: 2 }));
        assert_eq!(session.level().level_number(), 2);
        assert_eq!(session.level().player().score(), 2);
        assert_eq!(session.level_start_score(), 2);
    }

    #[test]
    fn test_failed_level_restarts_with_start_score() {
        let config = GameConfig::default();
        let mut data = floor_level(&config, 5);
        data.set_spawn(2, 2, ENEMY_SPAWN_TILE);
        let mut session = Session::new(vec![data], &config, 1, 1).unwrap();

        let idle = InputFrame::new();
        let mut reports = Vec::new();
        for _ in 0..2000 {
            let report = session.update(DT, &idle);
            let done = report.started.is_some();
            reports.push(report);
            if done {
                break;
            }
        }

        let events: Vec<LevelEvent> = reports.iter().flat_map(|r| r.events.clone()).collect();
        assert!(events.contains(&LevelEvent::PlayerDied));
        assert_eq!(events.last(), Some(&LevelEvent::Failed));
        assert_eq!(
            reports.last().and_then(|r| r.started),
            Some(LevelStart { level: 1, score: 0 })
        );
        assert_eq!(session.level().state(), LevelState::Playing);
        assert_eq!(session.level().coins_left(), 1);
    }

    #[test]
    fn test_restart_restores_collected_coins() {
        let config = GameConfig::default();
        let mut data = floor_level(&config, 2);
        data.set_extra(4, 2, COIN_TILE);
        let mut session = Session::new(vec![data], &config, 1, 1).unwrap();

        let right = InputFrame::new().hold(Button::Right);
        while session.level().coins_left() == 2 {
            session.update(DT, &right);
        }
        assert_eq!(session.level().player().score(), 2);

        session.restart();
        assert_eq!(session.level().coins_left(), 2);
        assert_eq!(session.level().player().score(), 0);
    }
}
