//! Tile classification.
//!
//! Level layers store raw sprite ids. [`TileSet`] turns them into gameplay
//! meaning through lookup tables built once from the config, so unknown ids
//! simply classify as nothing.

use crate::types::TileIdConfig;

/// Meaning of an `extras` layer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extra {
    #[default]
    Empty,
    Ladder,
    Coin,
    Gem,
}

/// Meaning of an `entity_spawns` layer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spawn {
    Player,
    Enemy,
}

/// Lookup tables from tile id to meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    blank: u8,
    platforms: [bool; 256],
    extras: [Extra; 256],
    player_spawn: u8,
    enemy_spawn: u8,
}

impl TileSet {
    pub fn from_config(ids: &TileIdConfig) -> Self {
        let mut platforms = [false; 256];
        for &id in &ids.platforms {
            platforms[id as usize] = true;
        }
        platforms[ids.blank as usize] = false;

        let mut extras = [Extra::Empty; 256];
        extras[ids.ladder as usize] = Extra::Ladder;
        extras[ids.coin as usize] = Extra::Coin;
        extras[ids.gem as usize] = Extra::Gem;
        extras[ids.blank as usize] = Extra::Empty;

        Self {
            blank: ids.blank,
            platforms,
            extras,
            player_spawn: ids.player_spawn,
            enemy_spawn: ids.enemy_spawn,
        }
    }

    /// Id written into a cell when its content is removed.
    pub fn blank(&self) -> u8 {
        self.blank
    }

    #[inline(always)]
    pub fn is_platform(&self, id: u8) -> bool {
        self.platforms[id as usize]
    }

    #[inline(always)]
    pub fn extra(&self, id: u8) -> Extra {
        self.extras[id as usize]
    }

    pub fn spawn(&self, id: u8) -> Option<Spawn> {
        if id == self.blank {
            None
        } else if id == self.player_spawn {
            Some(Spawn::Player)
        } else if id == self.enemy_spawn {
            Some(Spawn::Enemy)
        } else {
            None
        }
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::from_config(&TileIdConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BLANK_TILE, COIN_TILE, ENEMY_SPAWN_TILE, GEM_TILE, LADDER_TILE, PLAYER_SPAWN_TILE,
    };

    #[test]
    fn default_ids_classify() {
        let tiles = TileSet::default();

        for id in 0..=3 {
            assert!(tiles.is_platform(id));
        }
        assert!(!tiles.is_platform(BLANK_TILE));
        assert!(!tiles.is_platform(LADDER_TILE));

        assert_eq!(tiles.extra(LADDER_TILE), Extra::Ladder);
        assert_eq!(tiles.extra(COIN_TILE), Extra::Coin);
        assert_eq!(tiles.extra(GEM_TILE), Extra::Gem);
        assert_eq!(tiles.extra(BLANK_TILE), Extra::Empty);

        assert_eq!(tiles.spawn(PLAYER_SPAWN_TILE), Some(Spawn::Player));
        assert_eq!(tiles.spawn(ENEMY_SPAWN_TILE), Some(Spawn::Enemy));
        assert_eq!(tiles.spawn(BLANK_TILE), None);
    }

    #[test]
    fn unknown_ids_are_inert() {
        let tiles = TileSet::default();
        for id in [0x04u8, 0x30, 0x7f, 0xfe] {
            assert!(!tiles.is_platform(id));
            assert_eq!(tiles.extra(id), Extra::Empty);
            assert_eq!(tiles.spawn(id), None);
        }
    }

    #[test]
    fn blank_wins_over_a_misconfigured_platform_list() {
        let ids = TileIdConfig {
            platforms: vec![0x00, BLANK_TILE],
            ..TileIdConfig::default()
        };
        let tiles = TileSet::from_config(&ids);
        assert!(tiles.is_platform(0x00));
        assert!(!tiles.is_platform(BLANK_TILE));
    }
}
