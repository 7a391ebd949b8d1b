//! The level files under `levels/` load with the expected layouts.

use std::path::PathBuf;

use ninja_thief::assets::{count_levels, level_path, load_level};
use ninja_thief::core::{Extra, Level, Spawn};
use ninja_thief::types::GameConfig;

fn levels_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels")
}

#[test]
fn test_three_levels_are_shipped() {
    assert_eq!(count_levels(&levels_dir()), 3);
}

#[test]
fn test_shipped_level_contents() {
    let config = GameConfig::default();
    let expected = [(1, 3, 4), (2, 5, 5), (3, 5, 5)];

    for (number, enemies, coins) in expected {
        let data = load_level(&level_path(&levels_dir(), number), &config).unwrap();
        assert_eq!((data.width(), data.height()), (15, 15), "level {}", number);

        let players = data.spawns().filter(|s| s.2 == Spawn::Player).count();
        let spawned_enemies = data.spawns().filter(|s| s.2 == Spawn::Enemy).count();
        assert_eq!(players, 1, "level {}", number);
        assert_eq!(spawned_enemies, enemies, "level {}", number);
        assert_eq!(data.coins_left(), coins, "level {}", number);

        let gems = (0..15)
            .flat_map(|y| (0..15).map(move |x| (x, y)))
            .filter(|&(x, y)| data.extra_kind(x, y) == Extra::Gem)
            .count();
        assert_eq!(gems, 2, "level {}", number);
    }
}

#[test]
fn test_shipped_levels_spawn_player_above_platform() {
    let config = GameConfig::default();
    for number in 1..=3 {
        let data = load_level(&level_path(&levels_dir(), number), &config).unwrap();
        let level = Level::new(number, data, &config, 1).unwrap();
        let player = level.player().ninja();
        assert_eq!(player.position(), (56.0, 96.0), "level {}", number);
        assert!(level.data().is_platform(7, 13), "level {}", number);
    }
}
