//! Movement engine scenarios on small hand-built grids.

use ninja_thief::core::{LevelData, Ninja, NinjaParams};
use ninja_thief::types::{ClimbingState, Colour, GameConfig, LADDER_TILE};

const DT: f32 = 0.016;
const PLATFORM: u8 = 0x01;

fn ninja_at(x: f32, y: f32) -> Ninja {
    Ninja::new(Colour::Blue, x, y, NinjaParams::player(&GameConfig::default()))
}

#[test]
fn test_ninja_lands_on_platform_below() {
    let config = GameConfig::default();
    let mut level = LevelData::blank(3, 3, &config);
    level.set_platform(1, 2, PLATFORM);

    let mut ninja = ninja_at(8.0, 8.0);
    ninja.update(DT, &level);

    assert_eq!(ninja.y(), 8.0);
    assert_eq!(ninja.vy(), 0.0);
    assert!(ninja.can_jump());
}

#[test]
fn test_gravity_adds_exactly_one_step() {
    let config = GameConfig::default();
    let level = LevelData::blank(3, 3, &config);

    let mut ninja = ninja_at(8.0, 0.0);
    ninja.update(DT, &level);

    assert_eq!(ninja.vy(), config.physics.gravity * DT);
    assert!(!ninja.can_jump());
}

#[test]
fn test_jump_passes_up_through_platform_and_lands_on_it() {
    let config = GameConfig::default();
    let mut level = LevelData::blank(3, 3, &config);
    level.set_platform(1, 1, PLATFORM);

    let mut ninja = ninja_at(8.0, 16.0);
    ninja.jump(config.player.jump_speed);
    ninja.update(DT, &level);
    assert!(ninja.y() < 16.0);
    assert!(ninja.vy() < 0.0);

    for _ in 0..100 {
        ninja.update(DT, &level);
    }
    assert_eq!(ninja.y(), 0.0);
    assert!(ninja.can_jump());
}

#[test]
fn test_walking_through_platform_from_the_side() {
    let config = GameConfig::default();
    let mut level = LevelData::blank(3, 3, &config);
    for x in 0..3 {
        level.set_platform(x, 2, PLATFORM);
    }
    level.set_platform(1, 1, PLATFORM);

    let mut ninja = ninja_at(0.0, 8.0);
    for _ in 0..15 {
        ninja.set_vx(config.player.max_speed);
        ninja.update(DT, &level);
        assert_eq!(ninja.y(), 8.0);
    }
    assert!(ninja.x() > 8.0);
}

fn ladder_level(config: &GameConfig) -> LevelData {
    let mut level = LevelData::blank(3, 5, config);
    for x in 0..3 {
        level.set_platform(x, 4, PLATFORM);
    }
    for y in 1..4 {
        level.set_extra(1, y, LADDER_TILE);
    }
    level
}

#[test]
fn test_climbing_moves_at_climbing_speed_without_gravity() {
    let config = GameConfig::default();
    let level = ladder_level(&config);

    let mut ninja = ninja_at(8.0, 24.0);
    ninja.update(DT, &level);
    assert!(ninja.can_climb());

    ninja.set_climbing_state(ClimbingState::Up);
    ninja.update(DT, &level);
    assert_eq!(ninja.vy(), -config.player.climbing_speed);
    assert!((ninja.y() - (24.0 - config.player.climbing_speed * DT)).abs() < 1e-4);

    let y = ninja.y();
    ninja.set_climbing_state(ClimbingState::Idle);
    ninja.update(DT, &level);
    assert_eq!(ninja.vy(), 0.0);
    assert_eq!(ninja.y(), y);
    assert_eq!(ninja.climbing_state(), ClimbingState::Idle);
}

#[test]
fn test_climbing_down_onto_floor_ends_climb() {
    let config = GameConfig::default();
    let level = ladder_level(&config);

    let mut ninja = ninja_at(8.0, 24.0);
    ninja.update(DT, &level);
    ninja.set_climbing_state(ClimbingState::Up);
    for _ in 0..5 {
        ninja.update(DT, &level);
    }

    ninja.set_climbing_state(ClimbingState::Down);
    for _ in 0..20 {
        ninja.update(DT, &level);
    }
    assert_eq!(ninja.climbing_state(), ClimbingState::None);
    assert_eq!(ninja.y(), 24.0);
    assert!(ninja.can_jump());
}

#[test]
fn test_stepping_off_ladder_sideways_ends_climb() {
    let config = GameConfig::default();
    let level = ladder_level(&config);

    let mut ninja = ninja_at(8.0, 16.0);
    ninja.set_climbing_state(ClimbingState::Idle);
    ninja.update(DT, &level);
    assert_eq!(ninja.climbing_state(), ClimbingState::Idle);

    for _ in 0..10 {
        ninja.set_vx(config.player.max_speed);
        ninja.update(DT, &level);
    }
    assert_eq!(ninja.climbing_state(), ClimbingState::None);
}

#[test]
fn test_ninjas_touching_edges_do_not_collide() {
    let a = ninja_at(0.0, 0.0);
    let b = ninja_at(4.0, 0.0);
    let c = ninja_at(3.5, 0.0);

    assert!(!a.check_ninja_colliding(&b));
    assert!(a.check_ninja_colliding(&c));
}
