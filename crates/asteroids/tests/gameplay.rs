//! Gameplay integration tests
//!
//! Each test builds a small world by hand so the outcome does not depend on
//! where the random asteroids land.

use actor_engine::foundation::logging;
use actor_engine::prelude::*;
use approx::assert_relative_eq;
use asteroids::asteroid::{self, AsteroidSpawn, ASTEROID};
use asteroids::config::{GameConfig, GameplayConfig, ScreenConfig};
use asteroids::game::{Game, Script};
use asteroids::laser::{self, LASER};
use asteroids::score::Scoreboard;
use asteroids::{assets, ship};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::rc::Rc;

fn game_world() -> World {
    logging::init_for_tests();
    World::new(GameConfig::default().world_config()).with_asset_resolver(assets::manifest())
}

fn parked_asteroid(world: &mut World, x: f32, y: f32) -> ActorId {
    asteroid::spawn(
        world,
        AsteroidSpawn {
            position: Vec3::new(x, y, 0.0),
            angle: 0.0,
            velocity: Vec3::zeros(),
        },
        ScreenConfig::default(),
    )
    .unwrap()
}

fn hull_texture(world: &World, ship: ActorId) -> String {
    world
        .collect_sprites()
        .into_iter()
        .find(|sprite| sprite.actor == ship && sprite.draw_order != ship::HIGHLIGHT_DRAW_ORDER)
        .map(|sprite| sprite.texture)
        .unwrap()
}

#[test]
fn test_thrust_moves_ship_and_swaps_texture() {
    let mut world = game_world();
    let score = Rc::new(Scoreboard::default());
    let ship = ship::spawn(&mut world, &GameplayConfig::default(), &score).unwrap();
    assert_eq!(hull_texture(&world, ship), assets::SHIP);

    world.input_mut().press(KeyCode::W);
    world.tick(0.25);
    assert_relative_eq!(world.pos(ship).unwrap().x, 75.0, epsilon = 1e-3);
    assert_eq!(hull_texture(&world, ship), assets::SHIP_WITH_THRUST);

    world.input_mut().release(KeyCode::W);
    world.tick(0.25);
    assert_relative_eq!(world.pos(ship).unwrap().x, 75.0, epsilon = 1e-3);
    assert_eq!(hull_texture(&world, ship), assets::SHIP);
}

#[test]
fn test_turn_rotates_ship() {
    let mut world = game_world();
    let score = Rc::new(Scoreboard::default());
    let ship = ship::spawn(&mut world, &GameplayConfig::default(), &score).unwrap();

    world.input_mut().press(KeyCode::D);
    world.tick(0.25);
    assert_relative_eq!(world.planar_rot(ship).unwrap(), FRAC_PI_4, epsilon = 1e-4);
}

#[test]
fn test_shoot_respects_cooldown() {
    let mut world = game_world();
    let score = Rc::new(Scoreboard::default());
    ship::spawn(&mut world, &GameplayConfig::default(), &score).unwrap();

    // Tap Space every 0.2s; only taps at least 0.5s apart fire
    for tick in 0..7 {
        if tick % 2 == 0 {
            world.input_mut().press(KeyCode::Space);
        } else {
            world.input_mut().release(KeyCode::Space);
        }
        world.tick(0.1);
    }

    assert_eq!(score.shots_fired(), 2);
    assert_eq!(world.actors_tagged(LASER).count(), 2);
}

#[test]
fn test_laser_destroys_asteroid_and_itself() {
    let mut world = game_world();
    let score = Rc::new(Scoreboard::default());
    let rock = parked_asteroid(&mut world, 40.0, 0.0);
    let bolt = laser::spawn(&mut world, &GameplayConfig::default(), Transform::identity(), &score).unwrap();

    world.tick(1.0 / 60.0);
    assert!(!world.contains(rock));
    assert!(!world.contains(bolt));
    assert_eq!(score.asteroids_destroyed(), 1);
}

#[test]
fn test_laser_expires_after_lifespan() {
    let mut world = game_world();
    let score = Rc::new(Scoreboard::default());
    let bolt = laser::spawn(&mut world, &GameplayConfig::default(), Transform::identity(), &score).unwrap();

    for _ in 0..50 {
        world.tick(1.0 / 60.0);
    }
    assert!(world.contains(bolt));
    assert_relative_eq!(world.pos(bolt).unwrap().x, 800.0 * 50.0 / 60.0, epsilon = 0.5);

    for _ in 0..20 {
        world.tick(1.0 / 60.0);
    }
    assert!(!world.contains(bolt));
}

#[test]
fn test_ship_hit_disables_then_respawns_once() {
    let mut world = game_world();
    let score = Rc::new(Scoreboard::default());
    let ship = ship::spawn(&mut world, &GameplayConfig::default(), &score).unwrap();
    let rocks = [parked_asteroid(&mut world, 10.0, 0.0), parked_asteroid(&mut world, -10.0, 0.0)];

    world.tick(0.25);
    assert_eq!(world.state(ship), Some(ActorState::Disabled));
    assert_eq!(score.ship_hits(), 1);
    assert_eq!(world.pending_timers(), 1, "respawn scheduled once");

    for rock in rocks {
        world.destroy(rock);
    }
    world.set_pos(ship, Vec3::new(100.0, 50.0, 0.0)).unwrap();

    for _ in 0..7 {
        world.tick(0.25);
    }
    assert_eq!(world.state(ship), Some(ActorState::Disabled));

    world.tick(0.25);
    assert_eq!(world.state(ship), Some(ActorState::Active));
    assert_relative_eq!(world.pos(ship).unwrap(), Vec3::zeros());
    assert_relative_eq!(world.planar_rot(ship).unwrap(), -FRAC_PI_2, epsilon = 1e-4);
    assert_eq!(world.actors_tagged(ASTEROID).count(), 0);
}

#[test]
fn test_disabled_ship_ignores_input() {
    let mut world = game_world();
    let score = Rc::new(Scoreboard::default());
    let ship = ship::spawn(&mut world, &GameplayConfig::default(), &score).unwrap();
    world.set_enabled(ship, false).unwrap();

    world.input_mut().press(KeyCode::W);
    world.input_mut().press(KeyCode::Space);
    world.tick(0.25);

    assert_relative_eq!(world.pos(ship).unwrap(), Vec3::zeros());
    assert_eq!(score.shots_fired(), 0);
}

#[test]
fn test_sessions_with_same_seed_match() {
    let config = GameConfig::default();
    let first = Game::new(&config).unwrap().run_script(&Script::demo(), 60.0, 3.0);
    let second = Game::new(&config).unwrap().run_script(&Script::demo(), 60.0, 3.0);
    assert_eq!(first, second);
    assert!(first.frames >= 180);
}

#[test]
fn test_empty_field_session() {
    let mut config = GameConfig::default();
    config.gameplay.asteroid_count = 0;
    let mut game = Game::new(&config).unwrap();

    let summary = game.run_script(&Script::demo(), 60.0, 2.0);
    assert!(summary.shots_fired >= 2);
    assert_eq!(summary.asteroids_destroyed, 0);
    assert_eq!(summary.ship_hits, 0);
    assert_eq!(summary.ship_state, Some(ActorState::Active));
    assert_eq!(summary.asteroids_remaining, 0);
}
