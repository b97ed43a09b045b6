//! Drifting asteroids that wrap around the playfield

use crate::assets;
use crate::config::ScreenConfig;
use actor_engine::prelude::*;
use actor_engine::scene::components::{DEFAULT_DRAW_ORDER, DEFAULT_RADIUS};
use rand::Rng;
use std::f32::consts::TAU;

/// Tag carried by every asteroid
pub const ASTEROID: ActorTag = ActorTag::new("Asteroid");

/// Where and how an asteroid starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidSpawn {
    /// Starting position
    pub position: Vec3,
    /// Starting heading about the up axis (radians)
    pub angle: f32,
    /// Constant drift velocity
    pub velocity: Vec3,
}

impl AsteroidSpawn {
    /// Random position on screen, random heading, random drift direction at `speed`
    pub fn random(rng: &mut impl Rng, screen: &ScreenConfig, speed: f32) -> Self {
        let half_width = screen.width / 2.0;
        let half_height = screen.height / 2.0;
        Self {
            position: Vec3::new(
                rng.gen_range(-half_width..=half_width),
                rng.gen_range(-half_height..=half_height),
                0.0,
            ),
            angle: random_angle(rng),
            velocity: random_unit(rng) * speed,
        }
    }
}

/// Uniform planar angle in `[0, 2π)`
pub fn random_angle(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..TAU)
}

/// Uniform unit vector in the XY plane
pub fn random_unit(rng: &mut impl Rng) -> Vec3 {
    utils::planar_unit(random_angle(rng))
}

/// Move a position that left the playfield (plus margin) to the opposite edge
pub fn wrap_position(mut position: Vec3, screen: &ScreenConfig) -> Vec3 {
    let margin = screen.wrap_margin;
    let half_width = screen.width / 2.0;
    let half_height = screen.height / 2.0;

    if position.x < -half_width - margin {
        position.x += screen.width + 2.0 * margin;
    } else if position.x > half_width + margin {
        position.x -= screen.width + 2.0 * margin;
    }

    if position.y < -half_height - margin {
        position.y += screen.height + 2.0 * margin;
    } else if position.y > half_height + margin {
        position.y -= screen.height + 2.0 * margin;
    }

    position
}

/// Spawn an asteroid with a sprite, a drift movement component and a default collider
pub fn spawn(world: &mut World, start: AsteroidSpawn, screen: ScreenConfig) -> Result<ActorId, SceneError> {
    world.spawn_tagged(ASTEROID, move |world, me| {
        world.add_sprite(me, assets::ASTEROID, DEFAULT_DRAW_ORDER)?;
        world.add_movement(me, Movement::with_velocity(start.velocity))?;
        world.add_circle(me, DEFAULT_RADIUS)?;

        world.set_pos(me, start.position)?;
        world.set_planar_rot(me, start.angle)?;

        Ok(move |world: &mut World, me: ActorId, _delta_seconds: f32| -> CallbackResult {
            let pos = world.pos(me)?;
            let wrapped = wrap_position(pos, &screen);
            if wrapped != pos {
                world.set_pos(me, wrapped)?;
            }
            Ok(())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wrap_moves_past_margin_only() {
        let screen = ScreenConfig::default();
        let inside = Vec3::new(530.0, -400.0, 0.0);
        assert_eq!(wrap_position(inside, &screen), inside);

        let right = wrap_position(Vec3::new(560.0, 0.0, 0.0), &screen);
        assert_relative_eq!(right.x, 560.0 - 1088.0);

        let bottom = wrap_position(Vec3::new(0.0, -420.0, 0.0), &screen);
        assert_relative_eq!(bottom.y, -420.0 + 832.0);
    }

    #[test]
    fn test_random_spawn_stays_on_screen() {
        let screen = ScreenConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let spawn = AsteroidSpawn::random(&mut rng, &screen, 150.0);
            assert!(spawn.position.x.abs() <= screen.width / 2.0);
            assert!(spawn.position.y.abs() <= screen.height / 2.0);
            assert_relative_eq!(spawn.velocity.norm(), 150.0, epsilon = 1e-3);
            assert_eq!(spawn.velocity.z, 0.0);
        }
    }

    #[test]
    fn test_asteroid_drifts_and_wraps() {
        let screen = ScreenConfig::default();
        let mut world = World::default();
        let asteroid = spawn(
            &mut world,
            AsteroidSpawn {
                position: Vec3::new(540.0, 0.0, 0.0),
                angle: 0.0,
                velocity: Vec3::new(100.0, 0.0, 0.0),
            },
            screen,
        )
        .unwrap();

        world.tick(0.25);
        assert_relative_eq!(world.pos(asteroid).unwrap().x, 565.0 - 1088.0, epsilon = 1e-3);
        assert_eq!(world.tag(asteroid), Some(ASTEROID));
    }
}
