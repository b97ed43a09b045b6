//! Laser bolts fired by the ship

use crate::asteroid::ASTEROID;
use crate::assets;
use crate::config::GameplayConfig;
use crate::score::Scoreboard;
use actor_engine::prelude::*;
use actor_engine::scene::components::DEFAULT_DRAW_ORDER;
use std::rc::Rc;

/// Tag carried by every laser
pub const LASER: ActorTag = ActorTag::new("Laser");

/// Spawn a laser at `transform`; it flies forward until it hits an asteroid or its lifespan ends
pub fn spawn(
    world: &mut World,
    settings: &GameplayConfig,
    transform: Transform,
    score: &Rc<Scoreboard>,
) -> Result<ActorId, SceneError> {
    let lifespan = settings.laser_lifespan;
    let radius = settings.laser_radius;
    let speed = settings.laser_speed;
    let score = Rc::clone(score);

    world.spawn_tagged(LASER, move |world, me| {
        world.set_transform(me, transform)?;
        world.set_lifespan(me, lifespan)?;
        world.add_sprite(me, assets::LASER, DEFAULT_DRAW_ORDER)?;

        let collider = world.add_circle(me, radius)?;
        world.on_overlap(collider, OverlapMode::EveryFrame, move |world, overlap| {
            if overlap.other_tag != Some(ASTEROID) {
                return Ok(());
            }
            if world.is_alive(overlap.other_actor) {
                score.record_asteroid_destroyed();
            }
            world.destroy(overlap.actor);
            world.destroy(overlap.other_actor);
            Ok(())
        })?;

        Ok(move |world: &mut World, me: ActorId, delta_seconds: f32| -> CallbackResult {
            let forward = world.forward(me)?;
            let pos = world.pos(me)?;
            world.set_pos(me, pos + forward * (speed * delta_seconds))
        })
    })
}
