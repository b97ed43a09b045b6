//! The player ship
//!
//! Thrust and turning come from the `MoveForward` and `Turn` axes through a
//! pawn movement component. `Shoot` fires a laser at most once per cooldown.
//! Touching an asteroid takes the ship out of play until it respawns at the
//! origin.

use crate::asteroid::ASTEROID;
use crate::config::GameplayConfig;
use crate::score::Scoreboard;
use crate::{assets, laser};
use actor_engine::prelude::*;
use actor_engine::scene::components::{DEFAULT_DRAW_ORDER, DEFAULT_RADIUS};
use std::rc::Rc;

/// Tag carried by the ship
pub const SHIP: ActorTag = ActorTag::new("Ship");

/// Draw order of the highlight, just beneath the hull
pub const HIGHLIGHT_DRAW_ORDER: i32 = 99;

/// Heading after a respawn, in degrees
pub const RESPAWN_HEADING_DEGREES: f32 = -90.0;

/// Spawn the ship at the origin
pub fn spawn(world: &mut World, settings: &GameplayConfig, score: &Rc<Scoreboard>) -> Result<ActorId, SceneError> {
    let settings = settings.clone();
    let score = Rc::clone(score);

    world.spawn_tagged(SHIP, move |world, me| {
        let hull = world.add_sprite(me, assets::SHIP, DEFAULT_DRAW_ORDER)?;
        world.add_sprite(me, assets::SHIP_HIGHLIGHT, HIGHLIGHT_DRAW_ORDER)?;
        let movement = world.add_movement(
            me,
            Movement::pawn(settings.ship_max_speed, settings.ship_turn_speed()),
        )?;

        let collider = world.add_circle(me, DEFAULT_RADIUS)?;
        let respawn_delay = settings.respawn_delay();
        let hit_score = Rc::clone(&score);
        world.on_overlap(collider, OverlapMode::EveryFrame, move |world, overlap| {
            if overlap.other_tag != Some(ASTEROID) || world.state(overlap.actor) != Some(ActorState::Active) {
                return Ok(());
            }
            log::info!("Ship hit, respawning in {:.1}s", respawn_delay.as_secs_f32());
            hit_score.record_ship_hit();
            world.set_enabled(overlap.actor, false)?;
            world.set_actor_timer(overlap.actor, respawn_delay, respawn)?;
            Ok(())
        })?;

        let mut is_moving = false;
        world.bind_axis(me, "MoveForward", move |world, me, value| {
            let should_move = !utils::is_nearly_zero(value);
            if should_move {
                let forward = world.forward(me)?;
                world.movement_mut(movement)?.add_input(forward * value);
            }
            if should_move != is_moving {
                let texture = if should_move { assets::SHIP_WITH_THRUST } else { assets::SHIP };
                world.set_texture(hull, texture)?;
                is_moving = should_move;
            }
            Ok(())
        })?;

        world.bind_axis(me, "Turn", move |world, _, value| {
            world.movement_mut(movement)?.add_rotation_input(value);
            Ok(())
        })?;

        let mut next_attack = TimePoint::ZERO;
        world.bind_action(me, "Shoot", true, move |world, me| {
            let now = world.time();
            if next_attack > now {
                return Ok(());
            }
            let muzzle = Transform::from_position_rotation(world.pos(me)?, world.rot(me)?);
            laser::spawn(world, &settings, muzzle, &score)?;
            score.record_shot();
            next_attack = now + settings.fire_cooldown();
            Ok(())
        })?;

        Ok(Inert)
    })
}

fn respawn(world: &mut World, me: ActorId) -> CallbackResult {
    world.set_enabled(me, true)?;
    world.set_pos(me, Vec3::zeros())?;
    world.set_planar_rot(me, utils::deg_to_rad(RESPAWN_HEADING_DEGREES))?;
    log::info!("Ship respawned");
    Ok(())
}
