//! # Actor Engine
//!
//! The actor/component scene layer of a small 2D game engine.
//!
//! ## Features
//!
//! - **Actors and components**: lifecycle states, deferred destruction, attachment hierarchies
//! - **Overlap detection**: circle colliders with layer filtering and overlap subscribers
//! - **Input routing**: named axes and actions bound to actor callbacks
//! - **Timers**: one-shot callbacks on the world clock
//! - **Fixed frame sequence**: input, timers, update, collision, destruction sweep
//!
//! ## Quick Start
//!
//! ```rust
//! use actor_engine::prelude::*;
//! use std::time::Duration;
//!
//! let mut world = World::default();
//! world.input_mut().add_axis(
//!     "MoveForward",
//!     vec![AxisBinding::new(KeyCode::W, 1.0), AxisBinding::new(KeyCode::S, -1.0)],
//! );
//!
//! let ship = world.spawn_actor(|world, me| {
//!     world.add_circle(me, 16.0)?;
//!     world.bind_axis(me, "MoveForward", |world, me, value| {
//!         let forward = world.forward(me)?;
//!         let pos = world.pos(me)?;
//!         world.set_pos(me, pos + forward * value)
//!     })?;
//!     Ok(Inert)
//! })?;
//!
//! world.set_timer(Duration::from_secs(1), move |world| {
//!     world.destroy(ship);
//!     Ok(())
//! });
//!
//! world.input_mut().press(KeyCode::W);
//! for _ in 0..8 {
//!     world.tick(0.25);
//! }
//! assert!(!world.contains(ship));
//! # Ok::<(), SceneError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod scene;
pub mod timers;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetManifest, AssetResolver, FileSystemResolver},
        config::{Config, ConfigError, WorldConfig},
        foundation::{
            collections::{ActorId, BindingHandle, ComponentId, TimerHandle},
            math::{utils, Quat, Transform, Vec3, FORWARD, RIGHT, UP},
            time::TimePoint,
        },
        input::{ActionMapping, AxisBinding, AxisMapping, InputConfig, InputSource, KeyCode, MouseAxis, MouseButton},
        physics::{CollisionLayers, Overlap, OverlapMode},
        scene::{
            ActorBehavior, ActorState, ActorTag, AttachRule, CallbackResult, CircleCollider, ComponentKind,
            ComponentType, Inert, Movement, SceneError, Sprite, SpriteInstance, World,
        },
    };
}
