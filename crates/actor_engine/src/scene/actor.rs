//! Actors: lifecycle state and per-tick behaviour

use super::{CallbackResult, World};
use crate::foundation::collections::{ActorId, ComponentId};
use crate::foundation::math::Transform;
use crate::foundation::time::Lifetime;
use std::fmt;

/// Lifecycle state of an actor
///
/// `Active` and `Disabled` switch back and forth freely; `PendingDestroy` is
/// terminal and the actor is removed at the end of the tick it entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorState {
    /// Updated, collides, receives input
    Active,
    /// Kept in the world but skipped by every tick stage
    Disabled,
    /// Marked for removal at the end of the current tick
    PendingDestroy,
}

/// Kind tag so overlap handlers can tell what they hit without downcasting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorTag(&'static str);

impl ActorTag {
    /// Create a tag
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Tag name
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ActorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Per-tick behaviour of an actor
///
/// The world takes the behaviour out of the actor for the duration of the call,
/// so `on_update` may freely mutate the world, including destroying `me`.
pub trait ActorBehavior: 'static {
    /// Called once per tick while the actor is active
    fn on_update(&mut self, world: &mut World, me: ActorId, delta_seconds: f32) -> CallbackResult {
        let _ = (world, me, delta_seconds);
        Ok(())
    }
}

impl<F> ActorBehavior for F
where
    F: FnMut(&mut World, ActorId, f32) -> CallbackResult + 'static,
{
    fn on_update(&mut self, world: &mut World, me: ActorId, delta_seconds: f32) -> CallbackResult {
        self(world, me, delta_seconds)
    }
}

/// Behaviour of actors that do nothing on their own each tick
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl ActorBehavior for Inert {}

/// Actor record owned by the world
pub(crate) struct Actor {
    pub(crate) tag: Option<ActorTag>,
    pub(crate) state: ActorState,
    /// World transform while the actor has no root component
    pub(crate) transform: Transform,
    pub(crate) root: Option<ComponentId>,
    /// Owned components in creation order
    pub(crate) components: Vec<ComponentId>,
    pub(crate) behavior: Option<Box<dyn ActorBehavior>>,
    pub(crate) update_order: i32,
    pub(crate) lifespan: Option<Lifetime>,
    /// First frame the actor takes part in tick stages
    pub(crate) active_from: u64,
}

impl Actor {
    pub(crate) fn new(tag: Option<ActorTag>, active_from: u64) -> Self {
        Self {
            tag,
            state: ActorState::Active,
            transform: Transform::identity(),
            root: None,
            components: Vec::new(),
            behavior: None,
            update_order: 0,
            lifespan: None,
            active_from,
        }
    }

    /// Active and admitted for `frame`
    pub(crate) fn is_ticking(&self, frame: u64) -> bool {
        self.state == ActorState::Active && frame >= self.active_from
    }
}
