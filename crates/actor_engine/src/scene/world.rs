//! The world: owner of every actor, component, binding and timer

use super::actor::{Actor, ActorBehavior, ActorState, ActorTag};
use super::component::{Component, ComponentKind, ComponentType};
use super::components::{CircleCollider, Movement, OverlapSubscriber, Sprite, SpriteInstance};
use super::{CallbackResult, SceneError};
use crate::assets::AssetResolver;
use crate::config::WorldConfig;
use crate::foundation::collections::{ActorId, BindingHandle, ComponentId, SlotMap, TimerHandle};
use crate::foundation::time::{Lifetime, TimePoint, WorldClock};
use crate::input::InputRouter;
use crate::physics::{Overlap, OverlapMode, OverlapTracker};
use crate::timers::TimerManager;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Owner of the scene and driver of the per-frame sequence
///
/// Actors and components live in generational arenas and are addressed by
/// [`ActorId`] / [`ComponentId`]. Every operation on a handle whose object is
/// gone reports [`SceneError::StaleActor`] / [`SceneError::StaleComponent`]
/// (or `None`) instead of touching something else.
///
/// # Example
/// ```
/// use actor_engine::prelude::*;
///
/// let mut world = World::default();
/// let rock = world.spawn_actor(|world, me| {
///     world.add_circle(me, 16.0)?;
///     Ok(Inert)
/// })?;
/// world.destroy(rock);
/// world.tick(1.0 / 60.0);
/// assert!(!world.contains(rock));
/// # Ok::<(), SceneError>(())
/// ```
pub struct World {
    pub(super) config: WorldConfig,
    pub(super) clock: WorldClock,
    pub(super) actors: SlotMap<ActorId, Actor>,
    /// Constructed actors in update order
    pub(super) update_list: Vec<ActorId>,
    pub(super) components: SlotMap<ComponentId, Component>,
    pub(super) input: InputRouter,
    pub(super) timers: TimerManager,
    pub(super) overlaps: OverlapTracker,
    pub(super) assets: Option<Box<dyn AssetResolver>>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Create an empty world
    pub fn new(config: WorldConfig) -> Self {
        log::debug!(
            "Creating world (max delta {}s, time scale {})",
            config.max_delta_seconds,
            config.time_scale
        );
        Self {
            clock: WorldClock::new(config.max_delta_seconds, config.time_scale),
            input: InputRouter::from_config(&config.input),
            config,
            actors: SlotMap::with_key(),
            update_list: Vec::new(),
            components: SlotMap::with_key(),
            timers: TimerManager::new(),
            overlaps: OverlapTracker::new(),
            assets: None,
        }
    }

    /// Configuration the world was created with
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Install the resolver that vets sprite texture identifiers
    pub fn set_asset_resolver(&mut self, resolver: impl AssetResolver + 'static) {
        self.assets = Some(Box::new(resolver));
    }

    /// Builder pattern: install an asset resolver
    #[must_use]
    pub fn with_asset_resolver(mut self, resolver: impl AssetResolver + 'static) -> Self {
        self.set_asset_resolver(resolver);
        self
    }

    // ----------------------------------------------------------------------
    // Clock
    // ----------------------------------------------------------------------

    /// Effective delta of the current (or last) tick in seconds
    pub const fn delta_seconds(&self) -> f32 {
        self.clock.delta_seconds()
    }

    /// Current world time
    pub const fn time(&self) -> TimePoint {
        self.clock.now()
    }

    /// Number of ticks run so far
    pub const fn frame(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Change the time scale (0 pauses, below 1 slows down)
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.clock.set_time_scale(time_scale);
    }

    // ----------------------------------------------------------------------
    // Actors
    // ----------------------------------------------------------------------

    /// Spawn an actor
    ///
    /// The actor exists while `construct` runs, so the constructor can add
    /// components, bind input and set timers on it. If the constructor fails
    /// everything it registered is removed again and the error is returned.
    /// A spawned actor first takes part in the tick after the one it was
    /// spawned in.
    pub fn spawn_actor<B, F>(&mut self, construct: F) -> Result<ActorId, SceneError>
    where
        B: ActorBehavior,
        F: FnOnce(&mut Self, ActorId) -> Result<B, SceneError>,
    {
        self.spawn_with(None, construct)
    }

    /// Spawn an actor carrying a kind tag that overlap handlers can inspect
    pub fn spawn_tagged<B, F>(&mut self, tag: ActorTag, construct: F) -> Result<ActorId, SceneError>
    where
        B: ActorBehavior,
        F: FnOnce(&mut Self, ActorId) -> Result<B, SceneError>,
    {
        self.spawn_with(Some(tag), construct)
    }

    /// Spawn a plain actor with no behaviour
    pub fn spawn_empty(&mut self) -> ActorId {
        let id = self.actors.insert(Actor::new(None, self.clock.frame_count() + 1));
        self.insert_into_update_list(id);
        log::debug!("Spawned empty actor {id:?}");
        id
    }

    fn spawn_with<B, F>(&mut self, tag: Option<ActorTag>, construct: F) -> Result<ActorId, SceneError>
    where
        B: ActorBehavior,
        F: FnOnce(&mut Self, ActorId) -> Result<B, SceneError>,
    {
        let id = self.actors.insert(Actor::new(tag, self.clock.frame_count() + 1));
        match construct(self, id) {
            Ok(behavior) => {
                let actor = self.actors.get_mut(id).ok_or(SceneError::StaleActor(id))?;
                actor.behavior = Some(Box::new(behavior));
                self.insert_into_update_list(id);
                log::debug!("Spawned actor {id:?} ({})", tag.map_or("untagged", ActorTag::name));
                Ok(id)
            }
            Err(err) => {
                self.purge_actor(id);
                log::debug!("Construction of actor {id:?} failed: {err}");
                Err(err)
            }
        }
    }

    fn insert_into_update_list(&mut self, id: ActorId) {
        let actors = &self.actors;
        let order = actors.get(id).map_or(0, |actor| actor.update_order);
        let position = self
            .update_list
            .partition_point(|other| actors.get(*other).map_or(0, |actor| actor.update_order) <= order);
        self.update_list.insert(position, id);
    }

    /// Mark an actor for destruction at the end of the current tick
    ///
    /// Idempotent; stale handles are ignored.
    pub fn destroy(&mut self, id: ActorId) {
        if let Some(actor) = self.actors.get_mut(id) {
            if actor.state != ActorState::PendingDestroy {
                actor.state = ActorState::PendingDestroy;
                log::debug!("Actor {id:?} marked for destruction");
            }
        }
    }

    /// Enable or disable an actor
    ///
    /// A disabled actor keeps its components and bindings but is skipped by
    /// input dispatch, update and collision. Re-enabling takes effect on the
    /// next tick. Actors pending destruction stay pending.
    pub fn set_enabled(&mut self, id: ActorId, enabled: bool) -> Result<(), SceneError> {
        let next_frame = self.clock.frame_count() + 1;
        let actor = self.actor_mut(id)?;
        match (actor.state, enabled) {
            (ActorState::Disabled, true) => {
                actor.state = ActorState::Active;
                actor.active_from = actor.active_from.max(next_frame);
            }
            (ActorState::Active, false) => actor.state = ActorState::Disabled,
            _ => {}
        }
        Ok(())
    }

    /// Lifecycle state, `None` once the actor has been swept
    pub fn state(&self, id: ActorId) -> Option<ActorState> {
        self.actors.get(id).map(|actor| actor.state)
    }

    /// Whether the handle still refers to an actor (in any state)
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    /// Whether the actor exists and is not pending destruction
    pub fn is_alive(&self, id: ActorId) -> bool {
        self.state(id).is_some_and(|state| state != ActorState::PendingDestroy)
    }

    /// Kind tag of an actor
    pub fn tag(&self, id: ActorId) -> Option<ActorTag> {
        self.actors.get(id).and_then(|actor| actor.tag)
    }

    /// Number of actors, including disabled and pending ones
    pub fn actor_count(&self) -> usize {
        self.update_list.len()
    }

    /// Constructed actors in update order
    pub fn actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.update_list.iter().copied()
    }

    /// Live actors carrying `tag`, in update order
    pub fn actors_tagged(&self, tag: ActorTag) -> impl Iterator<Item = ActorId> + '_ {
        self.update_list.iter().copied().filter(move |id| {
            self.actors
                .get(*id)
                .is_some_and(|actor| actor.tag == Some(tag) && actor.state != ActorState::PendingDestroy)
        })
    }

    /// Change an actor's update order; lower orders update first, ties keep spawn order
    pub fn set_update_order(&mut self, id: ActorId, update_order: i32) -> Result<(), SceneError> {
        self.actor_mut(id)?.update_order = update_order;
        let actors = &self.actors;
        self.update_list
            .sort_by_key(|other| actors.get(*other).map_or(0, |actor| actor.update_order));
        Ok(())
    }

    /// Destroy the actor automatically once `seconds` of world time have passed
    ///
    /// Negative values expire on the next update; an infinite lifespan clears it.
    pub fn set_lifespan(&mut self, id: ActorId, seconds: f32) -> Result<(), SceneError> {
        let now = self.clock.now();
        let lifespan = Duration::try_from_secs_f32(seconds.max(0.0))
            .ok()
            .map(|duration| Lifetime::new(now, duration));
        self.actor_mut(id)?.lifespan = lifespan;
        Ok(())
    }

    /// Time left before the actor's lifespan runs out
    pub fn lifespan_remaining(&self, id: ActorId) -> Option<Duration> {
        let now = self.clock.now();
        self.actors
            .get(id)
            .and_then(|actor| actor.lifespan)
            .map(|lifespan| lifespan.remaining(now))
    }

    pub(super) fn actor(&self, id: ActorId) -> Result<&Actor, SceneError> {
        self.actors.get(id).ok_or(SceneError::StaleActor(id))
    }

    pub(super) fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor, SceneError> {
        self.actors.get_mut(id).ok_or(SceneError::StaleActor(id))
    }

    // ----------------------------------------------------------------------
    // Components
    // ----------------------------------------------------------------------

    /// Create a component owned by `actor`
    ///
    /// The component starts active, unattached, with an identity local transform.
    pub fn add_component(&mut self, actor: ActorId, kind: impl Into<ComponentKind>) -> Result<ComponentId, SceneError> {
        let kind = kind.into();
        if let ComponentKind::Sprite(sprite) = &kind {
            self.validate_texture(&sprite.texture)?;
        }
        self.actor(actor)?;
        let id = self.components.insert(Component::new(actor, kind));
        self.actor_mut(actor)?.components.push(id);
        Ok(id)
    }

    /// Add a transform-only scene node
    pub fn add_scene(&mut self, actor: ActorId) -> Result<ComponentId, SceneError> {
        self.add_component(actor, ComponentKind::Scene)
    }

    /// Add a circle collider of the given radius on every layer
    pub fn add_circle(&mut self, actor: ActorId, radius: f32) -> Result<ComponentId, SceneError> {
        self.add_component(actor, CircleCollider::new(radius))
    }

    /// Add a visible sprite
    pub fn add_sprite(
        &mut self,
        actor: ActorId,
        texture: impl Into<String>,
        draw_order: i32,
    ) -> Result<ComponentId, SceneError> {
        self.add_component(actor, Sprite::new(texture).with_draw_order(draw_order))
    }

    /// Add a movement component
    pub fn add_movement(&mut self, actor: ActorId, movement: Movement) -> Result<ComponentId, SceneError> {
        self.add_component(actor, movement)
    }

    /// Remove a component at the end of the current tick
    ///
    /// # Panics
    /// Removing the component that is its actor's root is a programming error
    /// (make another component the root first).
    pub fn remove_component(&mut self, id: ComponentId) -> Result<(), SceneError> {
        let owner = self.component(id)?.owner;
        let is_root = self.actors.get(owner).is_some_and(|actor| actor.root == Some(id));
        assert!(!is_root, "component {id:?} is the root of actor {owner:?} and cannot be removed");
        self.component_mut(id)?.pending_removal = true;
        Ok(())
    }

    /// Whether the handle still refers to a component
    pub fn contains_component(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// Owning actor of a component
    pub fn component_owner(&self, id: ComponentId) -> Result<ActorId, SceneError> {
        Ok(self.component(id)?.owner)
    }

    /// Components owned by an actor, in creation order
    pub fn components_of(&self, actor: ActorId) -> Result<&[ComponentId], SceneError> {
        Ok(&self.actor(actor)?.components)
    }

    /// First component of `actor` with the given type
    pub fn find_component(&self, actor: ActorId, component_type: ComponentType) -> Option<ComponentId> {
        self.actors.get(actor)?.components.iter().copied().find(|id| {
            self.components
                .get(*id)
                .is_some_and(|component| component.kind.component_type() == component_type)
        })
    }

    /// Payload of a component
    pub fn kind(&self, id: ComponentId) -> Result<&ComponentKind, SceneError> {
        Ok(&self.component(id)?.kind)
    }

    /// Circle payload of a component
    pub fn circle(&self, id: ComponentId) -> Result<&CircleCollider, SceneError> {
        match &self.component(id)?.kind {
            ComponentKind::Circle(circle) => Ok(circle),
            other => Err(wrong_kind(id, ComponentType::Circle, other)),
        }
    }

    /// Mutable circle payload of a component
    pub fn circle_mut(&mut self, id: ComponentId) -> Result<&mut CircleCollider, SceneError> {
        match &mut self.component_mut(id)?.kind {
            ComponentKind::Circle(circle) => Ok(circle),
            other => Err(wrong_kind(id, ComponentType::Circle, other)),
        }
    }

    /// Sprite payload of a component
    pub fn sprite(&self, id: ComponentId) -> Result<&Sprite, SceneError> {
        match &self.component(id)?.kind {
            ComponentKind::Sprite(sprite) => Ok(sprite),
            other => Err(wrong_kind(id, ComponentType::Sprite, other)),
        }
    }

    /// Mutable sprite payload of a component
    ///
    /// Writing `texture` directly bypasses the asset resolver; prefer [`World::set_texture`].
    pub fn sprite_mut(&mut self, id: ComponentId) -> Result<&mut Sprite, SceneError> {
        match &mut self.component_mut(id)?.kind {
            ComponentKind::Sprite(sprite) => Ok(sprite),
            other => Err(wrong_kind(id, ComponentType::Sprite, other)),
        }
    }

    /// Movement payload of a component
    pub fn movement(&self, id: ComponentId) -> Result<&Movement, SceneError> {
        match &self.component(id)?.kind {
            ComponentKind::Movement(movement) => Ok(movement),
            other => Err(wrong_kind(id, ComponentType::Movement, other)),
        }
    }

    /// Mutable movement payload of a component
    pub fn movement_mut(&mut self, id: ComponentId) -> Result<&mut Movement, SceneError> {
        match &mut self.component_mut(id)?.kind {
            ComponentKind::Movement(movement) => Ok(movement),
            other => Err(wrong_kind(id, ComponentType::Movement, other)),
        }
    }

    /// Change a sprite's texture after validating it with the asset resolver
    pub fn set_texture(&mut self, id: ComponentId, texture: impl Into<String>) -> Result<(), SceneError> {
        let texture = texture.into();
        self.sprite(id)?;
        self.validate_texture(&texture)?;
        self.sprite_mut(id)?.texture = texture;
        Ok(())
    }

    fn validate_texture(&self, texture: &str) -> Result<(), SceneError> {
        if let Some(resolver) = &self.assets {
            resolver.resolve(texture)?;
        }
        Ok(())
    }

    /// Subscribe to a circle collider's overlaps
    pub fn on_overlap<F>(&mut self, circle: ComponentId, mode: OverlapMode, callback: F) -> Result<(), SceneError>
    where
        F: FnMut(&mut Self, &Overlap) -> CallbackResult + 'static,
    {
        self.circle_mut(circle)?.subscribe(OverlapSubscriber {
            mode,
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(())
    }

    /// Activate or deactivate a component (inactive colliders never overlap,
    /// inactive movement does not move, inactive sprites are not drawn)
    pub fn set_component_active(&mut self, id: ComponentId, active: bool) -> Result<(), SceneError> {
        self.component_mut(id)?.active = active;
        Ok(())
    }

    /// Whether a component is active
    pub fn is_component_active(&self, id: ComponentId) -> Result<bool, SceneError> {
        Ok(self.component(id)?.active)
    }

    /// Change a component's update order within its actor; lower orders update first
    pub fn set_component_update_order(&mut self, id: ComponentId, update_order: i32) -> Result<(), SceneError> {
        self.component_mut(id)?.update_order = update_order;
        Ok(())
    }

    pub(super) fn component(&self, id: ComponentId) -> Result<&Component, SceneError> {
        self.components.get(id).ok_or(SceneError::StaleComponent(id))
    }

    pub(super) fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component, SceneError> {
        self.components.get_mut(id).ok_or(SceneError::StaleComponent(id))
    }

    /// Visible sprites of active actors with their world transforms, sorted by draw order
    pub fn collect_sprites(&self) -> Vec<SpriteInstance> {
        let mut sprites = Vec::new();
        for &actor_id in &self.update_list {
            let Some(actor) = self.actors.get(actor_id) else {
                continue;
            };
            if actor.state != ActorState::Active {
                continue;
            }
            for &component_id in &actor.components {
                let Some(component) = self.components.get(component_id) else {
                    continue;
                };
                let ComponentKind::Sprite(sprite) = &component.kind else {
                    continue;
                };
                if !sprite.visible || !component.active || component.pending_removal {
                    continue;
                }
                if let Ok(transform) = self.component_world_transform(component_id) {
                    sprites.push(SpriteInstance {
                        component: component_id,
                        actor: actor_id,
                        texture: sprite.texture.clone(),
                        draw_order: sprite.draw_order,
                        transform,
                    });
                }
            }
        }
        sprites.sort_by_key(|sprite| sprite.draw_order);
        sprites
    }

    // ----------------------------------------------------------------------
    // Input
    // ----------------------------------------------------------------------

    /// Input router (mappings and raw state)
    pub const fn input(&self) -> &InputRouter {
        &self.input
    }

    /// Mutable input router, for the device layer and for registering mappings
    pub fn input_mut(&mut self) -> &mut InputRouter {
        &mut self.input
    }

    /// Subscribe `owner` to a named axis; called every tick with the resolved value
    pub fn bind_axis<F>(&mut self, owner: ActorId, name: impl Into<String>, callback: F) -> Result<BindingHandle, SceneError>
    where
        F: FnMut(&mut Self, ActorId, f32) -> CallbackResult + 'static,
    {
        self.actor(owner)?;
        Ok(self.input.bind_axis(owner, name, Rc::new(RefCell::new(callback))))
    }

    /// Subscribe `owner` to a named action; called on the key-down edge or every held tick
    pub fn bind_action<F>(
        &mut self,
        owner: ActorId,
        name: impl Into<String>,
        edge_triggered: bool,
        callback: F,
    ) -> Result<BindingHandle, SceneError>
    where
        F: FnMut(&mut Self, ActorId) -> CallbackResult + 'static,
    {
        self.actor(owner)?;
        Ok(self
            .input
            .bind_action(owner, name, edge_triggered, Rc::new(RefCell::new(callback))))
    }

    /// Remove an input subscription; returns `false` for unknown handles
    pub fn unbind(&mut self, handle: BindingHandle) -> bool {
        self.input.unbind(handle)
    }

    // ----------------------------------------------------------------------
    // Timers
    // ----------------------------------------------------------------------

    /// Run `callback` once after `duration` of world time
    pub fn set_timer<F>(&mut self, duration: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce(&mut Self) -> CallbackResult + 'static,
    {
        self.timers.set_timer(self.clock.now(), duration, None, Box::new(callback))
    }

    /// Run `callback` once after `duration`, unless `owner` is destroyed first
    ///
    /// Owned timers still fire while their owner is disabled.
    pub fn set_actor_timer<F>(&mut self, owner: ActorId, duration: Duration, callback: F) -> Result<TimerHandle, SceneError>
    where
        F: FnOnce(&mut Self, ActorId) -> CallbackResult + 'static,
    {
        self.actor(owner)?;
        Ok(self.timers.set_timer(
            self.clock.now(),
            duration,
            Some(owner),
            Box::new(move |world: &mut Self| callback(world, owner)),
        ))
    }

    /// Cancel a timer; returns `false` if it already fired, was cancelled or never existed
    pub fn cancel_timer(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }

    /// Whether a timer is still waiting to fire
    pub fn is_timer_pending(&self, handle: TimerHandle) -> bool {
        self.timers.is_pending(handle)
    }

    /// Time left before a timer fires
    pub fn timer_remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.timers.remaining(handle, self.clock.now())
    }

    /// Number of timers waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

fn wrong_kind(component: ComponentId, expected: ComponentType, actual: &ComponentKind) -> SceneError {
    SceneError::WrongComponentKind {
        component,
        expected,
        actual: actual.component_type(),
    }
}
