//! The per-frame sequence
//!
//! `tick` runs five stages in a fixed order:
//! 1. input dispatch
//! 2. timers
//! 3. actor update (lifespan check, movement, behaviour)
//! 4. collision pass
//! 5. destruction sweep
//!
//! Every stage works from a snapshot of what it iterates, so callbacks may
//! spawn, destroy, bind and schedule freely. Structural removal only happens
//! in the sweep.

use super::actor::ActorState;
use super::component::{AttachRule, ComponentKind};
use super::{CallbackResult, World};
use crate::foundation::collections::{ActorId, ComponentId};
use crate::foundation::math::utils;
use crate::input::InputDispatch;
use crate::physics::{BoundingCircle, CollisionLayers, CollisionPair, Overlap, OverlapMode};
use std::collections::HashSet;

/// Circle collider as it stood when the collision pass began
struct ColliderSnapshot {
    component: ComponentId,
    actor: ActorId,
    bounds: BoundingCircle,
    layer: CollisionLayers,
    mask: CollisionLayers,
}

fn report(stage: &str, result: CallbackResult) {
    if let Err(err) = result {
        log::warn!("{stage} callback failed: {err}");
    }
}

impl World {
    /// Advance the world by one frame of `delta_seconds` (before clamping and time scale)
    pub fn tick(&mut self, delta_seconds: f32) {
        let delta = self.clock.advance(delta_seconds);
        log::trace!("Tick {} (dt {delta:.4}s)", self.clock.frame_count());

        self.dispatch_input();
        self.fire_timers();
        self.update_actors(delta);
        self.run_collision_pass();
        self.sweep();
    }

    fn is_ticking(&self, id: ActorId) -> bool {
        let frame = self.clock.frame_count();
        self.actors.get(id).is_some_and(|actor| actor.is_ticking(frame))
    }

    fn dispatch_input(&mut self) {
        let calls = self.input.collect_dispatch();
        for call in calls {
            if !self.input.is_bound(call.handle()) || !self.is_ticking(call.owner()) {
                continue;
            }
            match call {
                InputDispatch::Axis {
                    owner, callback, value, ..
                } => report("Axis", (&mut *callback.borrow_mut())(self, owner, value)),
                InputDispatch::Action { owner, callback, .. } => report("Action", (&mut *callback.borrow_mut())(self, owner)),
            }
        }
        self.input.end_frame();
    }

    fn fire_timers(&mut self) {
        let pass = self.timers.begin_pass(self.clock.now());
        while let Some((handle, entry)) = self.timers.pop_due(&pass) {
            if let Some(owner) = entry.owner {
                if !self.is_alive(owner) {
                    log::debug!("Dropping timer {handle:?}: owner {owner:?} is being destroyed");
                    continue;
                }
            }
            log::debug!("Firing timer {handle:?}");
            report("Timer", entry.fire(self));
        }
    }

    fn update_actors(&mut self, delta_seconds: f32) {
        let now = self.clock.now();
        let order = self.update_list.clone();
        for id in order {
            if !self.is_ticking(id) {
                continue;
            }
            let expired = self
                .actors
                .get(id)
                .and_then(|actor| actor.lifespan)
                .is_some_and(|lifespan| lifespan.is_expired(now));
            if expired {
                log::debug!("Actor {id:?} lifespan expired");
                self.destroy(id);
                continue;
            }

            self.update_movement(id, delta_seconds);

            let Some(mut behavior) = self.actors.get_mut(id).and_then(|actor| actor.behavior.take()) else {
                continue;
            };
            report("Update", behavior.on_update(self, id, delta_seconds));
            if let Some(actor) = self.actors.get_mut(id) {
                actor.behavior = Some(behavior);
            }
        }
    }

    fn update_movement(&mut self, id: ActorId, delta_seconds: f32) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let mut movers: Vec<(i32, ComponentId)> = actor
            .components
            .iter()
            .filter_map(|component_id| {
                let component = self.components.get(*component_id)?;
                let is_mover = matches!(component.kind, ComponentKind::Movement(_))
                    && component.active
                    && !component.pending_removal;
                is_mover.then_some((component.update_order, *component_id))
            })
            .collect();
        movers.sort_by_key(|(order, _)| *order);

        for (_, component_id) in movers {
            let Some(ComponentKind::Movement(movement)) =
                self.components.get_mut(component_id).map(|component| &mut component.kind)
            else {
                continue;
            };
            let (displacement, rotation) = movement.step(delta_seconds);
            if utils::is_nearly_zero(displacement.norm()) && utils::is_nearly_zero(rotation) {
                continue;
            }
            if let Ok(mut transform) = self.actor_transform(id) {
                transform.position += displacement;
                transform.rotation = utils::planar_rotation(rotation) * transform.rotation;
                report("Movement", self.set_transform(id, transform));
            }
        }
    }

    fn snapshot_colliders(&self) -> Vec<ColliderSnapshot> {
        let mut colliders = Vec::new();
        for &actor_id in &self.update_list {
            if !self.is_ticking(actor_id) {
                continue;
            }
            let Some(actor) = self.actors.get(actor_id) else {
                continue;
            };
            for &component_id in &actor.components {
                let Some(component) = self.components.get(component_id) else {
                    continue;
                };
                let ComponentKind::Circle(circle) = &component.kind else {
                    continue;
                };
                if !component.active || component.pending_removal {
                    continue;
                }
                let Ok(transform) = self.component_world_transform(component_id) else {
                    continue;
                };
                colliders.push(ColliderSnapshot {
                    component: component_id,
                    actor: actor_id,
                    bounds: BoundingCircle::new(transform.position, circle.radius),
                    layer: circle.layer,
                    mask: circle.mask,
                });
            }
        }
        colliders
    }

    /// Whether a collider can still take part in the pass. Actors marked for
    /// destruction during the pass stay in it; disabled ones drop out at once.
    fn still_colliding(&self, snapshot: &ColliderSnapshot) -> bool {
        let actor_ok = self
            .actors
            .get(snapshot.actor)
            .is_some_and(|actor| actor.state != ActorState::Disabled);
        let component_ok = self
            .components
            .get(snapshot.component)
            .is_some_and(|component| component.active && !component.pending_removal);
        actor_ok && component_ok
    }

    fn run_collision_pass(&mut self) {
        let colliders = self.snapshot_colliders();
        self.overlaps.begin_pass();

        for i in 0..colliders.len() {
            for j in (i + 1)..colliders.len() {
                let (a, b) = (&colliders[i], &colliders[j]);
                if a.actor == b.actor || !CollisionLayers::should_collide(a.layer, a.mask, b.layer, b.mask) {
                    continue;
                }
                if !a.bounds.overlaps(&b.bounds) {
                    continue;
                }
                if !self.still_colliding(a) || !self.still_colliding(b) {
                    continue;
                }
                let entered = self.overlaps.record(CollisionPair::new(a.component, b.component));
                self.notify_overlap(a, b, entered);
                self.notify_overlap(b, a, entered);
            }
        }
    }

    fn notify_overlap(&mut self, this: &ColliderSnapshot, other: &ColliderSnapshot, entered: bool) {
        let subscribers = match self.components.get(this.component).map(|component| &component.kind) {
            Some(ComponentKind::Circle(circle)) => circle.subscribers().to_vec(),
            _ => return,
        };
        let overlap = Overlap {
            component: this.component,
            actor: this.actor,
            other_component: other.component,
            other_actor: other.actor,
            other_tag: self.tag(other.actor),
        };
        for subscriber in subscribers {
            if subscriber.mode == OverlapMode::OnEnter && !entered {
                continue;
            }
            report("Overlap", (&mut *subscriber.callback.borrow_mut())(self, &overlap));
        }
    }

    fn sweep(&mut self) {
        let doomed_actors: Vec<ActorId> = self
            .update_list
            .iter()
            .copied()
            .filter(|id| self.state(*id) == Some(ActorState::PendingDestroy))
            .collect();
        for &id in &doomed_actors {
            if let Some(actor) = self.actors.get(id) {
                for component_id in actor.components.clone() {
                    if let Some(component) = self.components.get_mut(component_id) {
                        component.pending_removal = true;
                    }
                }
            }
        }

        let doomed_components: Vec<ComponentId> = self
            .components
            .iter()
            .filter(|(_, component)| component.pending_removal)
            .map(|(id, _)| id)
            .collect();
        if doomed_components.is_empty() && doomed_actors.is_empty() {
            return;
        }
        self.remove_components(&doomed_components);

        let doomed: HashSet<ActorId> = doomed_actors.iter().copied().collect();
        self.update_list.retain(|id| !doomed.contains(id));
        for id in doomed_actors {
            self.release_actor(id);
            log::debug!("Actor {id:?} destroyed");
        }
    }

    /// Remove components, first detaching (keep-world) any surviving component attached to them
    fn remove_components(&mut self, doomed: &[ComponentId]) {
        let doomed_set: HashSet<ComponentId> = doomed.iter().copied().collect();
        let orphans: Vec<ComponentId> = doomed
            .iter()
            .filter_map(|id| self.components.get(*id))
            .flat_map(|component| component.attach_children.iter().copied())
            .filter(|child| !doomed_set.contains(child))
            .collect();
        for orphan in orphans {
            report("Detach", self.detach(orphan, AttachRule::KeepWorld));
        }

        for &id in doomed {
            let last_world = self.component_world_transform(id).ok();
            self.unlink_from_parent(id);
            let Some(component) = self.components.remove(id) else {
                continue;
            };
            if let Some(owner) = self.actors.get_mut(component.owner) {
                owner.components.retain(|other| *other != id);
                if owner.root == Some(id) {
                    owner.root = None;
                    owner.transform = last_world.unwrap_or(owner.transform);
                }
            }
            self.overlaps.forget(id);
        }
    }

    /// Drop an actor record together with its bindings and timers
    fn release_actor(&mut self, id: ActorId) {
        let bindings = self.input.unbind_owner(id);
        let timers = self.timers.cancel_owned_by(id);
        if bindings > 0 || timers > 0 {
            log::trace!("Actor {id:?} released {bindings} binding(s) and {timers} timer(s)");
        }
        self.actors.remove(id);
    }

    /// Undo a failed construction immediately; the actor was never admitted to a tick
    pub(super) fn purge_actor(&mut self, id: ActorId) {
        let components = self
            .actors
            .get(id)
            .map(|actor| actor.components.clone())
            .unwrap_or_default();
        self.remove_components(&components);
        self.update_list.retain(|other| *other != id);
        self.release_actor(id);
    }
}
