//! Transform hierarchy: actor transforms, attachment and root re-parenting
//!
//! A component's local transform is relative to its *parent frame*:
//! - its attach parent, if it has one
//! - otherwise its owner's root component, if it is not that root itself
//! - otherwise the owner's stored transform (actor without a root)
//! - or the world origin, for an unattached root
//!
//! An actor with a root component is wherever its root is.

use super::component::AttachRule;
use super::{SceneError, World};
use crate::foundation::collections::{ActorId, ComponentId};
use crate::foundation::math::{utils, Quat, Transform, Vec3};

impl World {
    // ----------------------------------------------------------------------
    // Actor transforms
    // ----------------------------------------------------------------------

    /// World transform of an actor
    pub fn actor_transform(&self, id: ActorId) -> Result<Transform, SceneError> {
        let actor = self.actor(id)?;
        match actor.root {
            Some(root) => self.component_world_transform(root),
            None => Ok(actor.transform),
        }
    }

    /// Move an actor (through its root component, if it has one)
    pub fn set_transform(&mut self, id: ActorId, transform: Transform) -> Result<(), SceneError> {
        match self.actor(id)?.root {
            Some(root) => self.set_component_world_transform(root, transform),
            None => {
                self.actor_mut(id)?.transform = transform;
                Ok(())
            }
        }
    }

    /// World position of an actor
    pub fn pos(&self, id: ActorId) -> Result<Vec3, SceneError> {
        Ok(self.actor_transform(id)?.position)
    }

    /// Set an actor's world position
    pub fn set_pos(&mut self, id: ActorId, position: Vec3) -> Result<(), SceneError> {
        let mut transform = self.actor_transform(id)?;
        transform.position = position;
        self.set_transform(id, transform)
    }

    /// World rotation of an actor
    pub fn rot(&self, id: ActorId) -> Result<Quat, SceneError> {
        Ok(self.actor_transform(id)?.rotation)
    }

    /// Set an actor's world rotation
    pub fn set_rot(&mut self, id: ActorId, rotation: Quat) -> Result<(), SceneError> {
        let mut transform = self.actor_transform(id)?;
        transform.rotation = rotation;
        self.set_transform(id, transform)
    }

    /// Planar heading of an actor in radians (rotation about the up axis)
    pub fn planar_rot(&self, id: ActorId) -> Result<f32, SceneError> {
        Ok(utils::planar_angle(&self.rot(id)?))
    }

    /// Set an actor's rotation to a planar heading in radians
    pub fn set_planar_rot(&mut self, id: ActorId, angle: f32) -> Result<(), SceneError> {
        self.set_rot(id, utils::planar_rotation(angle))
    }

    /// World scale of an actor
    pub fn scale(&self, id: ActorId) -> Result<Vec3, SceneError> {
        Ok(self.actor_transform(id)?.scale)
    }

    /// Set an actor's world scale
    pub fn set_scale(&mut self, id: ActorId, scale: Vec3) -> Result<(), SceneError> {
        let mut transform = self.actor_transform(id)?;
        transform.scale = scale;
        self.set_transform(id, transform)
    }

    /// Unit forward vector of an actor
    pub fn forward(&self, id: ActorId) -> Result<Vec3, SceneError> {
        Ok(self.actor_transform(id)?.forward())
    }

    /// Unit right vector of an actor
    pub fn right(&self, id: ActorId) -> Result<Vec3, SceneError> {
        Ok(self.actor_transform(id)?.right())
    }

    // ----------------------------------------------------------------------
    // Component transforms
    // ----------------------------------------------------------------------

    /// Root component of an actor
    pub fn root_component(&self, id: ActorId) -> Result<Option<ComponentId>, SceneError> {
        Ok(self.actor(id)?.root)
    }

    /// Explicit attach parent of a component
    pub fn attach_parent(&self, id: ComponentId) -> Result<Option<ComponentId>, SceneError> {
        Ok(self.component(id)?.attach_parent)
    }

    /// Local transform of a component relative to its parent frame
    pub fn relative_transform(&self, id: ComponentId) -> Result<Transform, SceneError> {
        Ok(self.component(id)?.local)
    }

    /// Set a component's local transform relative to its parent frame
    pub fn set_relative_transform(&mut self, id: ComponentId, transform: Transform) -> Result<(), SceneError> {
        self.component_mut(id)?.local = transform;
        Ok(())
    }

    /// World transform of a component
    pub fn component_world_transform(&self, id: ComponentId) -> Result<Transform, SceneError> {
        let mut locals = Vec::new();
        let mut current = id;
        let base = loop {
            let component = self.component(current)?;
            locals.push(component.local);
            assert!(
                locals.len() <= self.components.len(),
                "cyclic attachment through component {current:?}"
            );
            match self.effective_parent(current)? {
                Some(parent) => current = parent,
                None => break self.owner_frame(current)?,
            }
        };
        Ok(locals.iter().rev().fold(base, |world, local| world.combine(local)))
    }

    /// Place a component at a world transform by rewriting its local transform
    pub fn set_component_world_transform(&mut self, id: ComponentId, world: Transform) -> Result<(), SceneError> {
        let frame = self.parent_frame(id)?;
        self.component_mut(id)?.local = frame.relative(&world);
        Ok(())
    }

    fn effective_parent(&self, id: ComponentId) -> Result<Option<ComponentId>, SceneError> {
        let component = self.component(id)?;
        if component.attach_parent.is_some() {
            return Ok(component.attach_parent);
        }
        Ok(self.actor(component.owner)?.root.filter(|root| *root != id))
    }

    /// Frame of a component with no effective parent
    fn owner_frame(&self, id: ComponentId) -> Result<Transform, SceneError> {
        let actor = self.actor(self.component(id)?.owner)?;
        if actor.root == Some(id) {
            Ok(Transform::identity())
        } else {
            Ok(actor.transform)
        }
    }

    fn parent_frame(&self, id: ComponentId) -> Result<Transform, SceneError> {
        match self.effective_parent(id)? {
            Some(parent) => self.component_world_transform(parent),
            None => self.owner_frame(id),
        }
    }

    /// Panics if following parent frames upward from `start` leads back to it
    fn assert_acyclic(&self, start: ComponentId) -> Result<(), SceneError> {
        let mut current = self.effective_parent(start)?;
        let mut steps = 0;
        while let Some(component) = current {
            assert!(
                component != start && steps <= self.components.len(),
                "cyclic attachment involving component {start:?}"
            );
            current = self.effective_parent(component)?;
            steps += 1;
        }
        Ok(())
    }

    // ----------------------------------------------------------------------
    // Attachment
    // ----------------------------------------------------------------------

    /// Attach `child` to `parent`, which may belong to any actor
    ///
    /// # Panics
    /// Attaching a component to itself or to one of its own descendants.
    pub fn attach_to(&mut self, child: ComponentId, parent: ComponentId, rule: AttachRule) -> Result<(), SceneError> {
        assert_ne!(child, parent, "component {child:?} cannot be attached to itself");
        self.component(child)?;
        self.component(parent)?;

        let mut ancestor = Some(parent);
        let mut steps = 0;
        while let Some(component) = ancestor {
            assert!(
                component != child && steps <= self.components.len(),
                "attaching {child:?} to {parent:?} would create a cyclic attachment"
            );
            ancestor = self.effective_parent(component)?;
            steps += 1;
        }

        let world = self.component_world_transform(child)?;
        self.unlink_from_parent(child);
        self.component_mut(child)?.attach_parent = Some(parent);
        self.component_mut(parent)?.attach_children.push(child);
        if rule == AttachRule::KeepWorld {
            self.set_component_world_transform(child, world)?;
        }
        Ok(())
    }

    /// Detach `child` from its attach parent; it falls back to its owner's frame
    ///
    /// # Panics
    /// If the owner's root is itself attached below `child`.
    pub fn detach(&mut self, child: ComponentId, rule: AttachRule) -> Result<(), SceneError> {
        let world = self.component_world_transform(child)?;
        if !self.unlink_from_parent(child) {
            return Ok(());
        }
        self.assert_acyclic(child)?;
        if rule == AttachRule::KeepWorld {
            self.set_component_world_transform(child, world)?;
        }
        Ok(())
    }

    /// Returns `true` if the component had an attach parent
    pub(super) fn unlink_from_parent(&mut self, child: ComponentId) -> bool {
        let Some(parent) = self
            .components
            .get_mut(child)
            .and_then(|component| component.attach_parent.take())
        else {
            return false;
        };
        if let Some(parent) = self.components.get_mut(parent) {
            parent.attach_children.retain(|other| *other != child);
        }
        true
    }

    /// Make `root` the root component of `actor`
    ///
    /// The actor stays where it was: the new root is moved to the actor's
    /// current world transform, and every other unattached component of the
    /// actor (including the previous root) keeps its world transform.
    ///
    /// # Panics
    /// If `root` belongs to another actor, or the change creates a cyclic attachment.
    pub fn set_root_component(&mut self, actor: ActorId, root: ComponentId) -> Result<(), SceneError> {
        let owner = self.component(root)?.owner;
        assert_eq!(owner, actor, "component {root:?} belongs to actor {owner:?}, not {actor:?}");
        let previous = self.actor(actor)?.root;
        if previous == Some(root) {
            return Ok(());
        }

        let actor_world = self.actor_transform(actor)?;
        let mut rehomed = Vec::new();
        for &id in &self.actor(actor)?.components {
            if id != root && self.component(id)?.attach_parent.is_none() {
                rehomed.push((id, self.component_world_transform(id)?));
            }
        }

        let record = self.actor_mut(actor)?;
        record.root = Some(root);
        record.transform = actor_world;
        self.assert_acyclic(root)?;

        self.set_component_world_transform(root, actor_world)?;
        for (id, world) in rehomed {
            self.set_component_world_transform(id, world)?;
        }
        log::debug!("Actor {actor:?} root changed from {previous:?} to {root:?}");
        Ok(())
    }
}
