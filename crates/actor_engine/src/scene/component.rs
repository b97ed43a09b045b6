//! Component records and the closed set of component kinds

use super::components::{CircleCollider, Movement, Sprite};
use crate::foundation::collections::{ActorId, ComponentId};
use crate::foundation::math::Transform;

/// Discriminant of [`ComponentKind`], used in errors and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Transform-only scene node
    Scene,
    /// Circle collider
    Circle,
    /// Sprite
    Sprite,
    /// Movement
    Movement,
}

/// Component payload
#[derive(Debug, Clone)]
pub enum ComponentKind {
    /// Transform-only scene node (pivot, socket, anchor)
    Scene,
    /// Circle collider with overlap subscribers
    Circle(CircleCollider),
    /// Sprite drawn at the component's world transform
    Sprite(Sprite),
    /// Moves the owning actor every tick
    Movement(Movement),
}

impl ComponentKind {
    /// Discriminant of this payload
    pub const fn component_type(&self) -> ComponentType {
        match self {
            Self::Scene => ComponentType::Scene,
            Self::Circle(_) => ComponentType::Circle,
            Self::Sprite(_) => ComponentType::Sprite,
            Self::Movement(_) => ComponentType::Movement,
        }
    }
}

impl From<CircleCollider> for ComponentKind {
    fn from(circle: CircleCollider) -> Self {
        Self::Circle(circle)
    }
}

impl From<Sprite> for ComponentKind {
    fn from(sprite: Sprite) -> Self {
        Self::Sprite(sprite)
    }
}

impl From<Movement> for ComponentKind {
    fn from(movement: Movement) -> Self {
        Self::Movement(movement)
    }
}

/// What happens to a component's transform when its attachment changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachRule {
    /// Keep the local transform; the component moves with its new parent
    #[default]
    KeepRelative,
    /// Recompute the local transform so the world transform is unchanged
    KeepWorld,
}

/// Component record owned by the world
#[derive(Debug, Clone)]
pub(crate) struct Component {
    pub(crate) owner: ActorId,
    pub(crate) attach_parent: Option<ComponentId>,
    /// Components explicitly attached to this one
    pub(crate) attach_children: Vec<ComponentId>,
    pub(crate) local: Transform,
    pub(crate) active: bool,
    pub(crate) update_order: i32,
    pub(crate) pending_removal: bool,
    pub(crate) kind: ComponentKind,
}

impl Component {
    pub(crate) fn new(owner: ActorId, kind: ComponentKind) -> Self {
        Self {
            owner,
            attach_parent: None,
            attach_children: Vec::new(),
            local: Transform::identity(),
            active: true,
            update_order: 0,
            pending_removal: false,
            kind,
        }
    }
}
