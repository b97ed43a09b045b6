//! Circle collider payload

use crate::physics::{CollisionLayers, Overlap, OverlapMode};
use crate::scene::{CallbackResult, World};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Default collider radius in world units
pub const DEFAULT_RADIUS: f32 = 32.0;

/// Overlap subscriber; receives the notification from the subscribed collider's point of view
pub type OverlapCallback = Rc<RefCell<dyn FnMut(&mut World, &Overlap) -> CallbackResult>>;

/// A registered overlap subscriber
#[derive(Clone)]
pub struct OverlapSubscriber {
    /// When the subscriber is notified
    pub mode: OverlapMode,
    /// Subscriber
    pub callback: OverlapCallback,
}

/// Circle collider with overlap subscribers
#[derive(Clone)]
pub struct CircleCollider {
    /// Radius in world units (the collider's scale is not applied)
    pub radius: f32,
    /// Layers this collider is on
    pub layer: CollisionLayers,
    /// Layers this collider wants to overlap with
    pub mask: CollisionLayers,
    subscribers: Vec<OverlapSubscriber>,
}

impl CircleCollider {
    /// Collider of the given radius on every layer
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            layer: CollisionLayers::all(),
            mask: CollisionLayers::all(),
            subscribers: Vec::new(),
        }
    }

    /// Builder pattern: set layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Add a subscriber
    pub fn subscribe(&mut self, subscriber: OverlapSubscriber) {
        self.subscribers.push(subscriber);
    }

    /// Drop every subscriber
    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    /// Registered subscribers in registration order
    pub fn subscribers(&self) -> &[OverlapSubscriber] {
        &self.subscribers
    }
}

impl Default for CircleCollider {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl fmt::Debug for CircleCollider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircleCollider")
            .field("radius", &self.radius)
            .field("layer", &self.layer)
            .field("mask", &self.mask)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
