//! Physics module for overlap detection
//!
//! The world drives the actual pass (see [`crate::scene::World::tick`]); this
//! module holds the geometry, the layer filter and the pair bookkeeping.

pub mod collision;
pub mod collision_layers;

pub use collision::{BoundingCircle, CollisionPair, Overlap, OverlapMode, OverlapTracker};
pub use collision_layers::CollisionLayers;
