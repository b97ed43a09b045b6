//! Actors, components and the world that owns them
//!
//! - [`World`] owns every actor and component and runs the per-frame sequence
//! - actors carry a lifecycle [`ActorState`], an optional [`ActorTag`] and an [`ActorBehavior`]
//! - components carry a local transform, an optional attach parent and a [`ComponentKind`] payload

pub mod actor;
pub mod component;
pub mod components;
pub mod error;
mod frame;
mod hierarchy;
pub mod world;

pub use actor::{ActorBehavior, ActorState, ActorTag, Inert};
pub use component::{AttachRule, ComponentKind, ComponentType};
pub use components::{CircleCollider, Movement, OverlapCallback, OverlapSubscriber, Sprite, SpriteInstance};
pub use error::{CallbackResult, SceneError};
pub use world::World;
