//! Component payloads
//!
//! Each component kind carries its data in one of these structs, wrapped by
//! [`ComponentKind`](crate::scene::ComponentKind).

pub mod circle;
pub mod movement;
pub mod sprite;

pub use circle::{CircleCollider, OverlapCallback, OverlapSubscriber, DEFAULT_RADIUS};
pub use movement::Movement;
pub use sprite::{Sprite, SpriteInstance, DEFAULT_DRAW_ORDER};
