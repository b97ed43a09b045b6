//! Sprite payload

use crate::foundation::collections::{ActorId, ComponentId};
use crate::foundation::math::Transform;
use serde::{Deserialize, Serialize};

/// Draw order of sprites created without one
pub const DEFAULT_DRAW_ORDER: i32 = 100;

/// A textured quad drawn at its component's world transform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    /// Texture identifier (opaque to the scene)
    pub texture: String,
    /// Lower orders are drawn first
    pub draw_order: i32,
    /// Hidden sprites are skipped when collecting draw lists
    pub visible: bool,
}

impl Sprite {
    /// Visible sprite at the default draw order
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            draw_order: DEFAULT_DRAW_ORDER,
            visible: true,
        }
    }

    /// Builder pattern: set draw order
    pub fn with_draw_order(mut self, draw_order: i32) -> Self {
        self.draw_order = draw_order;
        self
    }
}

/// Sprite entry of a draw list
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteInstance {
    /// Sprite component
    pub component: ComponentId,
    /// Owning actor
    pub actor: ActorId,
    /// Texture identifier
    pub texture: String,
    /// Draw order
    pub draw_order: i32,
    /// World transform of the sprite component
    pub transform: Transform,
}
