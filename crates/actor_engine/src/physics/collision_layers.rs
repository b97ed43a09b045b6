//! Collision layer filtering
//!
//! Every circle collider sits on one or more layers and carries a mask of the
//! layers it wants to hear about. A pair is only tested when each side's layer
//! is in the other side's mask.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Collision layers and masks
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CollisionLayers: u32 {
        /// Player controlled actors
        const PLAYER = 1 << 0;
        /// Hostile actors
        const ENEMY = 1 << 1;
        /// Projectiles
        const PROJECTILE = 1 << 2;
        /// Static environment
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes
        const TRIGGER = 1 << 4;
        /// Pickups
        const PICKUP = 1 << 5;
    }
}

impl CollisionLayers {
    /// Check if two colliders should be tested against each other
    ///
    /// # Example
    /// ```
    /// use actor_engine::physics::CollisionLayers;
    ///
    /// let ship = (CollisionLayers::PLAYER, CollisionLayers::ENEMY);
    /// let rock = (CollisionLayers::ENEMY, CollisionLayers::all());
    /// assert!(CollisionLayers::should_collide(ship.0, ship.1, rock.0, rock.1));
    /// ```
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_collide_mutual() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn test_should_not_collide_one_way() {
        assert!(!CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PROJECTILE,
        ));
    }

    #[test]
    fn test_default_hears_everything() {
        let everything = CollisionLayers::default();
        assert!(CollisionLayers::should_collide(
            everything,
            everything,
            CollisionLayers::PICKUP,
            CollisionLayers::TRIGGER | CollisionLayers::PICKUP,
        ));
    }
}
