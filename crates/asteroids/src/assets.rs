//! Game asset definitions
//!
//! Textures are referenced by path; the engine treats them as opaque
//! identifiers and validates them through the installed resolver.

use actor_engine::prelude::AssetManifest;

/// Ship without thrust
pub const SHIP: &str = "../Assets/Ship.png";

/// Ship while thrusting
pub const SHIP_WITH_THRUST: &str = "../Assets/ShipWithThrust.png";

/// Outline drawn beneath the ship
pub const SHIP_HIGHLIGHT: &str = "../Assets/ShipHighlight.png";

/// Asteroid
pub const ASTEROID: &str = "../Assets/Asteroid.png";

/// Laser bolt
pub const LASER: &str = "../Assets/Laser.png";

/// Every texture the game references
pub const ALL_TEXTURES: [&str; 5] = [SHIP, SHIP_WITH_THRUST, SHIP_HIGHLIGHT, ASTEROID, LASER];

/// Manifest of the game's textures, used when running without a renderer
pub fn manifest() -> AssetManifest {
    AssetManifest::new(ALL_TEXTURES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_engine::prelude::{AssetError, AssetResolver};

    #[test]
    fn test_manifest_knows_every_texture() {
        let manifest = manifest();
        for texture in ALL_TEXTURES {
            assert!(manifest.resolve(texture).is_ok(), "{texture}");
        }
        assert!(matches!(
            manifest.resolve("../Assets/Ufo.png"),
            Err(AssetError::NotFound(_))
        ));
    }
}
