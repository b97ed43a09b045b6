//! Game configuration
//!
//! Loaded from `asteroids.toml` (or `.ron`) next to the binary when present.
//! Every field has a default, so a file only needs the values it changes.

use actor_engine::prelude::{
    utils, ActionMapping, AxisBinding, AxisMapping, Config, InputConfig, KeyCode, WorldConfig,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield settings
    pub screen: ScreenConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Seed for asteroid placement
    pub seed: u64,

    /// Axis and action bindings
    pub input: InputConfig,
}

/// Playfield dimensions, centred on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in world units
    pub width: f32,

    /// Height in world units
    pub height: f32,

    /// Distance past the edge an asteroid travels before wrapping
    pub wrap_margin: f32,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Asteroids spawned at start
    pub asteroid_count: u32,

    /// Asteroid drift speed
    pub asteroid_speed: f32,

    /// Ship top speed
    pub ship_max_speed: f32,

    /// Ship turn rate in degrees per second
    pub ship_turn_speed_degrees: f32,

    /// Minimum time between shots (milliseconds)
    pub fire_cooldown_ms: u64,

    /// Time the ship stays down after a hit (seconds)
    pub respawn_delay: f32,

    /// Laser lifetime (seconds)
    pub laser_lifespan: f32,

    /// Laser speed
    pub laser_speed: f32,

    /// Laser collision radius
    pub laser_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            gameplay: GameplayConfig::default(),
            seed: 0x5eed,
            input: default_bindings(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            wrap_margin: 32.0,
        }
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            asteroid_count: 20,
            asteroid_speed: 150.0,
            ship_max_speed: 300.0,
            ship_turn_speed_degrees: 180.0,
            fire_cooldown_ms: 500,
            respawn_delay: 2.0,
            laser_lifespan: 1.0,
            laser_speed: 800.0,
            laser_radius: 16.0,
        }
    }
}

impl GameplayConfig {
    /// Ship turn rate in radians per second
    pub fn ship_turn_speed(&self) -> f32 {
        utils::deg_to_rad(self.ship_turn_speed_degrees)
    }

    /// Minimum time between shots
    pub const fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.fire_cooldown_ms)
    }

    /// Time the ship stays down after a hit
    pub fn respawn_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.respawn_delay.max(0.0)).unwrap_or(Duration::ZERO)
    }
}

impl GameConfig {
    /// World settings for a game world
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            input: self.input.clone(),
            ..WorldConfig::default()
        }
    }
}

impl Config for GameConfig {}

/// `MoveForward` on W/S, `Turn` on A/D, `Shoot` on Space
pub fn default_bindings() -> InputConfig {
    InputConfig {
        axes: vec![
            AxisMapping::new(
                "MoveForward",
                vec![AxisBinding::new(KeyCode::W, 1.0), AxisBinding::new(KeyCode::S, -1.0)],
            ),
            AxisMapping::new(
                "Turn",
                vec![AxisBinding::new(KeyCode::A, -1.0), AxisBinding::new(KeyCode::D, 1.0)],
            ),
        ],
        actions: vec![ActionMapping::new("Shoot", vec![KeyCode::Space.into()])],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_engine::config::ConfigFormat;

    #[test]
    fn test_defaults_match_original_game() {
        let config = GameConfig::default();
        assert_eq!(config.gameplay.asteroid_count, 20);
        assert_eq!(config.gameplay.fire_cooldown(), Duration::from_millis(500));
        assert_eq!(config.gameplay.respawn_delay(), Duration::from_secs(2));
        assert_eq!(config.screen.wrap_margin, 32.0);
        assert_eq!(config.input.axes.len(), 2);
        assert_eq!(config.input.actions[0].name, "Shoot");
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config = GameConfig::from_str_with_format(
            "(seed: 7, gameplay: (asteroid_count: 3))",
            ConfigFormat::Ron,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.gameplay.asteroid_count, 3);
        assert_eq!(config.gameplay.laser_speed, 800.0);
        assert_eq!(config.input, default_bindings());
    }

    #[test]
    fn test_negative_respawn_delay_is_immediate() {
        let gameplay = GameplayConfig {
            respawn_delay: -1.0,
            ..GameplayConfig::default()
        };
        assert_eq!(gameplay.respawn_delay(), Duration::ZERO);
    }

    #[test]
    fn test_world_config_carries_bindings() {
        let config = GameConfig::default();
        assert_eq!(config.world_config().input, config.input);
    }
}
