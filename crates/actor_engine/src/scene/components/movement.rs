//! Movement payload: constant drift plus per-frame steering input

use crate::foundation::math::{utils, Vec3};
use serde::{Deserialize, Serialize};

/// Moves its owning actor every tick
///
/// `velocity` and `angular_speed` apply continuously. Steering input added
/// through [`Movement::add_input`] and [`Movement::add_rotation_input`] is
/// scaled by `max_speed` / `turn_speed`, applied once, then cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movement {
    /// Constant world-space velocity (units per second)
    pub velocity: Vec3,
    /// Constant rotation speed about the up axis (radians per second)
    pub angular_speed: f32,
    /// Speed reached with full steering input
    pub max_speed: f32,
    /// Turn rate reached with full rotation input (radians per second)
    pub turn_speed: f32,
    #[serde(skip)]
    input: Vec3,
    #[serde(skip)]
    rotation_input: f32,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            velocity: Vec3::zeros(),
            angular_speed: 0.0,
            max_speed: 300.0,
            turn_speed: utils::deg_to_rad(180.0),
            input: Vec3::zeros(),
            rotation_input: 0.0,
        }
    }
}

impl Movement {
    /// Drift at a constant velocity
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    /// Steering only, with the given limits
    pub fn pawn(max_speed: f32, turn_speed: f32) -> Self {
        Self {
            max_speed,
            turn_speed,
            ..Self::default()
        }
    }

    /// Accumulate a world-space steering direction for this frame
    pub fn add_input(&mut self, direction: Vec3) {
        self.input += direction;
    }

    /// Accumulate rotation input for this frame (positive turns toward +Y)
    pub fn add_rotation_input(&mut self, amount: f32) {
        self.rotation_input += amount;
    }

    /// Steering accumulated so far this frame
    pub const fn pending_input(&self) -> Vec3 {
        self.input
    }

    /// Consume this frame's input; returns the displacement and planar rotation to apply
    pub fn step(&mut self, delta_seconds: f32) -> (Vec3, f32) {
        let steering = if self.input.norm() > 1.0 {
            self.input.normalize()
        } else {
            self.input
        };
        let turning = self.rotation_input.clamp(-1.0, 1.0);

        let displacement = (self.velocity + steering * self.max_speed) * delta_seconds;
        let rotation = (self.angular_speed + turning * self.turn_speed) * delta_seconds;

        self.input = Vec3::zeros();
        self.rotation_input = 0.0;
        (displacement, rotation)
    }
}
