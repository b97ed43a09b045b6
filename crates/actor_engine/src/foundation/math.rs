//! Math utilities and types
//!
//! Provides the spatial types shared by actors and components. The scene uses
//! a Z-up frame: actors face along [`FORWARD`] (+X), [`RIGHT`] is +Y and planar
//! rotations turn about [`UP`] (+Z).

pub use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Local forward axis of an unrotated actor
pub const FORWARD: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Local right axis of an unrotated actor
pub const RIGHT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// World up axis; planar rotations turn about it
pub const UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Tolerance used by [`utils::is_nearly_zero`]
pub const KINDA_SMALL: f32 = 1e-4;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create from position, rotation and scale
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Compose `parent ∘ child`: express `child` (given relative to `parent`)
    /// in the space `parent` lives in.
    ///
    /// The resulting rotation is renormalized so long attachment chains do not
    /// accumulate drift.
    pub fn compose(parent: &Self, child: &Self) -> Self {
        let rotation = Quat::new_normalize(parent.rotation.into_inner() * child.rotation.into_inner());
        Self {
            position: parent.position + parent.rotation * parent.scale.component_mul(&child.position),
            rotation,
            scale: parent.scale.component_mul(&child.scale),
        }
    }

    /// Combine this transform with another (`self` is the parent)
    pub fn combine(&self, other: &Self) -> Self {
        Self::compose(self, other)
    }

    /// Get the inverse transform
    ///
    /// Exact for uniform scale; with non-uniform scale under rotation the TRS
    /// form cannot represent the true inverse, so the result is approximate.
    pub fn inverse(&self) -> Self {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_scale.component_mul(&(inv_rotation * -self.position));

        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Express `world` relative to `self`, so that `self.combine(&result) == world`
    pub fn relative(&self, world: &Self) -> Self {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        Self {
            position: inv_scale.component_mul(&(inv_rotation * (world.position - self.position))),
            rotation: Quat::new_normalize(inv_rotation.into_inner() * world.rotation.into_inner()),
            scale: inv_scale.component_mul(&world.scale),
        }
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * self.scale.component_mul(&point)
    }

    /// Forward direction of this transform
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    /// Right direction of this transform
    pub fn right(&self) -> Vec3 {
        self.rotation * RIGHT
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3, KINDA_SMALL, UP};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Whether `value` is within [`KINDA_SMALL`] of zero
    pub fn is_nearly_zero(value: f32) -> bool {
        value.abs() <= KINDA_SMALL
    }

    /// Rotation by `angle` radians about the world up axis
    pub fn planar_rotation(angle: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::z_axis(), angle)
    }

    /// Signed angle of `rotation` about the up axis
    pub fn planar_angle(rotation: &Quat) -> f32 {
        rotation.scaled_axis().dot(&UP)
    }

    /// Unit vector in the XY plane at `angle` radians from +X
    pub fn planar_unit(angle: f32) -> Vec3 {
        Vec3::new(angle.cos(), angle.sin(), 0.0)
    }

    /// Normalize `v`, or return zero when it is too short to have a direction
    pub fn safe_normalize(v: Vec3) -> Vec3 {
        v.try_normalize(KINDA_SMALL).unwrap_or_else(Vec3::zeros)
    }
}
