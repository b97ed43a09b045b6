//! Circle overlap primitives and frame-to-frame pair tracking

use crate::foundation::collections::{ActorId, ComponentId};
use crate::foundation::math::Vec3;
use crate::scene::ActorTag;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A bounding circle (a sphere in world space)
///
/// The distance test uses all three components of `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// Center in world space
    pub center: Vec3,
    /// Radius in world units
    pub radius: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    fn distance_squared(&self, other: &Self) -> f32 {
        (self.center - other.center).norm_squared()
    }

    /// Circles overlap when their centers are strictly closer than the sum of the radii.
    /// Touching circles do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let radius_sum = self.radius + other.radius;
        self.distance_squared(other) < radius_sum * radius_sum
    }

    /// How far the circles overlap (0.0 if they don't)
    pub fn penetration_depth(&self, other: &Self) -> f32 {
        let distance = self.distance_squared(other).sqrt();
        (self.radius + other.radius - distance).max(0.0)
    }
}

/// When an overlap subscriber is notified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlapMode {
    /// Every tick the circles overlap
    #[default]
    EveryFrame,
    /// Only on the first tick of a run of overlapping ticks
    OnEnter,
}

/// Overlap notification handed to a collider's subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    /// The subscribed collider
    pub component: ComponentId,
    /// Owner of the subscribed collider
    pub actor: ActorId,
    /// The collider it overlaps
    pub other_component: ComponentId,
    /// Owner of the other collider
    pub other_actor: ActorId,
    /// Kind tag of the other owner, if it has one
    pub other_tag: Option<ActorTag>,
}

/// Unordered pair of colliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// One side
    pub a: ComponentId,
    /// The other side
    pub b: ComponentId,
}

impl CollisionPair {
    /// Create a pair (always stores the smaller key first)
    pub fn new(a: ComponentId, b: ComponentId) -> Self {
        if a < b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// Whether the pair involves `component`
    pub fn involves(&self, component: ComponentId) -> bool {
        self.a == component || self.b == component
    }
}

/// Remembers which pairs overlapped last tick so enter events can be told apart from stays
#[derive(Debug, Default)]
pub struct OverlapTracker {
    previous: HashSet<CollisionPair>,
    current: HashSet<CollisionPair>,
}

impl OverlapTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a pass: this tick's pairs become empty, last tick's are kept for comparison
    pub fn begin_pass(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
    }

    /// Record an overlapping pair; returns `true` if it did not overlap last tick
    pub fn record(&mut self, pair: CollisionPair) -> bool {
        self.current.insert(pair);
        !self.previous.contains(&pair)
    }

    /// Whether the pair overlapped in the most recently recorded pass
    pub fn is_overlapping(&self, pair: &CollisionPair) -> bool {
        self.current.contains(pair)
    }

    /// Number of pairs overlapping in the most recent pass
    pub fn overlap_count(&self) -> usize {
        self.current.len()
    }

    /// Drop every pair that mentions a removed collider
    pub fn forget(&mut self, component: ComponentId) {
        self.current.retain(|pair| !pair.involves(component));
        self.previous.retain(|pair| !pair.involves(component));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn circle(x: f32, radius: f32) -> BoundingCircle {
        BoundingCircle::new(Vec3::new(x, 0.0, 0.0), radius)
    }

    fn component(n: u64) -> ComponentId {
        ComponentId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circle(0.0, 16.0).overlaps(&circle(30.0, 16.0)));
        assert!(!circle(0.0, 16.0).overlaps(&circle(32.0, 16.0)), "touching is not overlapping");
        assert!(!circle(0.0, 16.0).overlaps(&circle(34.0, 16.0)));
    }

    #[test]
    fn test_overlap_measures_depth_axis() {
        let a = BoundingCircle::new(Vec3::new(0.0, 0.0, 0.0), 10.0);
        assert!(!a.overlaps(&BoundingCircle::new(Vec3::new(5.0, 0.0, 500.0), 10.0)));
        assert!(a.overlaps(&BoundingCircle::new(Vec3::new(0.0, 12.0, 12.0), 10.0)));
        assert!((a.penetration_depth(&BoundingCircle::new(Vec3::new(0.0, 0.0, 15.0), 10.0)) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_penetration_depth() {
        assert!((circle(0.0, 16.0).penetration_depth(&circle(30.0, 16.0)) - 2.0).abs() < 1e-5);
        assert_eq!(circle(0.0, 1.0).penetration_depth(&circle(10.0, 1.0)), 0.0);
    }

    #[test]
    fn test_pair_is_unordered() {
        assert_eq!(
            CollisionPair::new(component(1), component(2)),
            CollisionPair::new(component(2), component(1))
        );
    }

    #[test]
    fn test_tracker_reports_enter_once() {
        let pair = CollisionPair::new(component(1), component(2));
        let mut tracker = OverlapTracker::new();

        tracker.begin_pass();
        assert!(tracker.record(pair));
        tracker.begin_pass();
        assert!(!tracker.record(pair));
        tracker.begin_pass();
        tracker.begin_pass();
        assert!(tracker.record(pair), "separated for a tick, so this is a new enter");
    }

    #[test]
    fn test_forget_drops_pairs() {
        let pair = CollisionPair::new(component(1), component(2));
        let mut tracker = OverlapTracker::new();
        tracker.begin_pass();
        tracker.record(pair);
        tracker.forget(component(2));
        assert_eq!(tracker.overlap_count(), 0);
        tracker.begin_pass();
        assert!(tracker.record(pair));
    }
}
