//! Time management utilities
//!
//! The world runs on a simulated clock advanced by the (clamped, scaled) tick
//! delta rather than wall-clock time, so pausing or slowing the world slows
//! every timer and lifespan with it.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Instant on the world clock, measured from world creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(Duration);

impl TimePoint {
    /// World creation
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Time point `duration` after world creation
    pub const fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    /// Time point `seconds` after world creation
    pub fn from_secs_f32(seconds: f32) -> Self {
        Self(Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX))
    }

    /// Elapsed world time since creation
    pub const fn since_start(self) -> Duration {
        self.0
    }

    /// Elapsed world time in seconds
    pub fn as_secs_f32(self) -> f32 {
        self.0.as_secs_f32()
    }
}

impl Add<Duration> for TimePoint {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs))
    }
}

impl Sub for TimePoint {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}

/// Simulated clock owned by a world
#[derive(Debug, Clone)]
pub struct WorldClock {
    now: TimePoint,
    delta_seconds: f32,
    frame_count: u64,
    max_delta_seconds: f32,
    time_scale: f32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new(0.25, 1.0)
    }
}

impl WorldClock {
    /// Create a clock that clamps raw deltas to `max_delta_seconds` and scales them by `time_scale`
    pub fn new(max_delta_seconds: f32, time_scale: f32) -> Self {
        Self {
            now: TimePoint::ZERO,
            delta_seconds: 0.0,
            frame_count: 0,
            max_delta_seconds: max_delta_seconds.max(0.0),
            time_scale: time_scale.max(0.0),
        }
    }

    /// Advance by one frame; returns the effective delta in seconds
    pub fn advance(&mut self, raw_delta_seconds: f32) -> f32 {
        let clamped = if raw_delta_seconds.is_finite() {
            raw_delta_seconds.clamp(0.0, self.max_delta_seconds)
        } else {
            0.0
        };
        let scaled = clamped * self.time_scale;
        // An infinite scale times a zero delta is NaN
        self.delta_seconds = if scaled.is_nan() { 0.0 } else { scaled.min(f32::MAX) };
        self.now = self.now + Duration::try_from_secs_f32(self.delta_seconds).unwrap_or(Duration::MAX);
        self.frame_count += 1;
        self.delta_seconds
    }

    /// Current world time
    pub const fn now(&self) -> TimePoint {
        self.now
    }

    /// Effective delta of the last frame in seconds
    pub const fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    /// Number of frames advanced so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current time scale (0 pauses, below 1 slows down)
    pub const fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Change the time scale; negative values are treated as 0
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale.max(0.0);
    }
}

/// Lifespan of an actor on the world clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    /// Time when the lifespan was set
    pub created_at: TimePoint,
    /// How long the actor should live
    pub duration: Duration,
}

impl Lifetime {
    /// Create a new lifetime
    pub const fn new(created_at: TimePoint, duration: Duration) -> Self {
        Self {
            created_at,
            duration,
        }
    }

    /// Check if this lifetime has expired
    pub fn is_expired(&self, now: TimePoint) -> bool {
        now >= self.created_at + self.duration
    }

    /// Get remaining lifetime
    pub fn remaining(&self, now: TimePoint) -> Duration {
        (self.created_at + self.duration) - now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates_scaled_delta() {
        let mut clock = WorldClock::new(1.0, 0.5);
        assert_eq!(clock.advance(0.5), 0.25);
        assert_eq!(clock.advance(0.5), 0.25);
        assert_eq!(clock.now(), TimePoint::from_duration(Duration::from_millis(500)));
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_clock_clamps_spikes_and_garbage() {
        let mut clock = WorldClock::new(0.1, 1.0);
        assert!((clock.advance(3.0) - 0.1).abs() < 1e-6);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
    }

    #[test]
    fn test_paused_clock_does_not_move() {
        let mut clock = WorldClock::new(1.0, 1.0);
        clock.set_time_scale(0.0);
        clock.advance(0.5);
        assert_eq!(clock.now(), TimePoint::ZERO);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_huge_time_scale_saturates() {
        let mut clock = WorldClock::new(1.0, f32::MAX);
        assert_eq!(clock.advance(0.1), f32::MAX);
        assert_eq!(clock.now(), TimePoint::from_duration(Duration::MAX));
        clock.advance(0.1);
        assert_eq!(clock.now(), TimePoint::from_duration(Duration::MAX));
        assert_eq!(clock.frame_count(), 2);

        clock.set_time_scale(f32::INFINITY);
        assert_eq!(clock.advance(0.0), 0.0);
        assert_eq!(clock.advance(0.1), f32::MAX);
    }

    #[test]
    fn test_lifetime_expiry() {
        let lifetime = Lifetime::new(TimePoint::from_secs_f32(1.0), Duration::from_secs(2));
        assert!(!lifetime.is_expired(TimePoint::from_secs_f32(2.5)));
        assert!(lifetime.is_expired(TimePoint::from_secs_f32(3.0)));
        assert_eq!(lifetime.remaining(TimePoint::from_secs_f32(2.0)), Duration::from_secs(1));
        assert_eq!(lifetime.remaining(TimePoint::from_secs_f32(9.0)), Duration::ZERO);
    }
}
