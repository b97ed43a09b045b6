//! Deferred callbacks on the world clock
//!
//! A timer is queued with the time it becomes due. Each tick the world pops
//! every due entry in (due time, registration order) and runs it once. Entries
//! are removed before they run, so a callback that schedules a new timer never
//! sees it fire within the same pass.

use crate::foundation::collections::{ActorId, SlotMap, TimerHandle};
use crate::foundation::time::TimePoint;
use crate::scene::{CallbackResult, World};
use std::time::Duration;

/// One-shot timer callback
pub type TimerCallback = Box<dyn FnOnce(&mut World) -> CallbackResult>;

/// A queued timer
pub struct TimerEntry {
    /// When the timer becomes due
    pub fire_at: TimePoint,
    /// Actor whose destruction cancels the timer
    pub owner: Option<ActorId>,
    sequence: u64,
    callback: TimerCallback,
}

impl TimerEntry {
    /// Consume the entry and run its callback
    pub fn fire(self, world: &mut World) -> CallbackResult {
        (self.callback)(world)
    }
}

/// Cutoff for a single firing pass; timers registered after it was taken wait for the next pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiringPass {
    now: TimePoint,
    sequence_limit: u64,
}

impl FiringPass {
    /// World time the pass fires against
    pub const fn now(&self) -> TimePoint {
        self.now
    }
}

/// Queue of pending one-shot timers
#[derive(Default)]
pub struct TimerManager {
    entries: SlotMap<TimerHandle, TimerEntry>,
    next_sequence: u64,
}

impl TimerManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` to run once `duration` after `now`
    pub fn set_timer(
        &mut self,
        now: TimePoint,
        duration: Duration,
        owner: Option<ActorId>,
        callback: TimerCallback,
    ) -> TimerHandle {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.insert(TimerEntry {
            fire_at: now + duration,
            owner,
            sequence,
            callback,
        })
    }

    /// Cancel a pending timer; returns `false` if it already fired or was cancelled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(handle).is_some()
    }

    /// Cancel every pending timer owned by `owner`
    pub fn cancel_owned_by(&mut self, owner: ActorId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.owner != Some(owner));
        before - self.entries.len()
    }

    /// Whether `handle` is still waiting to fire
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(handle)
    }

    /// Time left before `handle` fires
    pub fn remaining(&self, handle: TimerHandle, now: TimePoint) -> Option<Duration> {
        self.entries.get(handle).map(|entry| entry.fire_at - now)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Begin a firing pass at `now`
    pub const fn begin_pass(&self, now: TimePoint) -> FiringPass {
        FiringPass {
            now,
            sequence_limit: self.next_sequence,
        }
    }

    /// Remove and return the earliest due timer of the pass, if any
    pub fn pop_due(&mut self, pass: &FiringPass) -> Option<(TimerHandle, TimerEntry)> {
        let handle = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.fire_at <= pass.now && entry.sequence < pass.sequence_limit)
            .min_by_key(|(_, entry)| (entry.fire_at, entry.sequence))
            .map(|(handle, _)| handle)?;
        self.entries.remove(handle).map(|entry| (handle, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> TimerCallback {
        Box::new(|_| Ok(()))
    }

    fn at(seconds: f32) -> TimePoint {
        TimePoint::from_secs_f32(seconds)
    }

    #[test]
    fn test_not_due_before_duration() {
        let mut timers = TimerManager::new();
        timers.set_timer(TimePoint::ZERO, Duration::from_secs(2), None, noop());

        let pass = timers.begin_pass(at(1.5));
        assert!(timers.pop_due(&pass).is_none());

        let pass = timers.begin_pass(at(2.0));
        assert!(timers.pop_due(&pass).is_some());
        assert!(timers.pop_due(&pass).is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_due_order_is_time_then_registration() {
        let mut timers = TimerManager::new();
        let late = timers.set_timer(TimePoint::ZERO, Duration::from_secs(2), None, noop());
        let first = timers.set_timer(TimePoint::ZERO, Duration::from_secs(1), None, noop());
        let second = timers.set_timer(TimePoint::ZERO, Duration::from_secs(1), None, noop());

        let pass = timers.begin_pass(at(3.0));
        let order: Vec<_> = std::iter::from_fn(|| timers.pop_due(&pass).map(|(handle, _)| handle)).collect();
        assert_eq!(order, vec![first, second, late]);
    }

    #[test]
    fn test_timers_added_during_pass_wait() {
        let mut timers = TimerManager::new();
        timers.set_timer(TimePoint::ZERO, Duration::ZERO, None, noop());
        let pass = timers.begin_pass(TimePoint::ZERO);
        assert!(timers.pop_due(&pass).is_some());

        timers.set_timer(TimePoint::ZERO, Duration::ZERO, None, noop());
        assert!(timers.pop_due(&pass).is_none());
        assert!(timers.pop_due(&timers.begin_pass(TimePoint::ZERO)).is_some());
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerManager::new();
        let handle = timers.set_timer(TimePoint::ZERO, Duration::from_secs(1), None, noop());
        assert_eq!(timers.remaining(handle, at(0.25)), Some(Duration::from_millis(750)));
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(!timers.is_pending(handle));
    }

    #[test]
    fn test_cancel_owned_by() {
        use slotmap::KeyData;
        let owner = ActorId::from(KeyData::from_ffi(7));
        let mut timers = TimerManager::new();
        timers.set_timer(TimePoint::ZERO, Duration::from_secs(1), Some(owner), noop());
        timers.set_timer(TimePoint::ZERO, Duration::from_secs(1), Some(owner), noop());
        let kept = timers.set_timer(TimePoint::ZERO, Duration::from_secs(1), None, noop());
        assert_eq!(timers.cancel_owned_by(owner), 2);
        assert!(timers.is_pending(kept));
    }
}
