// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI interactions are full of small, cancellable continuations: a press that
//! only becomes a drag after a delay, a hit test debounced behind the last
//! pointer move, an animation whose end commits a model change, a periodic
//! tick that nudges a scroll offset. This crate models those as entries in a
//! [`TimerQueue`] instead of callbacks buried in a platform timer API.
//!
//! The queue never reads a clock. Callers pass "now" as a [`Duration`] since
//! an arbitrary epoch of their choosing (frame time, `performance.now()`,
//! `Instant::elapsed`, a test counter). Typical host integration:
//!
//! - Schedule one-shot timers with [`TimerQueue::schedule_after`] and keep the
//!   returned [`TimerId`] if the timer may need to be cancelled.
//! - Schedule periodic work with [`TimerQueue::schedule_repeating`].
//! - Ask [`TimerQueue::next_deadline`] when the host should wake up next.
//! - On wake-up, drain due timers with [`TimerQueue::pop_due`].
//!
//! ## Ordering
//!
//! Timers fire in deadline order. Timers sharing a deadline fire in the order
//! they were scheduled. A repeating timer keeps its [`TimerId`] across
//! periods; if the host falls behind by more than one period, the timer fires
//! once and is re-anchored to the polling time instead of bursting.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_timing::TimerQueue;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Task {
//!     Debounce,
//!     Tick,
//! }
//!
//! let ms = Duration::from_millis;
//! let mut timers = TimerQueue::new();
//!
//! let debounce = timers.schedule_after(ms(0), ms(100), Task::Debounce);
//! timers.schedule_repeating(ms(10), ms(10), Task::Tick);
//! assert_eq!(timers.next_deadline(), Some(ms(10)));
//!
//! // A newer pointer move replaces the pending debounce.
//! timers.cancel(debounce);
//! timers.schedule_after(ms(50), ms(100), Task::Debounce);
//!
//! let fired = timers.pop_due(ms(10)).unwrap();
//! assert_eq!(fired.payload, Task::Tick);
//! assert!(timers.pop_due(ms(10)).is_none());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use core::time::Duration;

use smallvec::SmallVec;

/// Identifier of a scheduled timer.
///
/// Identifiers are never reused by a queue, so a stale id held after its
/// timer fired or was cancelled can not alias a newer timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(u64);

/// A timer returned by [`TimerQueue::pop_due`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fired<T> {
    /// The timer that fired.
    pub id: TimerId,
    /// The deadline the timer was scheduled for.
    ///
    /// This may be earlier than the polling time; use it as the logical time
    /// of the continuation when scheduling follow-up work.
    pub deadline: Duration,
    /// Caller payload.
    pub payload: T,
}

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: Duration,
    period: Option<Duration>,
    payload: T,
}

/// Smallest period accepted for repeating timers.
const MIN_PERIOD: Duration = Duration::from_nanos(1);

/// A deadline-ordered queue of one-shot and repeating timers.
///
/// Storage is inline for a handful of timers, which covers the usual
/// interaction controller (a delay, a debounce, an animation and a tick).
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: SmallVec<[Entry<T>; 4]>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 1,
        }
    }

    /// Returns the number of scheduled timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules a one-shot timer at an absolute deadline.
    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerId {
        let id = self.allocate_id();
        self.insert(Entry {
            id,
            deadline,
            period: None,
            payload,
        });
        id
    }

    /// Schedules a one-shot timer `delay` after `now`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, payload: T) -> TimerId {
        self.schedule(now.saturating_add(delay), payload)
    }

    /// Schedules a repeating timer.
    ///
    /// The first firing happens at `first_deadline`, then every `period`.
    /// A zero period is raised to one nanosecond so polling always terminates.
    pub fn schedule_repeating(
        &mut self,
        first_deadline: Duration,
        period: Duration,
        payload: T,
    ) -> TimerId {
        let id = self.allocate_id();
        self.insert(Entry {
            id,
            deadline: first_deadline,
            period: Some(period.max(MIN_PERIOD)),
            payload,
        });
        id
    }

    /// Cancels a timer, returning its payload if it was still scheduled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).payload)
    }

    /// Returns `true` if `id` is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Returns the next deadline of `id`, if it is still scheduled.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.deadline)
    }

    /// Returns the earliest deadline in the queue.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|entry| entry.deadline)
    }

    /// Removes every timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates scheduled timers in firing order.
    pub fn iter(&self) -> impl Iterator<Item = (TimerId, Duration, &T)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.id, entry.deadline, &entry.payload))
    }

    fn allocate_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, entry: Entry<T>) {
        // After every entry with the same deadline: ties fire in scheduling order.
        let index = self
            .entries
            .iter()
            .position(|existing| existing.deadline > entry.deadline)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, entry);
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pops the earliest timer whose deadline is at or before `now`.
    ///
    /// Call this in a loop until it returns `None`. Handlers may schedule or
    /// cancel timers between calls. Repeating timers are rescheduled before
    /// they are returned, so cancelling the returned id stops them.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<T>> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let Entry {
            id,
            deadline,
            period,
            payload,
        } = self.entries.remove(0);
        if let Some(period) = period {
            let mut next = deadline.saturating_add(period);
            if next <= now {
                next = now.saturating_add(period);
            }
            self.insert(Entry {
                id,
                deadline: next,
                period: Some(period),
                payload: payload.clone(),
            });
        }
        Some(Fired {
            id,
            deadline,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn empty_queue_has_no_deadline() {
        let mut timers = TimerQueue::<u8>::new();
        assert!(timers.is_empty());
        assert_eq!(timers.next_deadline(), None);
        assert!(timers.pop_due(ms(1_000)).is_none());
    }

    #[test]
    fn one_shot_fires_once_at_deadline() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule_after(ms(5), ms(200), "press");

        assert!(timers.pop_due(ms(204)).is_none());
        let fired = timers.pop_due(ms(205)).unwrap();
        assert_eq!(fired.id, id);
        assert_eq!(fired.deadline, ms(205));
        assert_eq!(fired.payload, "press");
        assert!(!timers.is_scheduled(id));
        assert!(timers.pop_due(ms(10_000)).is_none());
    }

    #[test]
    fn timers_fire_in_deadline_order_then_scheduling_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(30), 'c');
        timers.schedule(ms(10), 'a');
        timers.schedule(ms(20), 'b');
        timers.schedule(ms(10), 'z');

        let mut order = [' '; 4];
        for slot in &mut order {
            *slot = timers.pop_due(ms(100)).unwrap().payload;
        }
        assert_eq!(order, ['a', 'z', 'b', 'c']);
    }

    #[test]
    fn cancel_returns_payload_and_forgets_timer() {
        let mut timers = TimerQueue::new();
        let keep = timers.schedule(ms(10), 1);
        let dropped = timers.schedule(ms(5), 2);

        assert_eq!(timers.cancel(dropped), Some(2));
        assert_eq!(timers.cancel(dropped), None);
        assert_eq!(timers.next_deadline(), Some(ms(10)));
        assert_eq!(timers.deadline(keep), Some(ms(10)));
    }

    #[test]
    fn stale_ids_never_alias_new_timers() {
        let mut timers = TimerQueue::new();
        let first = timers.schedule(ms(1), ());
        timers.pop_due(ms(1));
        let second = timers.schedule(ms(1), ());

        assert_ne!(first, second);
        assert_eq!(timers.cancel(first), None);
        assert!(timers.is_scheduled(second));
    }

    #[test]
    fn repeating_timer_keeps_id_and_period() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule_repeating(ms(10), ms(10), "tick");

        for expected in [10, 20, 30] {
            let fired = timers.pop_due(ms(expected)).unwrap();
            assert_eq!(fired.id, id);
            assert_eq!(fired.deadline, ms(expected));
            assert!(timers.pop_due(ms(expected)).is_none());
        }
        assert_eq!(timers.deadline(id), Some(ms(40)));
    }

    #[test]
    fn repeating_timer_reanchors_when_host_falls_behind() {
        let mut timers = TimerQueue::new();
        timers.schedule_repeating(ms(10), ms(10), ());

        assert!(timers.pop_due(ms(95)).is_some());
        assert!(timers.pop_due(ms(95)).is_none());
        assert_eq!(timers.next_deadline(), Some(ms(105)));
    }

    #[test]
    fn cancelling_repeating_timer_after_fire_stops_it() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule_repeating(ms(0), ms(10), ());
        timers.pop_due(ms(0));

        assert_eq!(timers.cancel(id), Some(()));
        assert!(timers.is_empty());
    }

    #[test]
    fn zero_period_still_terminates() {
        let mut timers = TimerQueue::new();
        timers.schedule_repeating(ms(0), Duration::ZERO, ());

        let mut fired = 0;
        while timers.pop_due(ms(0)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 1, "zero period must not loop within one poll");
    }

    #[test]
    fn clear_drops_everything() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(1), ());
        timers.schedule_repeating(ms(1), ms(1), ());
        timers.clear();
        assert!(timers.is_empty());
        assert_eq!(timers.iter().count(), 0);
    }
}
