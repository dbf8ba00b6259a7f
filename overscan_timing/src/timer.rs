// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer queue.

use smallvec::SmallVec;

use crate::clock::Millis;

/// Handle for a scheduled timer, unique within its queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    deadline: Millis,
    id: TimerId,
    payload: T,
}

/// A small queue of one-shot timers.
///
/// Timers pop in deadline order; timers sharing a deadline pop in the order
/// they were scheduled. The queue is expected to hold a handful of entries
/// and stores up to four inline.
///
/// ```rust
/// use overscan_timing::TimerQueue;
///
/// let mut timers = TimerQueue::new();
/// timers.schedule(30, "late");
/// let early = timers.schedule(10, "early");
///
/// assert_eq!(timers.next_deadline(), Some(10));
/// assert_eq!(timers.pop_due(5), None);
/// assert_eq!(timers.pop_due(10), Some((early, "early")));
/// ```
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
            next_id: 0,
        }
    }

    /// Schedules `payload` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: Millis, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            at,
            Entry {
                deadline,
                id,
                payload,
            },
        );
        id
    }

    /// Removes a timer before it fires, returning its payload.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let at = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(at).payload)
    }

    /// Returns the earliest deadline, if any timer is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Removes and returns the earliest timer if it is due at `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerId, T)> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let entry = self.entries.remove(0);
        Some((entry.id, entry.payload))
    }

    /// Drops every scheduled timer.
    pub fn clear(&mut self) {
        self.entries.clear();
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
}
