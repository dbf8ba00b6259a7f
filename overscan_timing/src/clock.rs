// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time sources.

use alloc::rc::Rc;
use core::cell::Cell;

/// Milliseconds since a host-chosen origin.
pub type Millis = u64;

/// A source of the current time.
///
/// Hosts usually implement this over their platform clock. Closures returning
/// [`Millis`] implement it directly.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Millis;
}

impl<F: Fn() -> Millis> Clock for F {
    fn now(&self) -> Millis {
        self()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the code under test.
///
/// ```rust
/// use overscan_timing::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// let shared = clock.clone();
/// clock.advance(5);
/// assert_eq!(shared.now(), 105);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Sets the current time.
    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get().saturating_add(delta));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
