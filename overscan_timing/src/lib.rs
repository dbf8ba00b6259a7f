// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overscan Timing: host-driven throttling and timer primitives.
//!
//! UI runtimes differ in how they deliver time: browsers have animation frames,
//! native toolkits have vsync callbacks or event-loop ticks, and tests have a
//! hand-advanced counter. This crate models the two suspension points the rest
//! of Overscan needs without assuming any of them:
//!
//! - [`Throttle`]: a leading-edge rate limiter with an animation-frame driven
//!   trailing flush. It never calls anything itself; [`Throttle::call`] and
//!   [`Throttle::on_frame`] hand the arguments back when the wrapped work should
//!   run, and [`Throttle::wants_frame`] tells the host whether a frame callback
//!   is needed.
//! - [`Throttled`]: the same contract bound to a function and a [`Clock`], for
//!   callers that prefer `throttled.call(args)` over threading timestamps.
//! - [`TimerQueue`]: a small deadline-ordered queue for fixed-delay work
//!   (deferred scroll assignment, auto-grow ticks).
//!
//! Time is a [`Millis`] timestamp chosen by the host. Only differences between
//! timestamps matter, so any monotonic origin works.
//!
//! ## Minimal example
//!
//! ```rust
//! use overscan_timing::{Throttle, ThrottleOptions};
//!
//! let mut throttle = Throttle::new(25, ThrottleOptions::default());
//!
//! // The first call in a cold state runs immediately.
//! assert_eq!(throttle.call(0, "a"), Some("a"));
//!
//! // Calls inside the window are held; only the latest survives.
//! assert_eq!(throttle.call(5, "b"), None);
//! assert_eq!(throttle.call(6, "c"), None);
//! assert!(throttle.wants_frame());
//!
//! // Frames before the window elapses keep waiting.
//! assert_eq!(throttle.on_frame(10), None);
//! assert_eq!(throttle.on_frame(25), Some("c"));
//! assert!(!throttle.wants_frame());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod clock;
mod throttle;
mod timer;

pub use clock::{Clock, ManualClock, Millis};
pub use throttle::{Throttle, ThrottleOptions, Throttled, throttle};
pub use timer::{TimerId, TimerQueue};
