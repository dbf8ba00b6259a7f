// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leading-edge throttle with a frame-driven trailing flush.
//!
//! ## Contract
//!
//! - The first call in a cold state runs immediately. Leading behavior is not
//!   optional.
//! - A call arriving before `delay` has elapsed since the last invocation is
//!   stored as *pending*, replacing any earlier pending call, and a frame is
//!   requested.
//! - On each frame, if `delay` has elapsed the pending call fires and the
//!   window restarts. Otherwise the frame is requested again when trailing is
//!   enabled, or the pending call is dropped when it is not.
//! - [`Throttle::cancel`] forgets the pending call, the frame request, and the
//!   last invocation, so the next call is leading again.
//!
//! Frames arrive whenever the host gets around to them, so the trailing call
//! fires on the first frame at or after the window, not exactly at it.

use core::fmt;

use crate::clock::{Clock, Millis};

/// Options for [`Throttle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ThrottleOptions {
    /// Whether a pending call is retried on later frames until the window
    /// elapses. When `false`, a pending call that is not yet due on its first
    /// frame is dropped.
    pub trailing: bool,
}

impl ThrottleOptions {
    /// Returns these options with `trailing` replaced.
    #[must_use]
    pub const fn with_trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self { trailing: true }
    }
}

/// Rate limiter state for one throttled operation.
///
/// `A` is whatever the wrapped operation needs: arguments, a message, or `()`.
/// The throttle never runs anything itself; it returns the arguments to the
/// caller when the operation should run.
#[derive(Clone, Debug)]
pub struct Throttle<A> {
    delay: Millis,
    options: ThrottleOptions,
    last_invoked: Option<Millis>,
    pending: Option<A>,
    frame_requested: bool,
}

impl<A> Throttle<A> {
    /// Creates a cold throttle allowing one invocation per `delay` milliseconds.
    ///
    /// A `delay` of zero lets every call through.
    #[must_use]
    pub const fn new(delay: Millis, options: ThrottleOptions) -> Self {
        Self {
            delay,
            options,
            last_invoked: None,
            pending: None,
            frame_requested: false,
        }
    }

    /// Returns the minimum spacing between invocations.
    #[must_use]
    pub fn delay(&self) -> Millis {
        self.delay
    }

    /// Returns the options this throttle was created with.
    #[must_use]
    pub fn options(&self) -> ThrottleOptions {
        self.options
    }

    /// Returns `true` if the next call will be treated as the first one.
    #[must_use]
    pub fn is_cold(&self) -> bool {
        self.last_invoked.is_none()
    }

    /// Returns the time of the last invocation, if any.
    #[must_use]
    pub fn last_invoked(&self) -> Option<Millis> {
        self.last_invoked
    }

    /// Returns `true` while a call is waiting for its window.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns `true` if the host should call [`Throttle::on_frame`] on its
    /// next frame.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.frame_requested
    }

    /// Registers a call at `now`.
    ///
    /// Returns `Some(args)` when the operation must run right away; the
    /// caller runs it. Returns `None` when the call was stored as pending.
    pub fn call(&mut self, now: Millis, args: A) -> Option<A> {
        if self.window_elapsed(now) {
            self.last_invoked = Some(now);
            self.pending = None;
            self.frame_requested = false;
            return Some(args);
        }
        self.pending = Some(args);
        self.frame_requested = true;
        None
    }

    /// Frame callback.
    ///
    /// Returns the pending arguments when they are due. Does nothing unless a
    /// frame was requested.
    pub fn on_frame(&mut self, now: Millis) -> Option<A> {
        if !self.frame_requested {
            return None;
        }
        self.frame_requested = false;
        self.pending.as_ref()?;

        if self.window_elapsed(now) {
            self.last_invoked = Some(now);
            return self.pending.take();
        }
        if self.options.trailing {
            self.frame_requested = true;
        } else {
            tracing::trace!(delay = self.delay, "throttle dropped a pending call");
            self.pending = None;
        }
        None
    }

    /// Resets to the cold state, dropping any pending call.
    pub fn cancel(&mut self) {
        self.last_invoked = None;
        self.pending = None;
        self.frame_requested = false;
    }

    fn window_elapsed(&self, now: Millis) -> bool {
        match self.last_invoked {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.delay,
        }
    }
}

/// A function bound to a [`Throttle`] and a [`Clock`].
///
/// This is the `throttle(fn, delay, options)` shape: calling
/// [`Throttled::call`] either runs `func` synchronously or defers it to a
/// later [`Throttled::on_frame`].
pub struct Throttled<F, A, C> {
    throttle: Throttle<A>,
    func: F,
    clock: C,
}

/// Wraps `func` so it runs at most once per `delay` milliseconds of `clock`.
pub fn throttle<F, A, C>(
    func: F,
    delay: Millis,
    options: ThrottleOptions,
    clock: C,
) -> Throttled<F, A, C>
where
    F: FnMut(A),
    C: Clock,
{
    Throttled::new(func, delay, options, clock)
}

impl<F, A, C> Throttled<F, A, C>
where
    F: FnMut(A),
    C: Clock,
{
    /// Creates a cold throttled function.
    pub fn new(func: F, delay: Millis, options: ThrottleOptions, clock: C) -> Self {
        Self {
            throttle: Throttle::new(delay, options),
            func,
            clock,
        }
    }

    /// Calls the throttled function.
    ///
    /// Returns `true` if `func` ran synchronously.
    pub fn call(&mut self, args: A) -> bool {
        match self.throttle.call(self.clock.now(), args) {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }

    /// Frame callback. Returns `true` if the pending call ran.
    pub fn on_frame(&mut self) -> bool {
        match self.throttle.on_frame(self.clock.now()) {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the host should call [`Throttled::on_frame`].
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.throttle.wants_frame()
    }

    /// Resets to the cold state, dropping any pending call.
    pub fn cancel(&mut self) {
        self.throttle.cancel();
    }

    /// Returns the underlying throttle state.
    #[must_use]
    pub fn state(&self) -> &Throttle<A> {
        &self.throttle
    }

    /// Consumes the wrapper and returns the wrapped function.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F, A: fmt::Debug, C> fmt::Debug for Throttled<F, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}
