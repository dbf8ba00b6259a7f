// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding between a [`VirtualFrame`] and a real scroll container.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt;
use core::hash::Hash;

use overscan_timing::{Millis, Throttle, ThrottleOptions, TimerQueue};

use crate::container::ScrollContainer;
use crate::error::FrameError;
use crate::frame::{FrameOptions, FrameUpdate, VirtualFrame};

/// Default spacing between handled scroll events.
pub const SCROLL_THROTTLE_MS: Millis = 10;

/// Default spacing between emissions caused by size changes.
pub const SIZES_THROTTLE_MS: Millis = 25;

/// Default delay between the logical and physical halves of
/// [`VirtualScrollModel::scroll_to_index`].
pub const SCROLL_TO_INDEX_DELAY_MS: Millis = 100;

/// Callback receiving every emitted frame.
pub type FrameListener = Box<dyn FnMut(FrameUpdate<'_>)>;

/// Teardown callback registered with [`VirtualScrollModel::on_cleanup`].
pub type CleanupCallback = Box<dyn FnOnce() -> Result<(), Box<dyn Error>>>;

/// Construction parameters for [`VirtualScrollModel`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollModelOptions {
    /// Parameters for the underlying frame.
    pub frame: FrameOptions,
    /// Minimum spacing between handled scroll events.
    pub scroll_throttle: Millis,
    /// Minimum spacing between emissions caused by measurements or viewport
    /// changes.
    pub sizes_throttle: Millis,
    /// Delay before `scroll_to_index` assigns the container's scroll position.
    pub scroll_to_index_delay: Millis,
}

impl ScrollModelOptions {
    /// Creates options with the default timings.
    #[must_use]
    pub const fn new(default_item_size: f64, viewport_extent: f64) -> Self {
        Self {
            frame: FrameOptions::new(default_item_size, viewport_extent),
            scroll_throttle: SCROLL_THROTTLE_MS,
            sizes_throttle: SIZES_THROTTLE_MS,
            scroll_to_index_delay: SCROLL_TO_INDEX_DELAY_MS,
        }
    }

    /// Returns these options with a different scroll throttle.
    #[must_use]
    pub const fn with_scroll_throttle(mut self, delay: Millis) -> Self {
        self.scroll_throttle = delay;
        self
    }

    /// Returns these options with a different size-change throttle.
    #[must_use]
    pub const fn with_sizes_throttle(mut self, delay: Millis) -> Self {
        self.sizes_throttle = delay;
        self
    }

    /// Returns these options with a different deferred-scroll delay.
    #[must_use]
    pub const fn with_scroll_to_index_delay(mut self, delay: Millis) -> Self {
        self.scroll_to_index_delay = delay;
        self
    }
}

/// Drives a [`VirtualFrame`] from a scroll container and reports frames to a
/// listener.
///
/// The host forwards its events:
///
/// - scroll events to [`handle_scroll`](Self::handle_scroll),
/// - viewport resizes to [`set_viewport_extent`](Self::set_viewport_extent),
/// - measured item sizes to [`set_item_size`](Self::set_item_size),
/// - animation frames and timer wakeups to [`poll`](Self::poll), whenever
///   [`wants_frame`](Self::wants_frame) is `true` or
///   [`next_deadline`](Self::next_deadline) has passed.
///
/// Item and default-size changes emit synchronously. Measurements and resizes
/// emit through a throttle so a burst of measurements after layout produces a
/// handful of frames rather than one per item.
///
/// Call [`cleanup`](Self::cleanup) when the view goes away. It runs every
/// registered teardown callback and detaches the model; afterwards no event or
/// poll reaches the listener. Dropping the model cleans up as well.
pub struct VirtualScrollModel<T, K, C> {
    frame: VirtualFrame<T, K>,
    container: C,
    on_frame_change: FrameListener,
    scroll_throttle: Throttle<()>,
    sizes_throttle: Throttle<()>,
    scroll_to_index_delay: Millis,
    deferred_scrolls: TimerQueue<usize>,
    last_scroll_top: Option<f64>,
    teardown: Vec<CleanupCallback>,
    attached: bool,
}

impl<T, C> VirtualScrollModel<T, T, C>
where
    T: Clone + Hash + Eq + 'static,
    C: ScrollContainer,
{
    /// Creates a model that tracks items by value.
    pub fn new(
        container: C,
        options: ScrollModelOptions,
        on_frame_change: impl FnMut(FrameUpdate<'_>) + 'static,
    ) -> Self {
        let frame = VirtualFrame::new(options.frame);
        Self::from_frame(frame, container, options, on_frame_change)
    }
}

impl<T, K, C> VirtualScrollModel<T, K, C>
where
    K: Hash + Eq + Clone,
    C: ScrollContainer,
{
    /// Creates a model whose frame identifies items by `track_by`.
    pub fn with_track_by(
        container: C,
        options: ScrollModelOptions,
        track_by: impl Fn(&T) -> K + 'static,
        on_frame_change: impl FnMut(FrameUpdate<'_>) + 'static,
    ) -> Self {
        let frame = VirtualFrame::with_track_by(options.frame, track_by);
        Self::from_frame(frame, container, options, on_frame_change)
    }

    fn from_frame(
        frame: VirtualFrame<T, K>,
        container: C,
        options: ScrollModelOptions,
        on_frame_change: impl FnMut(FrameUpdate<'_>) + 'static,
    ) -> Self {
        Self {
            frame,
            container,
            on_frame_change: Box::new(on_frame_change),
            scroll_throttle: Throttle::new(options.scroll_throttle, ThrottleOptions::default()),
            sizes_throttle: Throttle::new(options.sizes_throttle, ThrottleOptions::default()),
            scroll_to_index_delay: options.scroll_to_index_delay,
            deferred_scrolls: TimerQueue::new(),
            last_scroll_top: None,
            teardown: Vec::new(),
            attached: true,
        }
    }

    /// Replaces the item list and emits the new frame.
    pub fn set_items(&mut self, items: &[T]) {
        self.frame.set_items(items);
        self.emit();
    }

    /// Changes the size assumed for unmeasured items and emits the new frame.
    pub fn set_default_item_size(&mut self, size: f64) {
        self.frame.set_default_item_size(size);
        self.emit();
    }

    /// Records a measured item size.
    ///
    /// The frame updates immediately; the emission is throttled.
    ///
    /// # Errors
    ///
    /// Forwards [`FrameError`] from [`VirtualFrame::set_item_size`].
    pub fn set_item_size(
        &mut self,
        index: usize,
        size: f64,
        now: Millis,
    ) -> Result<(), FrameError> {
        self.frame.set_item_size(index, size)?;
        self.sizes_changed(now);
        Ok(())
    }

    /// Reports a new viewport extent (a window resize).
    pub fn set_viewport_extent(&mut self, extent: f64, now: Millis) {
        self.frame.set_viewport_extent(extent);
        self.sizes_changed(now);
    }

    /// Jumps to `index`.
    ///
    /// The frame moves and emits right away. The container's scroll position
    /// is assigned after the configured delay, once the newly rendered items
    /// have had a chance to be measured, from whatever sizes are known then.
    pub fn scroll_to_index(&mut self, index: usize, now: Millis) {
        if !self.attached {
            return;
        }
        let index = index.min(self.frame.len());
        self.frame.set_frame_start(index);
        self.emit();
        let deadline = now.saturating_add(self.scroll_to_index_delay);
        self.deferred_scrolls.schedule(deadline, index);
        tracing::debug!(index, deadline, "scroll to index");
    }

    /// Handles a scroll event from the container.
    pub fn handle_scroll(&mut self, now: Millis) {
        if !self.attached {
            return;
        }
        if self.scroll_throttle.call(now, ()).is_some() {
            self.apply_scroll();
        }
    }

    /// Runs frame callbacks and timers that are due at `now`.
    pub fn poll(&mut self, now: Millis) {
        if !self.attached {
            return;
        }
        if self.scroll_throttle.on_frame(now).is_some() {
            self.apply_scroll();
        }
        if self.sizes_throttle.on_frame(now).is_some() {
            self.emit();
        }
        while let Some((_, index)) = self.deferred_scrolls.pop_due(now) {
            let offset = self.frame.scroll_offset(index);
            tracing::trace!(index, offset, "deferred scroll assignment");
            self.container.set_scroll_top(offset);
        }
    }

    /// Returns `true` if a throttled operation is waiting for a frame.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.scroll_throttle.wants_frame() || self.sizes_throttle.wants_frame()
    }

    /// Returns when the next deferred scroll assignment is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.deferred_scrolls.next_deadline()
    }

    /// Registers a callback to run on [`cleanup`](Self::cleanup).
    ///
    /// Hosts use this to remove the event listeners that feed the model.
    /// Registering after cleanup runs the callback immediately.
    pub fn on_cleanup(
        &mut self,
        callback: impl FnOnce() -> Result<(), Box<dyn Error>> + 'static,
    ) {
        if self.attached {
            self.teardown.push(Box::new(callback));
        } else {
            run_teardown(Box::new(callback));
        }
    }

    /// Detaches the model and runs every teardown callback.
    ///
    /// A failing callback is logged and does not stop the others. Calling this
    /// more than once is harmless.
    pub fn cleanup(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.scroll_throttle.cancel();
        self.sizes_throttle.cancel();
        self.deferred_scrolls.clear();
        for callback in self.teardown.drain(..) {
            run_teardown(callback);
        }
        tracing::debug!("virtual scroll model cleaned up");
    }

    /// Returns `true` until [`cleanup`](Self::cleanup) runs.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns the underlying frame.
    #[must_use]
    pub fn frame(&self) -> &VirtualFrame<T, K> {
        &self.frame
    }

    /// Returns the scroll container.
    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Returns the scroll container mutably.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    fn sizes_changed(&mut self, now: Millis) {
        if self.attached && self.sizes_throttle.call(now, ()).is_some() {
            self.emit();
        }
    }

    fn apply_scroll(&mut self) {
        if !self.frame.is_ready() {
            tracing::trace!("scroll ignored while the frame is being measured");
            return;
        }
        let scroll_top = self.container.scroll_top();
        if self.last_scroll_top == Some(scroll_top) {
            return;
        }
        self.last_scroll_top = Some(scroll_top);

        let start = estimate_index(scroll_top, self.frame.average_item_size());
        let before = self.frame.frame_start();
        self.frame.set_frame_start(start);
        if self.frame.frame_start() != before {
            tracing::trace!(scroll_top, frame_start = self.frame.frame_start(), "scrolled");
            self.emit();
        }
    }

    fn emit(&mut self) {
        if self.attached {
            (self.on_frame_change)(self.frame.update());
        }
    }
}

impl<T, K, C> Drop for VirtualScrollModel<T, K, C> {
    fn drop(&mut self) {
        if self.attached {
            self.attached = false;
            for callback in self.teardown.drain(..) {
                run_teardown(callback);
            }
        }
    }
}

impl<T, K, C: fmt::Debug> fmt::Debug for VirtualScrollModel<T, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualScrollModel")
            .field("frame", &self.frame)
            .field("container", &self.container)
            .field("last_scroll_top", &self.last_scroll_top)
            .field("deferred_scrolls", &self.deferred_scrolls)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

fn run_teardown(callback: CleanupCallback) {
    if let Err(error) = callback() {
        tracing::warn!(error = %error, "cleanup callback failed");
    }
}

/// Rounds `scroll_top / average` to the nearest index.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Positive estimate; the cast saturates and the frame clamps it"
)]
fn estimate_index(scroll_top: f64, average: f64) -> usize {
    if !(scroll_top > 0.0 && average > 0.0) {
        return 0;
    }
    (scroll_top / average + 0.5) as usize
}
