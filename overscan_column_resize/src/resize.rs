// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The column resize state machine.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use overscan_timing::{Millis, TimerQueue};

use crate::drag::PointerDrag;

/// Minimum column width used when [`ResizeLimits::min_width`] is unset.
pub const DEFAULT_MIN_WIDTH: f64 = 120.0;

/// Width change applied by one keyboard step.
pub const KEYBOARD_STEP: f64 = 10.0;

/// Delay between the pointer leaving the container and the first auto-grow tick.
pub const AUTO_GROW_START_DELAY: Millis = 10;

/// Delay between consecutive auto-grow ticks.
pub const AUTO_GROW_INTERVAL: Millis = 10;

/// Width added, and container scroll requested, by each auto-grow tick.
pub const AUTO_GROW_INCREMENT: f64 = 5.0;

/// Bounds applied to every width the state machine produces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeLimits {
    /// Smallest allowed width. [`DEFAULT_MIN_WIDTH`] when `None`.
    pub min_width: Option<f64>,
    /// Largest allowed width, usually the container or an explicit maximum.
    pub max_width: Option<f64>,
}

impl ResizeLimits {
    /// Sets the minimum width.
    #[must_use]
    pub const fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Sets the maximum width.
    #[must_use]
    pub const fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Returns the effective minimum width.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min_width.unwrap_or(DEFAULT_MIN_WIDTH)
    }

    /// Clamps `width` into `[min, max]`.
    ///
    /// The minimum wins when the maximum is smaller than it. A NaN width
    /// resolves to the minimum.
    #[must_use]
    pub fn clamp(&self, width: f64) -> f64 {
        let min = self.min();
        let width = match self.max_width {
            Some(max) => width.min(max),
            None => width,
        };
        width.max(min)
    }
}

/// What the column is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePhase {
    /// No interaction in progress.
    #[default]
    Idle,
    /// The resize handle is held by a pointer.
    Dragging,
    /// The resize handle was activated from the keyboard.
    Editing,
}

/// Direction of a keyboard step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeStep {
    /// Make the column narrower.
    Shrink,
    /// Make the column wider.
    Grow,
}

/// Output of a state transition, for the host to apply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeEvent {
    /// The column width changed during an interaction.
    Resized(f64),
    /// The interaction ended and the width is final.
    Committed(f64),
    /// The interaction was abandoned and the width was restored.
    Discarded(f64),
    /// The host should scroll the container right by this amount.
    AutoScroll(f64),
}

/// Resize state for one table column.
///
/// Hosts forward pointer and keyboard input from the column's resize handle
/// and apply the returned [`ResizeEvent`]s. While a drag is held past the
/// container's right edge the column keeps growing on a timer; hosts wake
/// up at [`ColumnResize::next_deadline`] and call [`ColumnResize::poll`].
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use overscan_column_resize::{ColumnResize, ResizeEvent, ResizeLimits};
///
/// let container = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let mut column = ColumnResize::new(200.0, ResizeLimits::default());
///
/// column.pointer_down(Point::new(200.0, 10.0));
/// let events = column.pointer_move(Point::new(260.0, 10.0), container, 0);
/// assert_eq!(events, [ResizeEvent::Resized(260.0)]);
///
/// // Dragging far left stops at the minimum width.
/// column.pointer_move(Point::new(0.0, 10.0), container, 5);
/// assert_eq!(column.width(), 120.0);
///
/// assert_eq!(column.pointer_up(), [ResizeEvent::Committed(120.0)]);
/// ```
#[derive(Clone, Debug)]
pub struct ColumnResize {
    limits: ResizeLimits,
    phase: ResizePhase,
    width: f64,
    /// Width when the current interaction started.
    initial_width: f64,
    drag: Option<PointerDrag>,
    /// Width added by auto-grow ticks during the current drag.
    auto_grown: f64,
    auto_grow: TimerQueue<()>,
}

impl ColumnResize {
    /// Creates an idle column of the given width, clamped to `limits`.
    #[must_use]
    pub fn new(width: f64, limits: ResizeLimits) -> Self {
        let width = limits.clamp(width);
        Self {
            limits,
            phase: ResizePhase::Idle,
            width,
            initial_width: width,
            drag: None,
            auto_grown: 0.0,
            auto_grow: TimerQueue::new(),
        }
    }

    /// Returns the current width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> ResizePhase {
        self.phase
    }

    /// Returns the active limits.
    #[must_use]
    pub fn limits(&self) -> ResizeLimits {
        self.limits
    }

    /// Returns `true` while an auto-grow tick is scheduled.
    #[must_use]
    pub fn is_auto_growing(&self) -> bool {
        !self.auto_grow.is_empty()
    }

    /// Returns when [`ColumnResize::poll`] next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.auto_grow.next_deadline()
    }

    /// Replaces the limits and re-clamps the width.
    pub fn set_limits(&mut self, limits: ResizeLimits) -> Vec<ResizeEvent> {
        self.limits = limits;
        self.apply_width(self.width)
    }

    /// Sets the width outside of an interaction, for example when the host
    /// restores a saved layout. Ignored while an interaction is in progress.
    pub fn set_width(&mut self, width: f64) -> Vec<ResizeEvent> {
        if self.phase != ResizePhase::Idle {
            return Vec::new();
        }
        self.apply_width(width)
    }

    /// The pointer pressed the resize handle.
    ///
    /// Starts a drag from `Idle`; ignored otherwise.
    pub fn pointer_down(&mut self, position: Point) {
        if self.phase != ResizePhase::Idle {
            return;
        }
        self.phase = ResizePhase::Dragging;
        self.initial_width = self.width;
        self.drag = Some(PointerDrag::new(position, self.width));
        self.auto_grown = 0.0;
        tracing::debug!(width = self.width, "column drag started");
    }

    /// The pointer moved while the handle may be held.
    ///
    /// `container` is the scrollable container's bounds in the same space as
    /// `position`. Moving past its right edge starts auto-grow; moving back
    /// inside stops it.
    pub fn pointer_move(
        &mut self,
        position: Point,
        container: Rect,
        now: Millis,
    ) -> Vec<ResizeEvent> {
        let Some(drag) = self.drag.as_mut() else {
            return Vec::new();
        };
        let delta = drag.move_to(position);
        tracing::trace!(dx = delta.x, "column drag moved");

        if position.x > container.x1 {
            if self.auto_grow.is_empty() {
                self.auto_grow.schedule(now.saturating_add(AUTO_GROW_START_DELAY), ());
                tracing::trace!(edge = container.x1, "auto-grow armed");
            }
        } else {
            self.auto_grow.clear();
        }

        let width = self.dragged_width();
        self.apply_width(width)
    }

    /// The pointer released the handle, keeping the dragged width.
    pub fn pointer_up(&mut self) -> Vec<ResizeEvent> {
        if self.phase != ResizePhase::Dragging {
            return Vec::new();
        }
        self.end_interaction();
        tracing::debug!(width = self.width, "column drag committed");
        Vec::from([ResizeEvent::Committed(self.width)])
    }

    /// The drag was cancelled by the platform, restoring the width it started at.
    pub fn pointer_cancel(&mut self) -> Vec<ResizeEvent> {
        if self.phase != ResizePhase::Dragging {
            return Vec::new();
        }
        self.restore()
    }

    /// Runs auto-grow ticks that are due at `now`.
    ///
    /// Each tick widens the column by [`AUTO_GROW_INCREMENT`] and asks the host
    /// to scroll the container by the width actually gained. The next tick is
    /// scheduled [`AUTO_GROW_INTERVAL`] after `now`, so a late poll never
    /// replays missed ticks.
    pub fn poll(&mut self, now: Millis) -> Vec<ResizeEvent> {
        let mut events = Vec::new();
        if self.auto_grow.pop_due(now).is_none() {
            return events;
        }
        if self.drag.is_none() {
            return events;
        }

        let before = self.width;
        self.auto_grown += AUTO_GROW_INCREMENT;
        let width = self.dragged_width();
        // Only keep the growth that survived clamping.
        self.auto_grown -= (self.dragged_width_unclamped() - width).max(0.0);
        self.width = width;
        let gained = width - before;
        if gained != 0.0 {
            tracing::trace!(width, gained, "auto-grow tick");
            events.push(ResizeEvent::Resized(width));
            events.push(ResizeEvent::AutoScroll(gained));
        }

        self.auto_grow.schedule(now.saturating_add(AUTO_GROW_INTERVAL), ());
        events
    }

    /// Activates the handle from the keyboard.
    ///
    /// Enters `Editing` from `Idle`; ignored otherwise.
    pub fn activate(&mut self) {
        if self.phase != ResizePhase::Idle {
            return;
        }
        self.phase = ResizePhase::Editing;
        self.initial_width = self.width;
        tracing::debug!(width = self.width, "column resize activated");
    }

    /// Changes the width by one [`KEYBOARD_STEP`] while editing.
    pub fn step(&mut self, step: ResizeStep) -> Vec<ResizeEvent> {
        if self.phase != ResizePhase::Editing {
            return Vec::new();
        }
        let delta = match step {
            ResizeStep::Shrink => -KEYBOARD_STEP,
            ResizeStep::Grow => KEYBOARD_STEP,
        };
        self.apply_width(self.width + delta)
    }

    /// Keeps the edited width.
    pub fn commit(&mut self) -> Vec<ResizeEvent> {
        if self.phase != ResizePhase::Editing {
            return Vec::new();
        }
        self.end_interaction();
        Vec::from([ResizeEvent::Committed(self.width)])
    }

    /// Restores the width from before the interaction.
    ///
    /// Applies to keyboard editing and pointer drags alike.
    pub fn discard(&mut self) -> Vec<ResizeEvent> {
        if self.phase == ResizePhase::Idle {
            return Vec::new();
        }
        self.restore()
    }

    fn restore(&mut self) -> Vec<ResizeEvent> {
        self.end_interaction();
        self.width = self.limits.clamp(self.initial_width);
        tracing::debug!(width = self.width, "column resize discarded");
        Vec::from([ResizeEvent::Discarded(self.width)])
    }

    fn end_interaction(&mut self) {
        self.phase = ResizePhase::Idle;
        self.drag = None;
        self.auto_grown = 0.0;
        self.auto_grow.clear();
    }

    fn dragged_width_unclamped(&self) -> f64 {
        match &self.drag {
            Some(drag) => drag.start_width() + drag.offset().x + self.auto_grown,
            None => self.width,
        }
    }

    fn dragged_width(&self) -> f64 {
        self.limits.clamp(self.dragged_width_unclamped())
    }

    fn apply_width(&mut self, width: f64) -> Vec<ResizeEvent> {
        let width = self.limits.clamp(width);
        if width == self.width {
            return Vec::new();
        }
        self.width = width;
        Vec::from([ResizeEvent::Resized(width)])
    }
}
