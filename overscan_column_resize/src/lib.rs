// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overscan Column Resize: a state machine for resizable table columns.
//!
//! A [`ColumnResize`] tracks one column's width through two interactions:
//!
//! - **Pointer drag**: `Idle → Dragging → Idle`. The width follows the
//!   pointer's horizontal offset from where the handle was pressed. Holding
//!   the pointer past the right edge of the scrollable container keeps the
//!   column growing on a timer and asks the host to scroll the container
//!   along, until the pointer comes back inside or the button is released.
//! - **Keyboard**: `Idle → Editing → Idle`. Activation remembers the width,
//!   steps change it by [`KEYBOARD_STEP`], and the edit is either committed
//!   or discarded back to the remembered width.
//!
//! Every width is clamped by [`ResizeLimits`]: at least the configured minimum
//! (or [`DEFAULT_MIN_WIDTH`]) and at most the configured maximum, if any.
//!
//! The crate does not read input or touch layout. Hosts forward pointer
//! positions, key presses, and timer wakeups, then apply the returned
//! [`ResizeEvent`]s.
//!
//! ## Keyboard example
//!
//! ```rust
//! use overscan_column_resize::{ColumnResize, ResizeEvent, ResizeLimits, ResizeStep};
//!
//! let mut column = ColumnResize::new(200.0, ResizeLimits::default());
//! column.activate();
//! assert_eq!(column.step(ResizeStep::Grow), [ResizeEvent::Resized(210.0)]);
//! assert_eq!(column.discard(), [ResizeEvent::Discarded(200.0)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Geometry comes from `kurbo`; enable
//! either the `std` (default) or `libm` feature.

#![no_std]

extern crate alloc;

mod drag;
mod resize;

pub use resize::{
    AUTO_GROW_INCREMENT, AUTO_GROW_INTERVAL, AUTO_GROW_START_DELAY, ColumnResize,
    DEFAULT_MIN_WIDTH, KEYBOARD_STEP, ResizeEvent, ResizeLimits, ResizePhase, ResizeStep,
};
