// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overscan Virtual Scroll: windowed rendering over large, variably-sized lists.
//!
//! A host that shows thousands of rows only wants to build the handful that
//! are on screen. This crate decides which ones those are, where they sit,
//! and how tall the whole list is, while item sizes are still being
//! discovered by layout.
//!
//! - [`VirtualFrame`]: the window itself. It caches measured sizes by index
//!   and by a caller-chosen *track-by* key, sizes its frame to cover the
//!   viewport, and reports the window as [`VirtualItem`]s.
//! - [`VirtualScrollModel`]: binds a frame to a [`ScrollContainer`]. It turns
//!   scroll positions into frame starts, turns index jumps into scroll
//!   positions, and throttles the high-frequency scroll and measurement
//!   signals before reporting frames to a listener.
//!
//! The crate knows nothing about widgets or the DOM. Hosts:
//!
//! - own the items and the views built for them,
//! - render the indices in each emitted frame at their `start` offsets inside
//!   a spacer of `total_size`,
//! - report each rendered item's measured size back,
//! - forward scroll events, viewport resizes, frames, and timer wakeups.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use overscan_virtual_scroll::{ScrollContainer, ScrollModelOptions, VirtualScrollModel};
//!
//! #[derive(Debug, Default)]
//! struct Pane {
//!     scroll_top: f64,
//! }
//!
//! impl ScrollContainer for Pane {
//!     fn scroll_top(&self) -> f64 {
//!         self.scroll_top
//!     }
//!     fn set_scroll_top(&mut self, scroll_top: f64) {
//!         self.scroll_top = scroll_top;
//!     }
//! }
//!
//! let rendered = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&rendered);
//! let mut model = VirtualScrollModel::new(
//!     Pane::default(),
//!     ScrollModelOptions::new(30.0, 600.0),
//!     move |update| {
//!         *sink.borrow_mut() = update.frame.iter().map(|item| item.index).collect();
//!     },
//! );
//!
//! let rows: Vec<u32> = (0..1_000).collect();
//! model.set_items(&rows);
//! assert_eq!(rendered.borrow().first(), Some(&0));
//!
//! // Jump to row 100: the frame moves now, the scroll position follows later.
//! model.scroll_to_index(100, 0);
//! assert!(rendered.borrow().contains(&100));
//! model.poll(100);
//! assert_eq!(model.container().scroll_top, 3_000.0);
//!
//! model.cleanup();
//! ```
//!
//! All sizes and offsets share one caller-chosen linear unit (typically
//! logical pixels) and are expected to be finite and non-negative.
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod container;
mod error;
mod frame;
mod histogram;
mod model;

pub use container::ScrollContainer;
pub use error::FrameError;
pub use frame::{FrameOptions, FrameUpdate, OVERSCAN, VirtualFrame, VirtualItem};
pub use model::{
    CleanupCallback, FrameListener, SCROLL_THROTTLE_MS, SCROLL_TO_INDEX_DELAY_MS,
    SIZES_THROTTLE_MS, ScrollModelOptions, VirtualScrollModel,
};
pub use overscan_timing::Millis;
