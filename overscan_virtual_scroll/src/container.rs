// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use core::cell::RefCell;

/// The scrollable element a [`VirtualScrollModel`](crate::VirtualScrollModel)
/// reads and writes.
///
/// The model never restructures the container; it only reads and assigns the
/// scroll position along the virtualized axis.
pub trait ScrollContainer {
    /// Returns the current scroll position.
    fn scroll_top(&self) -> f64;

    /// Assigns the scroll position.
    fn set_scroll_top(&mut self, scroll_top: f64);
}

impl<C: ScrollContainer + ?Sized> ScrollContainer for &mut C {
    fn scroll_top(&self) -> f64 {
        (**self).scroll_top()
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        (**self).set_scroll_top(scroll_top);
    }
}

/// Shared handle, for hosts that keep ownership of the container.
///
/// # Panics
///
/// Panics if the container is already mutably borrowed when the model
/// touches it.
impl<C: ScrollContainer + ?Sized> ScrollContainer for Rc<RefCell<C>> {
    fn scroll_top(&self) -> f64 {
        self.borrow().scroll_top()
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        self.borrow_mut().set_scroll_top(scroll_top);
    }
}
