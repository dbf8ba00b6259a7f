// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// A pointer drag anchored where the button went down.
///
/// Remembers the column width at that moment so the dragged width can always
/// be recomputed from the total offset instead of accumulating deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerDrag {
    origin: Point,
    position: Point,
    start_width: f64,
}

impl PointerDrag {
    pub(crate) fn new(origin: Point, start_width: f64) -> Self {
        Self {
            origin,
            position: origin,
            start_width,
        }
    }

    /// Moves the pointer, returning the movement since the previous position.
    pub(crate) fn move_to(&mut self, position: Point) -> Vec2 {
        let delta = position - self.position;
        self.position = position;
        delta
    }

    /// Offset of the current position from the origin.
    pub(crate) fn offset(&self) -> Vec2 {
        self.position - self.origin
    }

    pub(crate) fn start_width(&self) -> f64 {
        self.start_width
    }
}
