// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors reported by [`VirtualFrame`](crate::VirtualFrame) measurements.
///
/// Both variants indicate a caller bug: a size reported against an item list
/// that has since been replaced, or a broken measurement.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// No item exists at `index` in the current list.
    #[error("no item at index {index}; the list has {len} items")]
    IndexOutOfRange {
        /// The index that was reported.
        index: usize,
        /// Length of the current item list.
        len: usize,
    },
    /// The measured size was NaN, infinite, or negative.
    #[error("item size must be finite and non-negative, got {size}")]
    InvalidSize {
        /// The rejected size.
        size: f64,
    },
}
