// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render window over a list of variably-sized items.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::error::FrameError;
use crate::histogram::SizeHistogram;

/// Number of indices rendered before the frame start.
///
/// The buffer hides blank rows while a fast scroll outruns measurement.
pub const OVERSCAN: usize = 5;

/// One rendered slot: an item index and its offset from the start of the list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VirtualItem {
    /// Index into the current item list.
    pub index: usize,
    /// Sum of the sizes of all items before `index`.
    pub start: f64,
}

/// The render window together with the extent of the whole list.
///
/// `total_size` is in size units (for example pixels), not an item count.
/// Hosts size their spacer element to it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameUpdate<'a> {
    /// Items to render, in ascending index order.
    pub frame: &'a [VirtualItem],
    /// Cumulative size of every item in the list.
    pub total_size: f64,
}

/// Construction parameters for [`VirtualFrame`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameOptions {
    /// Size used for any item that has not been measured.
    pub default_item_size: f64,
    /// Extent of the visible area the frame must be able to fill.
    pub viewport_extent: f64,
}

impl FrameOptions {
    /// Creates options from a default item size and a viewport extent.
    #[must_use]
    pub const fn new(default_item_size: f64, viewport_extent: f64) -> Self {
        Self {
            default_item_size,
            viewport_extent,
        }
    }
}

type TrackBy<T, K> = Box<dyn Fn(&T) -> K>;

/// Window over a list of items with cached per-item sizes.
///
/// The frame decides which contiguous run of indices should be rendered and
/// where each of them starts. Measured sizes are cached twice: by index for
/// the current list, and by *tracked key* across lists, so an item that comes
/// back after [`VirtualFrame::set_items`] keeps its measured size even at a
/// different index.
///
/// ## Frame size
///
/// The number of indices in the frame is not chosen by the caller. It is the
/// number of items, taken smallest first, needed to exceed the viewport
/// extent, so the frame can fill the viewport under the densest possible
/// arrangement. The frame size is recomputed when:
///
/// - the item list is replaced,
/// - the default item size changes,
/// - the viewport extent changes,
/// - an item size is measured.
///
/// It never shrinks on recomputation; it only drops to zero when the list
/// becomes empty.
///
/// ## Window
///
/// The rendered window is `frame_start - OVERSCAN .. frame_start + frame_size`,
/// clipped to the list. `frame_start` itself is kept in
/// `0..=len.saturating_sub(frame_size)`.
///
/// ```rust
/// use overscan_virtual_scroll::{FrameOptions, VirtualFrame};
///
/// let mut frame = VirtualFrame::new(FrameOptions::new(30.0, 100.0));
/// let items: Vec<u32> = (0..1_000).collect();
///
/// let update = frame.set_items(&items);
/// assert_eq!(update.total_size, 30_000.0);
/// assert_eq!(update.frame.len(), 4);
///
/// frame.set_item_size(1, 60.0).unwrap();
/// assert_eq!(frame.total_size(), 30_030.0);
/// assert_eq!(frame.scroll_offset(2), 90.0);
/// ```
pub struct VirtualFrame<T, K = T> {
    track_by: TrackBy<T, K>,
    keys: Vec<K>,
    default_item_size: f64,
    viewport_extent: f64,
    frame_start: usize,
    frame_size: usize,
    sizes_by_index: Vec<Option<f64>>,
    sizes_by_key: HashMap<K, f64>,
    measured: HashSet<usize>,
    known: SizeHistogram,
    virtual_items: Vec<VirtualItem>,
}

impl<T: Clone + Hash + Eq + 'static> VirtualFrame<T> {
    /// Creates an empty frame that tracks items by value.
    #[must_use]
    pub fn new(options: FrameOptions) -> Self {
        Self::with_track_by(options, T::clone)
    }
}

impl<T, K: Hash + Eq + Clone> VirtualFrame<T, K> {
    /// Creates an empty frame that identifies items by `track_by`.
    ///
    /// Items with equal keys share a cached size.
    pub fn with_track_by(options: FrameOptions, track_by: impl Fn(&T) -> K + 'static) -> Self {
        Self {
            track_by: Box::new(track_by),
            keys: Vec::new(),
            default_item_size: sanitize_extent(options.default_item_size).unwrap_or(0.0),
            viewport_extent: sanitize_extent(options.viewport_extent).unwrap_or(0.0),
            frame_start: 0,
            frame_size: 0,
            sizes_by_index: Vec::new(),
            sizes_by_key: HashMap::new(),
            measured: HashSet::new(),
            known: SizeHistogram::default(),
            virtual_items: Vec::new(),
        }
    }

    /// Replaces the item list.
    ///
    /// Sizes are restored from the tracked-key cache; items never seen before
    /// use the default size until measured. No index counts as measured for
    /// readiness until [`VirtualFrame::set_item_size`] reports it again.
    pub fn set_items(&mut self, items: &[T]) -> FrameUpdate<'_> {
        self.keys.clear();
        self.keys.extend(items.iter().map(&self.track_by));

        self.known.clear();
        self.sizes_by_index.clear();
        for key in &self.keys {
            let size = self.sizes_by_key.get(key).copied();
            if let Some(size) = size {
                self.known.insert(size);
            }
            self.sizes_by_index.push(size);
        }
        self.measured.clear();

        self.update_frame();
        self.update()
    }

    /// Sets the size assumed for unmeasured items.
    ///
    /// NaN, infinite, and negative sizes are ignored.
    pub fn set_default_item_size(&mut self, size: f64) -> FrameUpdate<'_> {
        match sanitize_extent(size) {
            Some(size) => {
                self.default_item_size = size;
                self.update_frame();
            }
            None => tracing::warn!(size, "ignoring invalid default item size"),
        }
        self.update()
    }

    /// Sets the extent of the visible area the frame must fill.
    ///
    /// NaN, infinite, and negative extents are ignored.
    pub fn set_viewport_extent(&mut self, extent: f64) -> FrameUpdate<'_> {
        match sanitize_extent(extent) {
            Some(extent) => {
                self.viewport_extent = extent;
                self.update_frame();
            }
            None => tracing::warn!(extent, "ignoring invalid viewport extent"),
        }
        self.update()
    }

    /// Moves the frame to begin at `start`, clamped into range.
    pub fn set_frame_start(&mut self, start: usize) -> FrameUpdate<'_> {
        self.frame_start = self.clamp_start(start);
        self.rebuild_window();
        self.update()
    }

    /// Records the measured size of the item currently at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::IndexOutOfRange`] if the current list has no item
    /// at `index`, typically because the index belongs to a list that has since
    /// been replaced, and [`FrameError::InvalidSize`] for NaN, infinite, or
    /// negative sizes.
    pub fn set_item_size(
        &mut self,
        index: usize,
        size: f64,
    ) -> Result<FrameUpdate<'_>, FrameError> {
        let len = self.keys.len();
        let Some(key) = self.keys.get(index) else {
            tracing::warn!(index, len, "size reported for an index outside the list");
            return Err(FrameError::IndexOutOfRange { index, len });
        };
        if sanitize_extent(size).is_none() {
            return Err(FrameError::InvalidSize { size });
        }

        if let Some(previous) = self.sizes_by_index[index].replace(size) {
            self.known.remove(previous);
        }
        self.known.insert(size);
        self.sizes_by_key.insert(key.clone(), size);
        self.measured.insert(index);

        self.update_frame();
        Ok(self.update())
    }

    /// Returns the current window and total size.
    #[must_use]
    pub fn update(&self) -> FrameUpdate<'_> {
        FrameUpdate {
            frame: &self.virtual_items,
            total_size: self.total_size(),
        }
    }

    /// Returns the current window.
    #[must_use]
    pub fn frame(&self) -> &[VirtualItem] {
        &self.virtual_items
    }

    /// Returns the cumulative size of every item.
    #[must_use]
    pub fn total_size(&self) -> f64 {
        let unknown = self.keys.len() - self.known.count();
        self.known.sum() + unknown as f64 * self.default_item_size
    }

    /// Returns the offset at which the item at `index` starts.
    ///
    /// Indices past the end give the total size. This walks every item before
    /// `index`; it is meant for explicit jumps, not per-frame work.
    #[must_use]
    pub fn scroll_offset(&self, index: usize) -> f64 {
        let end = index.min(self.keys.len());
        (0..end).map(|i| self.size_at(i)).sum()
    }

    /// Returns the mean of all known sizes, or the default size when nothing
    /// is known yet.
    #[must_use]
    pub fn average_item_size(&self) -> f64 {
        match self.known.count() {
            0 => self.default_item_size,
            n => self.known.sum() / n as f64,
        }
    }

    /// Returns `true` once every index in the window has been measured for
    /// the current list.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.virtual_items
            .iter()
            .all(|item| self.measured.contains(&item.index))
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the first index of the frame, before overscan.
    #[must_use]
    pub fn frame_start(&self) -> usize {
        self.frame_start
    }

    /// Returns the number of indices the frame covers, before overscan.
    #[must_use]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Returns the size assumed for unmeasured items.
    #[must_use]
    pub fn default_item_size(&self) -> f64 {
        self.default_item_size
    }

    /// Returns the viewport extent used for frame sizing.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Returns the size used for the item at `index`, if it exists.
    #[must_use]
    pub fn item_size(&self, index: usize) -> Option<f64> {
        (index < self.keys.len()).then(|| self.size_at(index))
    }

    /// Returns `true` if `index` was measured since the list was last set.
    #[must_use]
    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.contains(&index)
    }

    /// Returns the number of tracked keys with a remembered size.
    ///
    /// The tracked-key cache is never pruned; it lives as long as the frame.
    #[must_use]
    pub fn tracked_size_count(&self) -> usize {
        self.sizes_by_key.len()
    }

    fn size_at(&self, index: usize) -> f64 {
        self.sizes_by_index[index].unwrap_or(self.default_item_size)
    }

    fn clamp_start(&self, start: usize) -> usize {
        start.min(self.keys.len().saturating_sub(self.frame_size))
    }

    fn update_frame(&mut self) {
        let len = self.keys.len();
        if len == 0 {
            self.frame_size = 0;
        } else {
            let unknown = len - self.known.count();
            let needed = self.known.items_to_cover(
                self.viewport_extent,
                unknown,
                self.default_item_size,
            );
            self.frame_size = self.frame_size.max(needed);
        }
        self.frame_start = self.clamp_start(self.frame_start);
        self.rebuild_window();
        tracing::trace!(
            len,
            frame_start = self.frame_start,
            frame_size = self.frame_size,
            "frame updated"
        );
    }

    fn rebuild_window(&mut self) {
        let first = self.frame_start.saturating_sub(OVERSCAN);
        let end = (self.frame_start + self.frame_size).min(self.keys.len());
        let mut start = self.scroll_offset(first);
        self.virtual_items.clear();
        for index in first..end {
            self.virtual_items.push(VirtualItem { index, start });
            start += self.size_at(index);
        }
    }
}

impl<T, K> fmt::Debug for VirtualFrame<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualFrame")
            .field("len", &self.keys.len())
            .field("default_item_size", &self.default_item_size)
            .field("viewport_extent", &self.viewport_extent)
            .field("frame_start", &self.frame_start)
            .field("frame_size", &self.frame_size)
            .field("measured", &self.measured.len())
            .field("virtual_items", &self.virtual_items)
            .finish_non_exhaustive()
    }
}

fn sanitize_extent(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{FrameError, FrameOptions, OVERSCAN, VirtualFrame, VirtualItem};

    fn frame_with(len: u32, default: f64, viewport: f64) -> VirtualFrame<u32> {
        let mut frame = VirtualFrame::new(FrameOptions::new(default, viewport));
        let items: Vec<u32> = (0..len).collect();
        frame.set_items(&items);
        frame
    }

    fn indices(frame: &VirtualFrame<u32>) -> Vec<usize> {
        frame.frame().iter().map(|item| item.index).collect()
    }

    #[test]
    fn empty_list_has_empty_frame() {
        let mut frame = VirtualFrame::<u32>::new(FrameOptions::new(30.0, 100.0));
        let update = frame.set_items(&[]);
        assert!(update.frame.is_empty());
        assert_eq!(update.total_size, 0.0);
        assert_eq!(frame.frame_size(), 0);
        assert!(frame.is_ready());
        assert_eq!(frame.set_frame_start(10).frame.len(), 0);
    }

    #[test]
    fn frame_size_covers_viewport_at_default_size() {
        let frame = frame_with(1_000, 30.0, 100.0);
        assert_eq!(frame.frame_size(), 4);
        assert_eq!(indices(&frame), [0, 1, 2, 3]);
        assert_eq!(frame.frame()[3], VirtualItem { index: 3, start: 90.0 });
    }

    #[test]
    fn window_includes_overscan_before_start() {
        let mut frame = frame_with(1_000, 30.0, 100.0);
        frame.set_frame_start(20);
        assert_eq!(indices(&frame), (20 - OVERSCAN..24).collect::<Vec<_>>());
        assert_eq!(frame.frame()[0].start, 450.0);

        frame.set_frame_start(2);
        assert_eq!(indices(&frame), [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn frame_start_clamps_to_last_full_frame() {
        let mut frame = frame_with(10, 30.0, 100.0);
        frame.set_frame_start(usize::MAX);
        assert_eq!(frame.frame_start(), 6);
        assert_eq!(indices(&frame), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn frame_size_never_shrinks_until_list_empties() {
        let mut frame = frame_with(100, 10.0, 100.0);
        assert_eq!(frame.frame_size(), 11);

        frame.set_default_item_size(50.0);
        assert_eq!(frame.frame_size(), 11);

        frame.set_default_item_size(5.0);
        assert_eq!(frame.frame_size(), 21);

        frame.set_items(&[]);
        assert_eq!(frame.frame_size(), 0);
        frame.set_items(&[1, 2, 3]);
        assert_eq!(frame.frame_size(), 3);
    }

    #[test]
    fn viewport_growth_grows_the_frame() {
        let mut frame = frame_with(100, 10.0, 100.0);
        frame.set_viewport_extent(300.0);
        assert_eq!(frame.frame_size(), 31);
        frame.set_viewport_extent(f64::NAN);
        assert_eq!(frame.viewport_extent(), 300.0);
    }

    #[test]
    fn measured_size_moves_later_offsets() {
        let mut frame = frame_with(10, 10.0, 25.0);
        let update = frame.set_item_size(0, 40.0).unwrap();
        assert_eq!(update.total_size, 130.0);
        assert_eq!(frame.scroll_offset(1), 40.0);
        assert_eq!(frame.frame()[1].start, 40.0);
        assert_eq!(frame.item_size(0), Some(40.0));
        assert_eq!(frame.item_size(10), None);
    }

    #[test]
    fn remeasuring_replaces_the_old_size() {
        let mut frame = frame_with(3, 10.0, 100.0);
        frame.set_item_size(1, 40.0).unwrap();
        frame.set_item_size(1, 20.0).unwrap();
        assert_eq!(frame.total_size(), 40.0);
        assert_eq!(frame.average_item_size(), 20.0);
    }

    #[test]
    fn stale_index_is_rejected() {
        let mut frame = frame_with(3, 10.0, 100.0);
        assert_eq!(
            frame.set_item_size(5, 10.0),
            Err(FrameError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(frame.total_size(), 30.0);
    }

    #[test]
    fn invalid_size_is_rejected() {
        let mut frame = frame_with(3, 10.0, 100.0);
        assert!(matches!(
            frame.set_item_size(0, -1.0),
            Err(FrameError::InvalidSize { .. })
        ));
        assert!(frame.set_item_size(0, f64::INFINITY).is_err());
        assert!(!frame.is_measured(0));
    }

    #[test]
    fn average_falls_back_to_default() {
        let mut frame = frame_with(4, 12.0, 100.0);
        assert_eq!(frame.average_item_size(), 12.0);
        frame.set_item_size(0, 10.0).unwrap();
        frame.set_item_size(1, 30.0).unwrap();
        assert_eq!(frame.average_item_size(), 20.0);
    }

    #[test]
    fn ready_once_window_is_measured() {
        let mut frame = frame_with(10, 10.0, 25.0);
        assert_eq!(indices(&frame), [0, 1, 2]);
        assert!(!frame.is_ready());
        for index in 0..3 {
            frame.set_item_size(index, 10.0).unwrap();
        }
        assert!(frame.is_ready());

        frame.set_frame_start(6);
        assert!(!frame.is_ready(), "window now includes unmeasured rows");
    }

    #[test]
    fn relist_restores_sizes_but_not_readiness() {
        let mut frame = frame_with(3, 10.0, 100.0);
        for index in 0..3 {
            frame.set_item_size(index, 10.0).unwrap();
        }
        assert!(frame.is_ready());

        frame.set_items(&[0, 1, 2]);
        assert!(!frame.is_ready());
        assert_eq!(frame.average_item_size(), 10.0);
        assert_eq!(frame.tracked_size_count(), 3);
    }

    #[test]
    fn offset_past_end_is_total_size() {
        let frame = frame_with(5, 10.0, 100.0);
        assert_eq!(frame.scroll_offset(500), 50.0);
    }
}
