// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `VirtualFrame`.
//!
//! These cover the window invariants under arbitrary frame starts, size
//! accounting with partial measurements, and the tracked-key size cache
//! across item list replacement.

use overscan_virtual_scroll::{FrameError, FrameOptions, OVERSCAN, VirtualFrame};
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Row {
    id: &'static str,
}

fn rows(ids: &[&'static str]) -> Vec<Row> {
    ids.iter().map(|&id| Row { id }).collect()
}

#[test]
fn zero_items_scenario() {
    let mut frame = VirtualFrame::<u64>::new(FrameOptions::new(30.0, 600.0));
    let update = frame.set_items(&[]);
    assert!(update.frame.is_empty());
    assert_eq!(update.total_size, 0.0);
    assert_eq!(frame.frame_size(), 0);
}

#[test]
fn measured_size_error_scenario() {
    let mut frame = VirtualFrame::new(FrameOptions::new(30.0, 600.0));
    frame.set_items(&['a', 'b', 'c']);
    let err = frame.set_item_size(5, 10.0).unwrap_err();
    assert_eq!(err, FrameError::IndexOutOfRange { index: 5, len: 3 });
    assert_eq!(err.to_string(), "no item at index 5; the list has 3 items");
}

#[test]
fn reordered_items_keep_measured_size() {
    let mut frame =
        VirtualFrame::with_track_by(FrameOptions::new(10.0, 600.0), |row: &Row| row.id);
    frame.set_items(&rows(&["a", "b", "c"]));
    frame.set_item_size(1, 50.0).unwrap();

    let update = frame.set_items(&rows(&["c", "b", "a"]));
    assert_eq!(update.total_size, 70.0);
    assert_eq!(update.frame[2].start, 60.0);
    assert_eq!(frame.item_size(1), Some(50.0));
    assert!(!frame.is_measured(1), "restored sizes are not fresh measurements");
}

#[test]
fn moved_item_uses_cached_size_at_new_index() {
    let mut frame =
        VirtualFrame::with_track_by(FrameOptions::new(10.0, 600.0), |row: &Row| row.id);
    frame.set_items(&rows(&["a", "b", "c"]));
    frame.set_item_size(1, 50.0).unwrap();

    frame.set_items(&rows(&["x", "y", "b"]));
    assert_eq!(frame.item_size(2), Some(50.0));
    assert_eq!(frame.item_size(1), Some(10.0));
    assert_eq!(frame.total_size(), 70.0);
}

#[test]
fn tracked_sizes_outlive_removed_items() {
    let mut frame = VirtualFrame::new(FrameOptions::new(10.0, 600.0));
    frame.set_items(&[1_u32, 2, 3]);
    frame.set_item_size(0, 20.0).unwrap();

    frame.set_items(&[4, 5]);
    assert_eq!(frame.total_size(), 20.0);
    assert_eq!(frame.tracked_size_count(), 1);

    frame.set_items(&[1, 4]);
    assert_eq!(frame.total_size(), 30.0);
}

#[test]
fn default_size_change_recomputes_without_item_change() {
    let mut frame = VirtualFrame::new(FrameOptions::new(10.0, 100.0));
    let items: Vec<u32> = (0..50).collect();
    frame.set_items(&items);
    frame.set_item_size(0, 25.0).unwrap();

    let update = frame.set_default_item_size(20.0);
    assert_eq!(update.total_size, 25.0 + 49.0 * 20.0);
    assert_eq!(update.frame[1].start, 25.0);
    assert_eq!(update.frame[2].start, 45.0);
}

fn measured_frame(
    sizes: &[Option<f64>],
    default: f64,
    viewport: f64,
) -> (VirtualFrame<usize>, f64) {
    let mut frame = VirtualFrame::new(FrameOptions::new(default, viewport));
    let items: Vec<usize> = (0..sizes.len()).collect();
    frame.set_items(&items);
    let mut expected = 0.0;
    for (index, size) in sizes.iter().enumerate() {
        match size {
            Some(size) => {
                frame.set_item_size(index, *size).unwrap();
                expected += size;
            }
            None => expected += default,
        }
    }
    (frame, expected)
}

proptest! {
    #[test]
    fn window_is_contiguous_and_bounded(
        len in 0_usize..400,
        default in 1.0_f64..80.0,
        viewport in 0.0_f64..2_000.0,
        starts in prop::collection::vec(0_usize..1_000, 1..8),
    ) {
        let mut frame = VirtualFrame::new(FrameOptions::new(default, viewport));
        let items: Vec<usize> = (0..len).collect();
        frame.set_items(&items);

        for start in starts {
            frame.set_frame_start(start);
            let size = frame.frame_size();
            let first = frame.frame_start();
            prop_assert!(first <= len.saturating_sub(size));

            let window = frame.frame();
            prop_assert!(window.len() <= (size + OVERSCAN).min(len));
            if first >= OVERSCAN {
                prop_assert_eq!(window.len(), (size + OVERSCAN).min(len));
            }
            if let Some(head) = window.first() {
                prop_assert_eq!(head.index, first.saturating_sub(OVERSCAN));
            }
            for pair in window.windows(2) {
                prop_assert_eq!(pair[1].index, pair[0].index + 1);
                prop_assert!(pair[1].start >= pair[0].start);
            }
            prop_assert!(window.iter().all(|item| item.index < len));
        }
    }

    #[test]
    fn out_of_range_start_matches_clamped_start(
        len in 1_usize..300,
        start in 0_usize..10_000,
    ) {
        let mut frame = VirtualFrame::new(FrameOptions::new(20.0, 500.0));
        let items: Vec<usize> = (0..len).collect();
        frame.set_items(&items);

        let clamped = start.min(len.saturating_sub(frame.frame_size()));
        let requested = frame.set_frame_start(start).frame.to_vec();
        let direct = frame.set_frame_start(clamped).frame.to_vec();
        prop_assert_eq!(requested, direct);
    }

    #[test]
    fn total_size_sums_known_and_default_sizes(
        sizes in prop::collection::vec(prop::option::of(0.0_f64..200.0), 0..120),
        default in 0.0_f64..100.0,
    ) {
        let (frame, expected) = measured_frame(&sizes, default, 800.0);
        prop_assert!((frame.total_size() - expected).abs() < 1e-6);

        let end = sizes.len();
        prop_assert!((frame.scroll_offset(end) - expected).abs() < 1e-6);
    }

    #[test]
    fn frame_starts_match_prefix_sums(
        sizes in prop::collection::vec(prop::option::of(1.0_f64..90.0), 1..120),
        start in 0_usize..200,
    ) {
        let (mut frame, _) = measured_frame(&sizes, 25.0, 300.0);
        frame.set_frame_start(start);
        for item in frame.frame() {
            prop_assert!((item.start - frame.scroll_offset(item.index)).abs() < 1e-6);
        }
    }

    #[test]
    fn frame_covers_the_viewport(
        sizes in prop::collection::vec(1.0_f64..90.0, 1..150),
        viewport in 0.0_f64..1_500.0,
    ) {
        let measured: Vec<Option<f64>> = sizes.iter().copied().map(Some).collect();
        let (frame, total) = measured_frame(&measured, 25.0, viewport);

        // Any run of `frame_size` items fills the viewport, unless the whole
        // list is shorter than it.
        let mut sorted = sizes.clone();
        sorted.sort_by(f64::total_cmp);
        let smallest: f64 = sorted.iter().take(frame.frame_size()).sum();
        prop_assert!(
            smallest > viewport || total <= viewport + 1e-6 || frame.frame_size() == sizes.len()
        );
    }
}
