// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered multiset of known item sizes.

use alloc::collections::BTreeMap;
use core::cmp::Ordering;
use core::iter;

/// `f64` ordered by `total_cmp`. Only finite, non-negative sizes are stored.
#[derive(Copy, Clone, Debug)]
struct SizeKey(f64);

impl PartialEq for SizeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SizeKey {}

impl PartialOrd for SizeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SizeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Counts of known sizes, with their running sum.
#[derive(Clone, Debug, Default)]
pub(crate) struct SizeHistogram {
    buckets: BTreeMap<SizeKey, usize>,
    count: usize,
    sum: f64,
}

impl SizeHistogram {
    pub(crate) fn insert(&mut self, size: f64) {
        *self.buckets.entry(SizeKey(size)).or_insert(0) += 1;
        self.count += 1;
        self.sum += size;
    }

    pub(crate) fn remove(&mut self, size: f64) {
        let key = SizeKey(size);
        let Some(n) = self.buckets.get_mut(&key) else {
            debug_assert!(false, "removing a size that was never inserted");
            return;
        };
        *n -= 1;
        if *n == 0 {
            self.buckets.remove(&key);
        }
        self.count -= 1;
        self.sum = if self.count == 0 { 0.0 } else { self.sum - size };
    }

    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.count = 0;
        self.sum = 0.0;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of items, cheapest first, whose sizes add up to more than
    /// `extent`. `unknown` items of `default_size` join the known sizes.
    ///
    /// Returns the total item count when everything fits.
    pub(crate) fn items_to_cover(&self, extent: f64, unknown: usize, default_size: f64) -> usize {
        let mut known = self.buckets.iter().map(|(k, n)| (k.0, *n)).peekable();
        let mut default = (unknown > 0).then_some((default_size, unknown));
        let merged = iter::from_fn(|| {
            let next_known = known.peek().map(|&(size, _)| size);
            match (next_known, default) {
                (Some(size), Some((d, _))) if size <= d => known.next(),
                (_, Some(_)) => default.take(),
                (Some(_), None) => known.next(),
                (None, None) => None,
            }
        });

        let mut covered = 0.0;
        let mut taken = 0;
        for (size, n) in merged {
            if size > 0.0 {
                let needed = items_to_exceed(extent - covered, size);
                if needed <= n {
                    return taken + needed;
                }
                covered += size * n as f64;
            }
            taken += n;
        }
        taken
    }
}

/// Smallest `k` with `k * size > remaining`, for `size > 0`.
fn items_to_exceed(remaining: f64, size: f64) -> usize {
    if remaining < 0.0 {
        return 1;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Non-negative quotient; truncation is the floor and the cast saturates"
    )]
    let whole = (remaining / size) as usize;
    whole.saturating_add(1)
}
