// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use overscan_virtual_scroll::{FrameOptions, VirtualFrame};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn size(&mut self) -> f64 {
        20.0 + f64::from(self.next_u32() % 80)
    }
}

fn items(n: u32) -> Vec<u32> {
    (0..n).collect()
}

/// A frame over `n` items with every item measured once.
fn measured_frame(n: u32, seed: u64) -> VirtualFrame<u32> {
    let mut rng = Lcg::new(seed);
    let mut frame = VirtualFrame::new(FrameOptions::new(30.0, 900.0));
    frame.set_items(&items(n));
    for index in 0..n as usize {
        let _ = frame.set_item_size(index, rng.size());
    }
    frame
}

fn bench_virtual_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("overscan_virtual_frame");
    group.sample_size(50);

    for &n in &[1_000_u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("set_items_cold", n), &n, |b, &n| {
            let list = items(n);
            b.iter_batched(
                || VirtualFrame::<u32>::new(FrameOptions::new(30.0, 900.0)),
                |mut frame| {
                    black_box(frame.set_items(&list).total_size);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("set_items_reversed", n), &n, |b, &n| {
            let reversed: Vec<u32> = items(n).into_iter().rev().collect();
            b.iter_batched(
                || measured_frame(n, 0x5eed),
                |mut frame| {
                    black_box(frame.set_items(&reversed).total_size);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("set_item_size", n), &n, |b, &n| {
            let mut frame = measured_frame(n, 0x5eed);
            let mut rng = Lcg::new(7);
            b.iter(|| {
                let index = (rng.next_u32() % n) as usize;
                let size = rng.size();
                black_box(frame.set_item_size(index, size).map(|update| update.total_size))
            });
        });

        group.bench_with_input(BenchmarkId::new("set_frame_start", n), &n, |b, &n| {
            let mut frame = measured_frame(n, 0x5eed);
            let mut rng = Lcg::new(11);
            b.iter(|| {
                let start = (rng.next_u32() % n) as usize;
                black_box(frame.set_frame_start(start).frame.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_virtual_frame);
criterion_main!(benches);
