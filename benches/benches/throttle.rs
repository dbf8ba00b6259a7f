// Copyright 2025 the Overscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use overscan_timing::{Throttle, ThrottleOptions, TimerQueue};

fn bench_throttle(c: &mut Criterion) {
    let mut group = c.benchmark_group("overscan_timing");

    group.bench_function("throttle_burst_1k", |b| {
        b.iter(|| {
            let mut throttle = Throttle::new(25, ThrottleOptions::default());
            let mut fired = 0_u32;
            for now in 0..1_000_u64 {
                if throttle.call(now, now).is_some() {
                    fired += 1;
                }
                if throttle.wants_frame() && throttle.on_frame(now).is_some() {
                    fired += 1;
                }
            }
            black_box(fired)
        });
    });

    group.bench_function("timer_queue_schedule_pop_64", |b| {
        b.iter(|| {
            let mut timers = TimerQueue::new();
            for i in 0..64_u64 {
                timers.schedule((i * 7919) % 128, i);
            }
            let mut sum = 0_u64;
            while let Some((_, payload)) = timers.pop_due(u64::MAX) {
                sum += payload;
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_throttle);
criterion_main!(benches);
