// Copyright 2025 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use overstack_cell::Subscribable;
use overstack_panels::{StackCoordinator, StackPolicy};

fn names(n: usize) -> Vec<u32> {
    (0..n as u32).collect()
}

fn registered(n: usize, policy: StackPolicy) -> StackCoordinator<u32, u64> {
    let mut c = StackCoordinator::with_policy(policy);
    for name in names(n) {
        c.register(name, 0).unwrap();
    }
    c
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn bench_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_close");
    for &n in &[4usize, 16, 64] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("lifo_n{}", n), |b| {
            b.iter_batched(
                || registered(n, StackPolicy::empty()),
                |mut c| {
                    for name in names(n) {
                        let _ = c.open(&name, Some(u64::from(name)));
                    }
                    for name in names(n).into_iter().rev() {
                        let _ = c.close(&name);
                    }
                    black_box(c.front());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("lifo_reflow_n{}", n), |b| {
            b.iter_batched(
                || registered(n, StackPolicy::REFLOW_ON_CLOSE),
                |mut c| {
                    for name in names(n) {
                        let _ = c.open(&name, None);
                    }
                    for name in names(n).into_iter().rev() {
                        let _ = c.close(&name);
                    }
                    black_box(c.front());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_copies(c: &mut Criterion) {
    let mut group = c.benchmark_group("copies");
    for &n in &[8usize, 32, 128] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("stack_copies_n{}", n), |b| {
            b.iter_batched(
                || registered(1, StackPolicy::empty()),
                |mut c| {
                    for i in 0..n as u64 {
                        let _ = c.open(&0, Some(i));
                    }
                    black_box(c.get(&0).map(|e| e.read().len()));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_random_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_ops");
    let n = 16usize;
    let ops = 512usize;
    group.throughput(Throughput::Elements(ops as u64));
    group.bench_function("mixed_n16_ops512", |b| {
        b.iter_batched(
            || {
                (
                    registered(n, StackPolicy::EVICT_BY_ID_ONLY),
                    Rng::new(0xCAFE_F00D_DEAD_BEEF),
                )
            },
            |(mut c, mut rng)| {
                for _ in 0..ops {
                    let r = rng.next_u64();
                    let name = (r % n as u64) as u32;
                    match (r >> 32) % 8 {
                        0..=3 => {
                            let _ = c.open(&name, None);
                        }
                        4..=6 => {
                            let _ = c.close(&name);
                        }
                        _ => {
                            black_box(c.refresh_positions());
                        }
                    }
                }
                black_box(c.close_all());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_cell_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell");
    for &listeners in &[1usize, 8, 64] {
        group.throughput(Throughput::Elements(listeners as u64));
        group.bench_function(format!("write_notify_l{}", listeners), |b| {
            let cell = Subscribable::new(0_u64);
            let _subs: Vec<_> = (0..listeners)
                .map(|_| {
                    cell.subscribe(|v| {
                        black_box(*v);
                    })
                })
                .collect();
            b.iter(|| cell.write(|v| v + 1));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_open_close,
    bench_copies,
    bench_random_ops,
    bench_cell_notify,
);
criterion_main!(benches);
