use core::hint::black_box;
use core::time::Duration;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rimeid::{DEFAULT_EPOCH, IdWorker, TimeSource};
use std::{sync::Barrier, thread::scope, time::Instant};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded). Matches the sequence capacity of one millisecond so the
// fixed-clock benchmark never blocks waiting for a tick.
const TOTAL_IDS: usize = 4096;

/// Hot path with a pinned clock: pure lock/pack overhead.
fn bench_sequential_mock(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker/sequential/mock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let worker = IdWorker::with_clock(1, 1, FixedMockTime { millis: 42 })
                    .expect("identities in range");
                for _ in 0..TOTAL_IDS {
                    black_box(worker.next_id().expect("fixed clock cannot move backwards"));
                }
            }
            start.elapsed()
        })
    });
    group.finish();
}

/// Wall-clock path, including the syscall per ID and occasional tick waits.
fn bench_sequential_system(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker/sequential/system");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let worker =
                    IdWorker::new(1, 1, DEFAULT_EPOCH).expect("identities in range");
                for _ in 0..TOTAL_IDS {
                    black_box(worker.next_id().expect("clock moved backwards"));
                }
            }
            start.elapsed()
        })
    });
    group.finish();
}

/// Contended path: every core hammering one shared worker.
fn bench_threaded_system(c: &mut Criterion) {
    let threads = num_cpus::get();
    let mut group = c.benchmark_group("worker/threaded/system");
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("threads/{threads}"), |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            for _ in 0..iters {
                let worker =
                    IdWorker::new(1, 1, DEFAULT_EPOCH).expect("identities in range");
                let barrier = Barrier::new(threads);
                let start = Instant::now();
                scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(
                                    worker.next_id().expect("clock moved backwards"),
                                );
                            }
                        });
                    }
                });
                total += start.elapsed();
            }
            total
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_mock,
    bench_sequential_system,
    bench_threaded_system
);
criterion_main!(benches);
