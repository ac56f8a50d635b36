//! Criterion benchmarks for the core heap operations.
//!
//! ```bash
//! cargo bench --bench heap_bench
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fibqueue::FibonacciHeap;

const N: usize = 10_000;

fn min_heap() -> FibonacciHeap<usize, i64, fn(&i64, &i64) -> bool> {
    FibonacciHeap::new(|a, b| a < b, i64::MIN)
}

fn bench_push(c: &mut Criterion) {
    c.bench_function("push_10k", |b| {
        b.iter(|| {
            let mut heap = min_heap();
            for i in 0..N {
                heap.push(black_box(i), (i as i64 * 31) % 4099).unwrap();
            }
            heap
        })
    });
}

fn bench_push_then_drain(c: &mut Criterion) {
    c.bench_function("push_drain_10k", |b| {
        b.iter(|| {
            let mut heap = min_heap();
            for i in 0..N {
                heap.push(i, (i as i64 * 31) % 4099).unwrap();
            }
            while let Ok(v) = heap.pop() {
                black_box(v);
            }
        })
    });
}

fn bench_increase_priority(c: &mut Criterion) {
    c.bench_function("increase_priority_10k", |b| {
        b.iter(|| {
            let mut heap = min_heap();
            for i in 0..N {
                heap.push(i, 100_000 + i as i64).unwrap();
            }
            // One pop builds real trees so increases exercise cuts.
            heap.pop().unwrap();
            for i in 1..N {
                heap.increase_priority(&i, i as i64 - 100_000).unwrap();
            }
            heap
        })
    });
}

fn bench_meld(c: &mut Criterion) {
    c.bench_function("meld_2x5k", |b| {
        b.iter(|| {
            let mut a = min_heap();
            let mut z = min_heap();
            for i in 0..N / 2 {
                a.push(i, i as i64).unwrap();
                z.push(i + N / 2, (i + N / 2) as i64).unwrap();
            }
            a.meld(&mut z).unwrap();
            a
        })
    });
}

criterion_group!(
    benches,
    bench_push,
    bench_push_then_drain,
    bench_increase_priority,
    bench_meld
);
criterion_main!(benches);
