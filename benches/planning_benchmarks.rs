//! Benchmarks for the planning arithmetic and full scheduler walks.
//!
//! Run with: cargo bench

use criterion::{Criterion, black_box};
use framebatch::compression::compress;
use framebatch::planner::minimal_breakdown;
use framebatch::{ChunkOptions, ChunkScheduler, JobKey};

fn benchmark_minimal_breakdown(criterion: &mut Criterion) {
    criterion.bench_function("minimal breakdown (1M items, cap 24)", |bencher| {
        bencher.iter(|| minimal_breakdown(black_box(1_000_000), black_box(24)));
    });
}

fn benchmark_compression_search(criterion: &mut Criterion) {
    criterion.bench_function("compression scan (rejected first trial)", |bencher| {
        bencher.iter(|| compress(black_box(1_000_000), black_box(24), black_box(2)));
    });

    criterion.bench_function("compression scan (deep acceptance)", |bencher| {
        // A huge tolerance forces the scan down to a single batch, which is
        // the worst case for the linear search.
        bencher.iter(|| compress(black_box(100_000), black_box(24), black_box(100_000)));
    });
}

fn benchmark_scheduler_walk(criterion: &mut Criterion) {
    criterion.bench_function("full walk (10k items, cap 24)", |bencher| {
        let options = ChunkOptions::new(24);
        bencher.iter(|| {
            let scheduler = ChunkScheduler::new();
            let key = JobKey::from_raw(0);
            loop {
                let plan = scheduler.next(key, black_box(10_000), &options).unwrap();
                if plan.is_done {
                    break;
                }
            }
        });
    });

    criterion.bench_function("full walk with overlap (10k items)", |bencher| {
        let options = ChunkOptions::new(24).with_overlap(3);
        bencher.iter(|| {
            let scheduler = ChunkScheduler::new();
            let key = JobKey::from_raw(0);
            loop {
                let plan = scheduler.next(key, black_box(10_000), &options).unwrap();
                if plan.is_done {
                    break;
                }
            }
        });
    });
}

criterion::criterion_group!(
    benches,
    benchmark_minimal_breakdown,
    benchmark_compression_search,
    benchmark_scheduler_walk,
);
criterion::criterion_main!(benches);
