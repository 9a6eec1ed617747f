//! Property-based tests for the planning arithmetic and the cursor walk.

use proptest::prelude::*;

use framebatch::compression::compress;
use framebatch::planner::minimal_breakdown;
use framebatch::{ChunkOptions, ChunkScheduler, JobKey};

proptest! {
    /// Property: the minimal breakdown is exactly the ceiling division, and
    /// its batches cover the remainder with no wholly-redundant batch.
    #[test]
    fn minimal_breakdown_is_ceil_correct(
        remaining in 1u64..1_000_000,
        max_cap in 1u64..10_000,
    ) {
        let breakdown = minimal_breakdown(remaining, max_cap);

        prop_assert_eq!(breakdown.batch_count, remaining.div_ceil(max_cap));
        prop_assert!(breakdown.cap <= max_cap);
        prop_assert!(breakdown.batch_count * breakdown.cap >= remaining);
        prop_assert!((breakdown.batch_count - 1) * breakdown.cap < remaining);
    }

    /// Property: compression never increases the batch count, never shrinks
    /// it below one, and never overflows the cap by more than the tolerance.
    #[test]
    fn compression_respects_the_tolerance(
        remaining in 1u64..1_000_000,
        max_cap in 1u64..10_000,
        overflow_limit in 0u64..5_000,
    ) {
        let minimal = minimal_breakdown(remaining, max_cap);
        let compressed = compress(remaining, max_cap, overflow_limit);

        prop_assert!(compressed.batch_count >= 1);
        prop_assert!(compressed.batch_count <= minimal.batch_count);
        prop_assert!(compressed.cap <= max_cap + overflow_limit);
        prop_assert!(compressed.batch_count * compressed.cap >= remaining);
    }

    /// Property: overflow is monotonic in decreasing batch count, so every
    /// count between the accepted one and the minimal one would also have
    /// been acceptable. This is the invariant that lets the search stop at
    /// its first rejection.
    #[test]
    fn accepted_compression_implies_all_larger_counts_fit(
        remaining in 1u64..100_000,
        max_cap in 1u64..1_000,
        overflow_limit in 1u64..500,
    ) {
        let minimal = minimal_breakdown(remaining, max_cap);
        let compressed = compress(remaining, max_cap, overflow_limit);

        for count in compressed.batch_count..=minimal.batch_count {
            let needed_cap = remaining.div_ceil(count);
            prop_assert!(
                needed_cap.saturating_sub(max_cap) <= overflow_limit,
                "count {} between accepted {} and minimal {} overflows",
                count,
                compressed.batch_count,
                minimal.batch_count,
            );
        }
    }

    /// Property: a full walk consumes every item exactly once when no
    /// overlap is configured, whatever the cap and tolerance.
    #[test]
    fn walk_conserves_the_item_count(
        total in 1u64..50_000,
        max_cap in 1u64..2_000,
        overflow_limit in 0u64..200,
    ) {
        let scheduler = ChunkScheduler::new();
        let options = ChunkOptions::new(max_cap).with_overflow_limit(overflow_limit);
        let job = JobKey::from_raw(0);

        let mut consumed = 0u64;
        loop {
            let plan = scheduler.next(job, total, &options).unwrap();
            if plan.is_done {
                break;
            }
            prop_assert_eq!(plan.skip, consumed);
            consumed += plan.len();
        }
        prop_assert_eq!(consumed, total);
        prop_assert_eq!(scheduler.store().active_jobs(), 0);
    }

    /// Property: the effective overlap is always strictly smaller than the
    /// batch, so an overlapping walk still terminates and visits everything.
    #[test]
    fn overlap_never_erases_a_batch(
        total in 1u64..5_000,
        max_cap in 1u64..200,
        overlap in 0u64..300,
    ) {
        let scheduler = ChunkScheduler::new();
        let options = ChunkOptions::new(max_cap).with_overlap(overlap);
        let job = JobKey::from_raw(0);

        let mut previous_cursor = 0u64;
        let mut calls = 0u64;
        loop {
            let plan = scheduler.next(job, total, &options).unwrap();
            if plan.is_done {
                break;
            }
            let cursor = scheduler.store().cursor(job).unwrap();
            prop_assert!(cursor > previous_cursor, "every call must make progress");
            previous_cursor = cursor;

            calls += 1;
            prop_assert!(calls <= total, "walk must finish within one call per item");
        }
    }
}
