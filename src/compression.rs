//! Tolerance-based batch compression.
//!
//! When the caller allows batches to exceed the configured cap by a small
//! overflow, fewer batches may cover the same remainder. [`compress`] searches
//! for the smallest batch count whose required per-batch size stays within
//! that tolerance.
//!
//! The search is a single downward linear scan. As the trial batch count
//! decreases, the required cap `ceil(remaining / try_batches)` only grows, so
//! the overflow grows monotonically and the first rejected trial is final.
//! Do not replace this with a binary search without re-establishing that
//! monotonicity argument; the scan is also bounded by the minimal batch
//! count, so it is never the expensive part of a call.

use crate::planner::{Breakdown, minimal_breakdown};
use crate::trace::{PlanTrace, TraceStep};

/// Find the smallest batch count within `overflow_limit` of the cap.
///
/// Starts from [`minimal_breakdown`] and tries successively smaller batch
/// counts, accepting each one whose required per-batch size exceeds `max_cap`
/// by at most `overflow_limit`. With `overflow_limit == 0`, or when the
/// minimal breakdown is already a single batch, the minimal breakdown is
/// returned unchanged.
///
/// Pure function of its three arguments; no state, safe to call concurrently.
///
/// # Example
///
/// ```
/// use framebatch::compression::compress;
///
/// // 50 items at cap 24 need 3 batches; allowing 10 items of overflow
/// // squeezes them into 2 batches of 25.
/// let breakdown = compress(50, 24, 10);
/// assert_eq!(breakdown.batch_count, 2);
/// assert_eq!(breakdown.cap, 25);
/// ```
pub fn compress(remaining: u64, max_cap: u64, overflow_limit: u64) -> Breakdown {
    compress_inner(remaining, max_cap, overflow_limit, None)
}

/// [`compress`], additionally recording every step into a [`PlanTrace`].
///
/// The trace always starts with the minimal breakdown, followed by one entry
/// per compression trial. It is diagnostic output only; the returned
/// [`Breakdown`] is identical to what [`compress`] produces.
pub fn compress_with_trace(
    remaining: u64,
    max_cap: u64,
    overflow_limit: u64,
) -> (Breakdown, PlanTrace) {
    let mut trace = PlanTrace::new();
    let breakdown = compress_inner(remaining, max_cap, overflow_limit, Some(&mut trace));
    (breakdown, trace)
}

fn compress_inner(
    remaining: u64,
    max_cap: u64,
    overflow_limit: u64,
    mut trace: Option<&mut PlanTrace>,
) -> Breakdown {
    let minimal = minimal_breakdown(remaining, max_cap);
    if let Some(trace) = trace.as_deref_mut() {
        trace.push(TraceStep::Minimal {
            remaining,
            max_cap,
            batch_count: minimal.batch_count,
            cap: minimal.cap,
        });
    }

    if overflow_limit == 0 || minimal.batch_count <= 1 {
        return minimal;
    }

    let mut best = minimal;
    for try_batches in (1..minimal.batch_count).rev() {
        let needed_cap = remaining.div_ceil(try_batches);
        let overflow = needed_cap.saturating_sub(max_cap);
        let accepted = overflow <= overflow_limit;

        if let Some(trace) = trace.as_deref_mut() {
            trace.push(TraceStep::Trial {
                try_batches,
                needed_cap,
                overflow,
                accepted,
            });
        }

        if accepted {
            best = Breakdown {
                batch_count: try_batches,
                cap: needed_cap,
            };
            // Keep scanning: an even smaller count may still fit.
        } else {
            // Overflow only grows from here on; the first rejection is final.
            break;
        }
    }

    best
}
