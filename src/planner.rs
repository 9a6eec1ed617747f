//! Minimal batch breakdown arithmetic.
//!
//! Given a remaining item count and a per-batch cap, [`minimal_breakdown`]
//! computes the smallest number of batches that can cover the remainder and
//! the per-batch size that count implies. This is the pure arithmetic core
//! that [`compression`](crate::compression) and the
//! [`ChunkScheduler`](crate::ChunkScheduler) build on.

/// A batch count paired with the per-batch item cap it implies.
///
/// Produced by [`minimal_breakdown`] and refined by
/// [`compress`](crate::compression::compress). For any valid breakdown,
/// `batch_count * cap >= remaining` and `(batch_count - 1) * cap < remaining`:
/// the batches cover the remainder with no wholly-redundant batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    /// Number of batches the remaining items are split into.
    pub batch_count: u64,
    /// Items per batch (the last batch may run short).
    pub cap: u64,
}

/// Compute the minimal batch breakdown for `remaining` items under `max_cap`.
///
/// `batch_count` is `ceil(remaining / max_cap)` — the physically smallest
/// number of batches that fits — and `cap` is `ceil(remaining / batch_count)`,
/// which redistributes the rounding remainder evenly instead of leaving one
/// tiny trailing batch. The returned cap never exceeds `max_cap`.
///
/// Pure and deterministic; safe to call concurrently.
///
/// Callers must guarantee `remaining > 0` and `max_cap >= 1`; the scheduler
/// validates both before reaching this function.
///
/// # Example
///
/// ```
/// use framebatch::planner::minimal_breakdown;
///
/// let breakdown = minimal_breakdown(100, 24);
/// assert_eq!(breakdown.batch_count, 5);
/// assert_eq!(breakdown.cap, 20);
/// ```
pub fn minimal_breakdown(remaining: u64, max_cap: u64) -> Breakdown {
    debug_assert!(remaining > 0, "planner called with nothing remaining");
    debug_assert!(max_cap >= 1, "planner called with a zero cap");

    let batch_count = remaining.div_ceil(max_cap);
    let cap = remaining.div_ceil(batch_count);

    Breakdown { batch_count, cap }
}
