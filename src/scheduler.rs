//! Resumable batch scheduling.
//!
//! [`ChunkScheduler`] walks a long ordered item sequence one batch per call.
//! Each call reads the job's stored cursor, plans the next batch with
//! [`minimal_breakdown`](crate::planner::minimal_breakdown) and
//! [`compress`](crate::compression::compress), advances the cursor
//! (accounting for any configured overlap), and returns a [`BatchPlan`]
//! describing the batch the caller should now process.
//!
//! A job moves through three conceptual states: not started (no cursor
//! entry), in progress (entry present), and complete (entry removed again).
//! Because completion deletes the entry, a finished key behaves exactly like
//! a brand-new one on the next call — reusing an identifier for a new
//! sequence needs no manual cleanup.
//!
//! # Example
//!
//! ```
//! use framebatch::{ChunkOptions, ChunkScheduler, JobKey};
//!
//! let scheduler = ChunkScheduler::new();
//! let key = JobKey::from_path("renders/shot_042.mp4");
//! let options = ChunkOptions::new(24);
//!
//! loop {
//!     let plan = scheduler.next(key, 100, &options)?;
//!     if plan.is_done {
//!         break;
//!     }
//!     // Process items [plan.skip, plan.skip + plan.len()).
//! }
//! # Ok::<(), framebatch::FrameBatchError>(())
//! ```

use crate::compression::{compress, compress_with_trace};
use crate::config::ChunkOptions;
use crate::cursor::CursorStore;
use crate::error::FrameBatchError;
use crate::key::JobKey;
use crate::trace::PlanTrace;

/// The plan for one batch, returned per scheduling call.
///
/// Transient: plans are recomputed every call (the remaining item count
/// shrinks as the cursor advances) and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// Items to skip from the start of the sequence; where this batch begins.
    /// Equals the job's cursor at the start of the call.
    pub skip: u64,
    /// Per-batch item cap actually used for this batch. Zero only on a
    /// done-plan.
    pub cap: u64,
    /// How many batches the *remaining* items split into at this cap.
    /// Informational; shrinks over successive calls.
    pub batch_count: u64,
    /// True when there was nothing left to process this call.
    pub is_done: bool,

    len: u64,
}

impl BatchPlan {
    /// Number of items in this batch: `min(cap, remaining)` at plan time.
    /// Zero for a done-plan.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True when this plan carries no items (equivalent to
    /// [`is_done`](BatchPlan::is_done) for plans produced by the scheduler).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The item range this batch covers, for the extraction caller.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.skip..self.skip + self.len
    }

    fn done(cursor: u64) -> Self {
        BatchPlan {
            skip: cursor,
            cap: 0,
            batch_count: 0,
            is_done: true,
            len: 0,
        }
    }
}

/// A read-only snapshot of how far a job has progressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleProgress {
    /// Items consumed so far (the stored cursor, clamped to `total`).
    pub consumed: u64,
    /// Total items in the sequence.
    pub total: u64,
    /// Completion percentage (0.0 – 100.0).
    pub percentage: f32,
}

/// Caller-driven batch scheduler with per-job resume state.
///
/// One call to [`next`](ChunkScheduler::next) plans exactly one batch and
/// advances the job's cursor as a side effect. The scheduler owns its
/// [`CursorStore`]; pass the same scheduler (by reference) to every call for
/// a job, and keep calls for any single key sequential — the store's lock
/// protects the map, not the read-plan-advance sequence of one call.
#[derive(Debug, Default)]
pub struct ChunkScheduler {
    store: CursorStore,
}

impl ChunkScheduler {
    /// Create a scheduler with an empty cursor store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler over an existing store, e.g. one pre-seeded by a
    /// test or shared with diagnostic tooling.
    pub fn with_store(store: CursorStore) -> Self {
        Self { store }
    }

    /// The underlying cursor store, for read-only inspection.
    pub fn store(&self) -> &CursorStore {
        &self.store
    }

    /// Plan the next batch for `key` and advance its cursor.
    ///
    /// Implements one full scheduling step: read (or initialise) the cursor,
    /// plan the remaining items, commit the advance. When the cursor has
    /// already reached `total_items` the entry is removed and a done-plan is
    /// returned; calling again afterwards treats the key as brand new.
    ///
    /// Calls for the same key must be sequential (see the type-level docs).
    ///
    /// # Errors
    ///
    /// Returns [`FrameBatchError::InvalidConfig`] for an unusable
    /// configuration, before any cursor mutation. The defensive
    /// [`FrameBatchError::InvalidState`] is returned — with the entry left
    /// untouched — if the computed advance would not make progress.
    pub fn next(
        &self,
        key: JobKey,
        total_items: u64,
        options: &ChunkOptions,
    ) -> Result<BatchPlan, FrameBatchError> {
        self.step(key, total_items, options, false)
            .map(|(plan, _)| plan)
    }

    /// [`next`](ChunkScheduler::next), additionally returning the
    /// human-readable [`PlanTrace`] of the planning arithmetic.
    ///
    /// The trace is diagnostic only and carries no control-flow meaning; a
    /// done-plan produces an empty trace.
    pub fn next_with_trace(
        &self,
        key: JobKey,
        total_items: u64,
        options: &ChunkOptions,
    ) -> Result<(BatchPlan, PlanTrace), FrameBatchError> {
        self.step(key, total_items, options, true)
            .map(|(plan, trace)| (plan, trace.unwrap_or_default()))
    }

    /// Compute the plan [`next`](ChunkScheduler::next) would return, without
    /// mutating anything.
    ///
    /// The pure half of the plan-then-advance cycle: no cursor entry is
    /// created, advanced, or removed (a previewed done-plan leaves the entry
    /// in place). Useful for showing the user what a run would do before
    /// committing to it.
    ///
    /// # Errors
    ///
    /// Returns [`FrameBatchError::InvalidConfig`] for an unusable
    /// configuration.
    pub fn preview(
        &self,
        key: JobKey,
        total_items: u64,
        options: &ChunkOptions,
    ) -> Result<BatchPlan, FrameBatchError> {
        options.validate()?;

        let cursor = if options.reset() {
            0
        } else {
            self.store.cursor(key).unwrap_or(0)
        };
        if cursor >= total_items {
            return Ok(BatchPlan::done(cursor));
        }

        let remaining = total_items - cursor;
        let breakdown = compress(remaining, options.max_cap(), options.overflow_limit());
        Ok(BatchPlan {
            skip: cursor,
            cap: breakdown.cap,
            batch_count: breakdown.batch_count,
            is_done: false,
            len: breakdown.cap.min(remaining),
        })
    }

    /// Advance the cursor for `key` past a batch of `batch_len` items,
    /// keeping `overlap` items for the next batch to re-include.
    ///
    /// The stateful half of the plan-then-advance cycle, for callers that
    /// used [`preview`](ChunkScheduler::preview) and decided to go ahead.
    /// [`next`](ChunkScheduler::next) performs the equivalent advance
    /// internally. Returns the new cursor value.
    ///
    /// # Errors
    ///
    /// Returns [`FrameBatchError::InvalidState`] — leaving the entry
    /// untouched — if the advance would not move the cursor forward.
    pub fn commit(
        &self,
        key: JobKey,
        batch_len: u64,
        overlap: u64,
    ) -> Result<u64, FrameBatchError> {
        let cursor = self.store.get_or_init(key, false);
        let new_cursor = advanced_cursor(key, cursor, batch_len, overlap)?;
        self.store.advance(key, new_cursor);
        Ok(new_cursor)
    }

    /// Snapshot the progress of an in-flight job.
    ///
    /// Returns `None` when no cursor entry exists for `key` (job not started
    /// or already complete). Never mutates the store.
    pub fn progress(&self, key: JobKey, total_items: u64) -> Option<ScheduleProgress> {
        let cursor = self.store.cursor(key)?;
        let consumed = cursor.min(total_items);
        let percentage = if total_items > 0 {
            (consumed as f32 / total_items as f32) * 100.0
        } else {
            100.0
        };
        Some(ScheduleProgress {
            consumed,
            total: total_items,
            percentage,
        })
    }

    /// Walk a whole sequence to completion and collect every batch plan.
    ///
    /// Runs against a throwaway store, so it never touches any in-flight
    /// job state. The returned plans do not include the final done-plan.
    ///
    /// # Errors
    ///
    /// Returns [`FrameBatchError::InvalidConfig`] for an unusable
    /// configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use framebatch::{ChunkOptions, ChunkScheduler};
    ///
    /// let plans = ChunkScheduler::enumerate(100, &ChunkOptions::new(24))?;
    /// assert_eq!(plans.len(), 5);
    /// assert_eq!(plans[0].range(), 0..20);
    /// # Ok::<(), framebatch::FrameBatchError>(())
    /// ```
    pub fn enumerate(
        total_items: u64,
        options: &ChunkOptions,
    ) -> Result<Vec<BatchPlan>, FrameBatchError> {
        let scheduler = ChunkScheduler::new();
        let key = JobKey::from_raw(0);
        // Any reset flag only makes sense on the first call of the walk.
        let mut options = *options;
        let mut plans = Vec::new();
        loop {
            let plan = scheduler.next(key, total_items, &options)?;
            options = options.with_reset(false);
            if plan.is_done {
                return Ok(plans);
            }
            plans.push(plan);
        }
    }

    fn step(
        &self,
        key: JobKey,
        total_items: u64,
        options: &ChunkOptions,
        traced: bool,
    ) -> Result<(BatchPlan, Option<PlanTrace>), FrameBatchError> {
        // Fail fast, before any cursor state is touched.
        options.validate()?;

        let cursor = self.store.get_or_init(key, options.reset());
        if cursor >= total_items {
            self.store.complete(key);
            log::debug!("Job {key}: nothing left at cursor {cursor}/{total_items}");
            return Ok((BatchPlan::done(cursor), None));
        }

        let remaining = total_items - cursor;
        let (breakdown, trace) = if traced {
            let (breakdown, trace) = compress_with_trace(
                remaining,
                options.max_cap(),
                options.overflow_limit(),
            );
            (breakdown, Some(trace))
        } else {
            (
                compress(remaining, options.max_cap(), options.overflow_limit()),
                None,
            )
        };

        let batch_len = breakdown.cap.min(remaining);
        let new_cursor = advanced_cursor(key, cursor, batch_len, options.overlap())?;
        self.store.advance(key, new_cursor);

        log::debug!(
            "Job {key}: batch [{cursor}, {}) of {remaining} remaining ({} batches of {}), cursor -> {new_cursor}",
            cursor + batch_len,
            breakdown.batch_count,
            breakdown.cap,
        );

        Ok((
            BatchPlan {
                skip: cursor,
                cap: breakdown.cap,
                batch_count: breakdown.batch_count,
                is_done: false,
                len: batch_len,
            },
            trace,
        ))
    }
}

/// Compute the post-batch cursor, clamping the overlap so it never consumes
/// an entire batch.
fn advanced_cursor(
    key: JobKey,
    cursor: u64,
    batch_len: u64,
    overlap: u64,
) -> Result<u64, FrameBatchError> {
    let effective_overlap = if batch_len > 0 {
        overlap.min(batch_len - 1)
    } else {
        0
    };
    let new_cursor = cursor + batch_len - effective_overlap;

    // effective_overlap < batch_len guarantees forward progress for any
    // non-empty batch; anything else is a bookkeeping bug.
    if batch_len > 0 && new_cursor <= cursor {
        return Err(FrameBatchError::InvalidState {
            key,
            details: format!(
                "advance from {cursor} by {batch_len} items (overlap {effective_overlap}) \
                 did not move the cursor forward"
            ),
        });
    }

    Ok(new_cursor)
}
