//! Scheduling configuration.
//!
//! [`ChunkOptions`] is a builder that carries the per-call knobs of the
//! scheduler — batch cap, overflow tolerance, overlap, reset — without
//! polluting every method signature.
//!
//! # Example
//!
//! ```
//! use framebatch::ChunkOptions;
//!
//! let options = ChunkOptions::new(24)
//!     .with_overflow_limit(2)
//!     .with_overlap(3);
//! assert!(options.validate().is_ok());
//! ```

use crate::error::FrameBatchError;

/// How the compression search weighs batch count against overflow.
///
/// Accepted for API compatibility with earlier pipeline tooling. Both
/// strategies currently run the identical downward scan of
/// [`compress`](crate::compression::compress); a distinct greedy behaviour
/// was never specified and inventing one here would silently change batch
/// boundaries for existing callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum CompressionStrategy {
    /// Redistribute the rounding remainder evenly across batches.
    /// This is the default.
    #[default]
    Balanced,
    /// Reserved; behaves identically to [`CompressionStrategy::Balanced`].
    Greedy,
}

/// Configuration for one scheduling call.
///
/// Construct with [`ChunkOptions::new`] and refine with the `with_*`
/// builders. A given options value can be reused across calls; `reset` is
/// the only field that usually varies call to call.
///
/// Validation is fail-fast: [`ChunkScheduler::next`](crate::ChunkScheduler::next)
/// rejects an invalid configuration before touching any cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Maximum items per batch. Must be at least 1.
    pub(crate) max_cap: u64,
    /// How many items a compressed batch may exceed `max_cap` by.
    /// Zero disables compression. Defaults to 0.
    pub(crate) overflow_limit: u64,
    /// Items re-included at the start of the next batch for continuity
    /// across batch boundaries. Defaults to 0.
    pub(crate) overlap: u64,
    /// Discard any stored cursor and start the job from item 0.
    /// Defaults to `false`.
    pub(crate) reset: bool,
    /// Compression strategy selector (currently inert, see
    /// [`CompressionStrategy`]).
    pub(crate) strategy: CompressionStrategy,
}

impl ChunkOptions {
    /// Create options with the given per-batch cap and all other fields at
    /// their defaults: no overflow tolerance, no overlap, no reset.
    pub fn new(max_cap: u64) -> Self {
        Self {
            max_cap,
            overflow_limit: 0,
            overlap: 0,
            reset: false,
            strategy: CompressionStrategy::Balanced,
        }
    }

    /// Allow compressed batches to exceed the cap by up to `limit` items.
    #[must_use]
    pub fn with_overflow_limit(mut self, limit: u64) -> Self {
        self.overflow_limit = limit;
        self
    }

    /// Re-include `overlap` items at the start of each subsequent batch.
    ///
    /// The effective overlap is clamped so it never consumes an entire
    /// batch, whatever value is configured here.
    #[must_use]
    pub fn with_overlap(mut self, overlap: u64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Discard any stored cursor for the job and start from item 0.
    #[must_use]
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Select a compression strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: CompressionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The configured per-batch cap.
    pub fn max_cap(&self) -> u64 {
        self.max_cap
    }

    /// The configured overflow tolerance.
    pub fn overflow_limit(&self) -> u64 {
        self.overflow_limit
    }

    /// The configured overlap.
    pub fn overlap(&self) -> u64 {
        self.overlap
    }

    /// Whether this call resets the job's cursor.
    pub fn reset(&self) -> bool {
        self.reset
    }

    /// The configured strategy.
    pub fn strategy(&self) -> CompressionStrategy {
        self.strategy
    }

    /// Check the configuration for values the scheduler cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`FrameBatchError::InvalidConfig`] when `max_cap` is zero.
    pub fn validate(&self) -> Result<(), FrameBatchError> {
        if self.max_cap < 1 {
            return Err(FrameBatchError::invalid_config(
                "max items per batch must be at least 1",
            ));
        }
        Ok(())
    }
}
