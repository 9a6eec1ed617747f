//! Error types for the `framebatch` crate.
//!
//! This module defines [`FrameBatchError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry enough context to
//! diagnose the problem at the call site without additional logging.

use thiserror::Error;

use crate::key::JobKey;

/// The unified error type for all `framebatch` operations.
///
/// Every public method that can fail returns `Result<T, FrameBatchError>`.
/// Configuration errors are raised before any cursor state is mutated, so a
/// rejected call never partially advances a job.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameBatchError {
    /// The caller supplied an unusable configuration.
    ///
    /// Raised before any state mutation: the cursor for the job is left
    /// exactly as it was. The one reachable case on this crate's `u64`
    /// surface is a batch cap of zero; negative totals and overlaps are
    /// unrepresentable by construction.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// An internal cursor invariant was violated.
    ///
    /// Defensive only: with configuration validated up front this should
    /// never occur. If it does, the stored entry is left untouched and the
    /// error is surfaced rather than silently corrected.
    #[error("Invalid cursor state for job {key}: {details}")]
    InvalidState {
        /// The job whose bookkeeping went wrong.
        key: JobKey,
        /// Description of the violated invariant.
        details: String,
    },
}

impl FrameBatchError {
    /// Build an [`FrameBatchError::InvalidConfig`] from any displayable reason.
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        FrameBatchError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
