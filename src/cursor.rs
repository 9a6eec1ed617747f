//! Per-job cursor persistence.
//!
//! A [`CursorStore`] maps each [`JobKey`] to the number of items already
//! consumed from that job's sequence. Entries live for the lifetime of the
//! store (typically the process): they are created on first sight of a key,
//! advanced after every planned batch, and removed once the sequence is
//! exhausted so a reused key starts fresh instead of inheriting stale state.
//!
//! The store is an explicit value the caller owns and hands to the scheduler,
//! never a hidden process-wide global. That keeps its lifetime visible and
//! lets tests run against isolated stores.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::key::JobKey;

/// Thread-safe map from [`JobKey`] to consumed-item watermark.
///
/// The internal mutex protects the map structure, so concurrent calls for
/// *different* keys are safe. It does not serialize the read-plan-advance
/// sequence of a single scheduling call: calls for the *same* key must be
/// sequential, which is a documented caller obligation, not something the
/// store enforces.
///
/// # Example
///
/// ```
/// use framebatch::{CursorStore, JobKey};
///
/// let store = CursorStore::new();
/// let key = JobKey::from_raw(7);
///
/// assert_eq!(store.get_or_init(key, false), 0);
/// store.advance(key, 24);
/// assert_eq!(store.get_or_init(key, false), 24);
///
/// store.complete(key);
/// assert_eq!(store.cursor(key), None);
/// ```
#[derive(Debug, Default)]
pub struct CursorStore {
    cursors: Mutex<HashMap<JobKey, u64>>,
}

impl CursorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cursor for `key`, initialising it to zero first when the
    /// key is unseen or `reset` is requested.
    pub fn get_or_init(&self, key: JobKey, reset: bool) -> u64 {
        let mut cursors = self.lock();
        if reset {
            log::debug!("Resetting cursor for job {key}");
            cursors.insert(key, 0);
            return 0;
        }
        *cursors.entry(key).or_insert(0)
    }

    /// Overwrite the stored cursor for `key`.
    ///
    /// The scheduler calls this exactly once per successful plan; the new
    /// value is the old cursor plus the batch size minus any overlap.
    pub fn advance(&self, key: JobKey, new_cursor: u64) {
        self.lock().insert(key, new_cursor);
    }

    /// Remove the entry for `key` entirely.
    ///
    /// Called when the cursor has reached the end of the sequence. A later
    /// call with the same key — for example a different video that hashed to
    /// the same identifier slot — then starts from zero without manual
    /// cleanup. Removing an absent key is a no-op.
    pub fn complete(&self, key: JobKey) {
        if self.lock().remove(&key).is_some() {
            log::debug!("Job {key} complete, cursor entry removed");
        }
    }

    /// Read the cursor for `key` without creating an entry.
    pub fn cursor(&self, key: JobKey) -> Option<u64> {
        self.lock().get(&key).copied()
    }

    /// Number of jobs currently tracked.
    pub fn active_jobs(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<JobKey, u64>> {
        // A poisoned mutex means another thread panicked mid-insert; the map
        // itself is still structurally sound, so keep serving it.
        self.cursors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
