//! Stable job identifiers.
//!
//! A [`JobKey`] names one logical item sequence so that its scheduling cursor
//! survives across repeated calls within the same process. The scheduler
//! treats keys as fully opaque: equal keys mean "same logical job", and
//! nothing else about their derivation is assumed.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::Path;

/// Opaque, stable identifier for one logical item sequence.
///
/// Typically derived from a file path via [`JobKey::from_path`], so that the
/// same input file maps to the same key on every call. Callers with their own
/// identifier scheme can wrap an arbitrary value with [`JobKey::from_raw`].
///
/// # Example
///
/// ```
/// use framebatch::JobKey;
///
/// let a = JobKey::from_path("renders/shot_042.mp4");
/// let b = JobKey::from_path("renders/shot_042.mp4");
/// assert_eq!(a, b);
/// assert_ne!(a, JobKey::from_path("renders/shot_043.mp4"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobKey(u64);

impl JobKey {
    /// Derive a key from a file path.
    ///
    /// The hash is stable for the lifetime of the process, which matches the
    /// cursor store's process-lifetime persistence. Two distinct paths
    /// colliding is possible in principle but not a practical concern.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        // DefaultHasher::new() uses fixed keys, so the mapping is
        // deterministic within a process.
        let mut hasher = DefaultHasher::new();
        path.as_ref().hash(&mut hasher);
        JobKey(hasher.finish())
    }

    /// Wrap a caller-supplied identifier.
    pub const fn from_raw(raw: u64) -> Self {
        JobKey(raw)
    }

    /// The underlying identifier value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for JobKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:#018x}", self.0)
    }
}
