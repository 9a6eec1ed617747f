//! # framebatch
//!
//! Adaptive, resumable batch planning for long frame sequences.
//!
//! `framebatch` splits a long ordered item sequence — typically the frames of
//! a video headed for GPU processing — into bounded-size batches, one batch
//! per call, while persisting per-job progress for the lifetime of the
//! process. A caller that invokes [`ChunkScheduler::next`] repeatedly walks
//! the whole sequence exactly once, in the minimum number of batches the
//! configured overflow tolerance allows.
//!
//! ## Quick Start
//!
//! ```
//! use framebatch::{ChunkOptions, ChunkScheduler, JobKey};
//!
//! let scheduler = ChunkScheduler::new();
//! let key = JobKey::from_path("renders/shot_042.mp4");
//! let options = ChunkOptions::new(24).with_overflow_limit(2);
//!
//! loop {
//!     let plan = scheduler.next(key, 100, &options)?;
//!     if plan.is_done {
//!         break;
//!     }
//!     println!("process frames {:?}", plan.range());
//! }
//! # Ok::<(), framebatch::FrameBatchError>(())
//! ```
//!
//! ## Features
//!
//! - **Minimal batch counts** — `ceil` arithmetic with the rounding
//!   remainder redistributed evenly instead of left as a tiny final batch
//! - **Tolerance-based compression** — trade a bounded cap overflow for
//!   fewer batches via a monotonic downward search
//! - **Resumable cursors** — per-job watermarks stored in an explicit
//!   [`CursorStore`], created on first sight, removed on completion so keys
//!   can be reused for new sequences
//! - **Overlap** — re-include a clamped number of items at each batch
//!   boundary for continuity-sensitive downstream processing
//! - **Preview / commit split** — inspect the next plan without advancing,
//!   then commit separately
//! - **Planning traces** — human-readable records of every compression
//!   trial for diagnostics
//!
//! ## Scope
//!
//! The scheduler consumes primitive numbers and returns primitive numbers:
//! it never opens media files, never inspects pixel data, and runs no
//! threads of its own. Probing frame counts and extracting frames are the
//! caller's concern.

pub mod compression;
pub mod config;
pub mod cursor;
pub mod error;
pub mod key;
pub mod planner;
pub mod scheduler;
pub mod trace;

pub use compression::{compress, compress_with_trace};
pub use config::{ChunkOptions, CompressionStrategy};
pub use cursor::CursorStore;
pub use error::FrameBatchError;
pub use key::JobKey;
pub use planner::{Breakdown, minimal_breakdown};
pub use scheduler::{BatchPlan, ChunkScheduler, ScheduleProgress};
pub use trace::{PlanTrace, TraceStep};
