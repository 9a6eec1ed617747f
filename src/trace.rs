//! Human-readable planning traces.
//!
//! A [`PlanTrace`] records the arithmetic steps behind one planning decision:
//! the minimal breakdown and every compression trial that was accepted or
//! rejected. Traces are purely diagnostic — they carry no control-flow
//! meaning and downstream callers never need to parse them.
//!
//! # Example
//!
//! ```
//! use framebatch::compression::compress_with_trace;
//!
//! let (breakdown, trace) = compress_with_trace(50, 24, 10);
//! assert_eq!(breakdown.batch_count, 2);
//! for step in trace.steps() {
//!     println!("{step}");
//! }
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

/// One recorded step of a planning computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TraceStep {
    /// The minimal breakdown the planner started from.
    Minimal {
        /// Items left to schedule.
        remaining: u64,
        /// Configured per-batch cap.
        max_cap: u64,
        /// `ceil(remaining / max_cap)`.
        batch_count: u64,
        /// `ceil(remaining / batch_count)`.
        cap: u64,
    },
    /// One compression trial at a smaller batch count.
    Trial {
        /// The batch count that was tried.
        try_batches: u64,
        /// The per-batch size that count would require.
        needed_cap: u64,
        /// How far `needed_cap` exceeds the configured cap.
        overflow: u64,
        /// Whether the trial stayed within the overflow tolerance.
        accepted: bool,
    },
}

impl Display for TraceStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TraceStep::Minimal {
                remaining,
                max_cap,
                batch_count,
                cap,
            } => write!(
                f,
                "minimal: {remaining} items / cap {max_cap} -> {batch_count} batches of {cap}"
            ),
            TraceStep::Trial {
                try_batches,
                needed_cap,
                overflow,
                accepted,
            } => {
                let verdict = if *accepted { "accept" } else { "reject" };
                write!(
                    f,
                    "try {try_batches} batches: needs cap {needed_cap} (overflow {overflow}) -> {verdict}"
                )
            }
        }
    }
}

/// The ordered trace of one planning decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanTrace {
    steps: Vec<TraceStep>,
}

impl PlanTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    /// The recorded steps, oldest first.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Whether anything was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Display for PlanTrace {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
