//! Aggregation of enriched rows and whole traces into summary records.
//!
//! This module produces:
//! - Per-group summaries (row count, theta range, R/Psi extrema and means)
//! - Per-trace classical/structural lengths and efficiency ratio

pub mod summary;
pub mod trace;

// Re-export main types and functions
pub use summary::summarize_groups;
pub use trace::{compute_trace_metrics, efficiency_ratio, path_lengths, PathLengths, TraceStep};
