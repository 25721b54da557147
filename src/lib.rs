//! SSIG Distance
//!
//! Classical and structural path-length metrics for time-ordered
//! SSIG measurement traces.
//!
//! The grouped pipeline maps bounded ratios through a clamped `atanh`,
//! integrates step distances per `(mode, alpha, k)` stream and summarises
//! each stream. The whole-trace reports apply the same arc-length formula
//! to files that already carry `dx`, `u` and `v`.
//!
//! ## Getting Started
//!
//! ```bash
//! ssig-distance pisa --in case07_grid_agg.csv --m-col x
//! ssig-distance efficiency --in trace_a.csv trace_b.csv
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod structural;
pub mod utils;
