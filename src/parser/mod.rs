//! Input loading and record definitions.
//!
//! This module handles:
//! - Reading delimited files with a header row
//! - Column presence checks
//! - Defining the records that flow through the pipeline

pub mod schema;
pub mod table;

// Re-export main types
pub use schema::{
    EnrichedRow, GroupKey, GroupSummary, KeyToken, StepMetrics, StructuralPoint, TraceMetrics,
};
pub use table::{parse_f64, read_table, Row, Table};
