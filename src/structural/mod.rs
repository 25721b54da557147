//! Structural-space computation.
//!
//! This module transforms raw measurement rows into:
//! - Structural coordinates `(u, v)` via a clamped `atanh`
//! - Radius `R` and potential `Psi` per row
//! - Per-group step distances and running structural length

pub mod enrich;
pub mod integrator;
pub mod transform;

// Re-export main types and functions
pub use enrich::{check_pisa_columns, enrich_row, enrich_table, structural_point};
pub use integrator::{integrate, row_order, sort_rows, GroupAccumulator};
pub use transform::{atanh_safe, clamp};
