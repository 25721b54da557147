//! Whole-trace classical and structural lengths.
//!
//! A trace file is one implicit group in file order. Interior steps pair
//! each row's `dx` with the `(u, v)` move to the next row; the last row's
//! `|dx|` closes the path on its own since it has no successor.

use crate::parser::schema::TraceMetrics;
use crate::parser::table::Table;
use crate::utils::config::{ETA_EPS, TRACE_REQUIRED_COLUMNS};
use crate::utils::error::InputError;
use log::debug;

/// One step of an upstream trace
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraceStep {
    pub dx: f64,
    pub u: f64,
    pub v: f64,
    pub r: f64,
    pub psi: f64,
}

/// Lengths over a sequence of steps
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathLengths {
    pub l_classical: f64,
    pub l_struct: f64,
}

/// `Σ|dx|` and the structural length with its closing segment
///
/// # Example
/// ```
/// use ssig_distance::aggregator::trace::{path_lengths, TraceStep};
///
/// let steps = [
///     TraceStep { dx: 1.0, u: 0.0, ..Default::default() },
///     TraceStep { dx: 2.0, u: 1.0, ..Default::default() },
///     TraceStep { dx: 3.0, u: 3.0, ..Default::default() },
/// ];
/// let lengths = path_lengths(&steps);
/// assert_eq!(lengths.l_classical, 6.0);
/// assert!((lengths.l_struct - 7.242640687119285).abs() < 1e-12);
/// ```
pub fn path_lengths(steps: &[TraceStep]) -> PathLengths {
    let l_classical = steps.iter().map(|s| s.dx.abs()).sum();

    let interior: f64 = steps
        .windows(2)
        .map(|pair| {
            let du = pair[1].u - pair[0].u;
            let dv = pair[1].v - pair[0].v;
            (pair[0].dx * pair[0].dx + du * du + dv * dv).sqrt()
        })
        .sum();

    let closing = steps.last().map(|s| s.dx.abs()).unwrap_or(0.0);

    PathLengths {
        l_classical,
        l_struct: interior + closing,
    }
}

/// Structural-to-classical efficiency ratio
pub fn efficiency_ratio(lengths: &PathLengths) -> f64 {
    lengths.l_struct / (lengths.l_classical + ETA_EPS)
}

/// Compute metrics for one fully-read trace.
///
/// # Errors
/// * `InputError::EmptyFile` - the trace has no rows
/// * `InputError::MissingColumn` - `dx`, `u` or `v` is absent
pub fn compute_trace_metrics(table: &Table) -> Result<TraceMetrics, InputError> {
    let last = table
        .last_row()
        .ok_or_else(|| InputError::EmptyFile(table.path.display().to_string()))?;
    table.require_columns(TRACE_REQUIRED_COLUMNS)?;

    let steps: Vec<TraceStep> = table
        .rows()
        .map(|row| TraceStep {
            dx: row.get_f64_or("dx", 0.0),
            u: row.get_f64_or("u", 0.0),
            v: row.get_f64_or("v", 0.0),
            r: row.get_f64_or("R", 0.0),
            psi: row.get_f64_or("Psi", 0.0),
        })
        .collect();

    let lengths = path_lengths(&steps);

    let max_r = steps.iter().map(|s| s.r).fold(f64::NEG_INFINITY, f64::max);
    let max_psi = steps.iter().map(|s| s.psi).fold(f64::NEG_INFINITY, f64::max);

    // upstream writes `closed` as int or float; truncate toward zero
    let closed = last.get_f64_or("closed", 0.0);
    let closed = if closed.is_finite() { closed.trunc() as i64 } else { 0 };

    debug!(
        "Trace {}: {} rows, L_classical={}, L_struct={}",
        table.file_name(),
        steps.len(),
        lengths.l_classical,
        lengths.l_struct
    );

    Ok(TraceMetrics {
        trace: table.file_name(),
        rows: steps.len(),
        closed,
        last_event: last.get_or_empty("event").to_string(),
        l_classical: lengths.l_classical,
        l_struct: lengths.l_struct,
        eta: efficiency_ratio(&lengths),
        max_r,
        max_psi,
    })
}
