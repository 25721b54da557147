//! CSV writers for per-row, per-group and per-trace records.
//!
//! Each file is written in one pass after all computation has finished,
//! with a fixed column order. Floats go through [`format_g`].

use super::format::format_g;
use super::prepare_output_path;
use crate::parser::schema::{EnrichedRow, GroupSummary, TraceMetrics};
use crate::utils::error::OutputError;
use csv::Writer;
use log::info;
use std::path::Path;

pub const ROW_COLUMNS: &[&str] = &[
    "mode",
    "alpha",
    "k",
    "theta",
    "a_avg_mean",
    "s_avg_mean",
    "u",
    "v",
    "R",
    "Psi",
    "du",
    "dv",
    "D_uv_step",
    "L_struct_uv",
];

pub const ROW_M_COLUMNS: &[&str] = &["m_used", "D_muv_step", "L_struct_muv"];

pub const EXTRACT_COLUMNS: &[&str] = &[
    "trace",
    "rows",
    "closed",
    "last_event",
    "L_classical",
    "L_struct",
    "max_R",
    "max_Psi",
];

pub const EFFICIENCY_COLUMNS: &[&str] = &[
    "trace",
    "rows",
    "closed",
    "L_classical",
    "L_struct",
    "eta",
    "max_R",
    "max_Psi",
];

/// Which whole-trace report to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceReport {
    /// Lengths plus last event label
    Extract,
    /// Lengths plus efficiency ratio
    Efficiency,
}

/// Header for the per-row file
pub fn row_columns(use_m: bool) -> Vec<&'static str> {
    let mut cols = ROW_COLUMNS.to_vec();
    if use_m {
        cols.extend_from_slice(ROW_M_COLUMNS);
    }
    cols
}

/// Header for the group summary file
pub fn summary_columns(use_m: bool) -> Vec<&'static str> {
    let mut cols = vec![
        "mode",
        "alpha",
        "k",
        "rows",
        "theta_min",
        "theta_max",
        "L_struct_uv",
    ];
    if use_m {
        cols.push("L_struct_muv");
    }
    cols.extend_from_slice(&["max_R", "max_Psi", "mean_R", "mean_Psi"]);
    cols
}

fn opt_g(x: Option<f64>) -> String {
    x.map(format_g).unwrap_or_default()
}

/// Field values of one enriched row, matching [`row_columns`]
pub fn row_record(row: &EnrichedRow, use_m: bool) -> Vec<String> {
    let mut record = vec![
        row.key.mode.clone(),
        row.key.alpha.raw.clone(),
        row.key.k.raw.clone(),
        row.theta_raw.clone(),
        row.a_raw.clone(),
        row.s_raw.clone(),
        format_g(row.point.u),
        format_g(row.point.v),
        format_g(row.point.r),
        format_g(row.point.psi),
        format_g(row.step.du),
        format_g(row.step.dv),
        format_g(row.step.d_uv_step),
        format_g(row.step.l_struct_uv),
    ];
    if use_m {
        record.push(opt_g(row.m_used));
        record.push(opt_g(row.step.d_muv_step));
        record.push(opt_g(row.step.l_struct_muv));
    }
    record
}

/// Field values of one group summary, matching [`summary_columns`]
pub fn summary_record(summary: &GroupSummary, use_m: bool) -> Vec<String> {
    let mut record = vec![
        summary.mode.clone(),
        summary.alpha.clone(),
        summary.k.clone(),
        summary.rows.to_string(),
        format_g(summary.theta_min),
        format_g(summary.theta_max),
        format_g(summary.l_struct_uv),
    ];
    if use_m {
        record.push(opt_g(summary.l_struct_muv));
    }
    record.extend([
        format_g(summary.max_r),
        format_g(summary.max_psi),
        format_g(summary.mean_r),
        format_g(summary.mean_psi),
    ]);
    record
}

/// Field values of one trace, matching the report's columns
pub fn trace_record(metrics: &TraceMetrics, report: TraceReport) -> Vec<String> {
    let head = vec![
        metrics.trace.clone(),
        metrics.rows.to_string(),
        metrics.closed.to_string(),
    ];
    let tail = [format_g(metrics.max_r), format_g(metrics.max_psi)];

    match report {
        TraceReport::Extract => head
            .into_iter()
            .chain([
                metrics.last_event.clone(),
                format_g(metrics.l_classical),
                format_g(metrics.l_struct),
            ])
            .chain(tail)
            .collect(),
        TraceReport::Efficiency => head
            .into_iter()
            .chain([
                format_g(metrics.l_classical),
                format_g(metrics.l_struct),
                format_g(metrics.eta),
            ])
            .chain(tail)
            .collect(),
    }
}

/// Write a header and records to `path` in a single buffered pass
pub fn write_csv<I>(path: impl AsRef<Path>, header: &[&str], records: I) -> Result<(), OutputError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let path = path.as_ref();
    prepare_output_path(path)?;

    let mut writer = Writer::from_path(path)?;
    writer.write_record(header)?;

    let mut count = 0usize;
    for record in records {
        writer.write_record(&record)?;
        count += 1;
    }
    writer.flush()?;

    info!("Wrote {} records to {}", count, path.display());
    Ok(())
}

/// Write the per-row file in integration order
pub fn write_rows(path: impl AsRef<Path>, rows: &[EnrichedRow], use_m: bool) -> Result<(), OutputError> {
    write_csv(
        path,
        &row_columns(use_m),
        rows.iter().map(|r| row_record(r, use_m)),
    )
}

/// Write the group summary file
pub fn write_summaries(
    path: impl AsRef<Path>,
    summaries: &[GroupSummary],
    use_m: bool,
) -> Result<(), OutputError> {
    write_csv(
        path,
        &summary_columns(use_m),
        summaries.iter().map(|s| summary_record(s, use_m)),
    )
}

/// Write one record per trace, in input order
pub fn write_traces(
    path: impl AsRef<Path>,
    metrics: &[TraceMetrics],
    report: TraceReport,
) -> Result<(), OutputError> {
    let header = match report {
        TraceReport::Extract => EXTRACT_COLUMNS,
        TraceReport::Efficiency => EFFICIENCY_COLUMNS,
    };
    write_csv(path, header, metrics.iter().map(|m| trace_record(m, report)))
}
