//! Per-row enrichment: structural coordinates, radius and potential.
//!
//! Rows whose `a_avg_mean`, `s_avg_mean` or `theta` are missing or do not
//! parse are dropped here. That is a completeness filter, not an error.

use super::transform::atanh_safe;
use crate::parser::schema::{EnrichedRow, GroupKey, StepMetrics, StructuralPoint};
use crate::parser::table::{Row, Table};
use crate::utils::config::{PipelineConfig, PISA_REQUIRED_COLUMNS};
use crate::utils::error::InputError;
use log::debug;

/// Map a pair of bounded ratios into structural space
pub fn structural_point(a: f64, s: f64, eps: f64) -> StructuralPoint {
    let u = atanh_safe(a, eps);
    let v = atanh_safe(s, eps);
    let sq = u * u + v * v;

    StructuralPoint {
        u,
        v,
        r: sq.sqrt(),
        psi: 0.5 * sq,
    }
}

/// Enrich a single row, or `None` if it fails the completeness filter.
///
/// `m_col` has already been resolved against the header; an unparsable
/// `m` value becomes `0.0`.
pub fn enrich_row(row: &Row<'_>, eps: f64, m_col: Option<&str>) -> Option<EnrichedRow> {
    let a = row.get_f64("a_avg_mean")?;
    let s = row.get_f64("s_avg_mean")?;
    let theta = row.get_f64("theta")?;

    Some(EnrichedRow {
        key: GroupKey::new(
            row.get_or_empty("mode"),
            row.get_or_empty("alpha"),
            row.get_or_empty("k"),
        ),
        theta_raw: row.get_or_empty("theta").to_string(),
        a_raw: row.get_or_empty("a_avg_mean").to_string(),
        s_raw: row.get_or_empty("s_avg_mean").to_string(),
        theta,
        point: structural_point(a, s, eps),
        m_used: m_col.map(|col| row.get_f64_or(col, 0.0)),
        step: StepMetrics::default(),
    })
}

/// Check the header of a grouped-pipeline input.
///
/// # Errors
/// * `InputError::MissingColumn` - a required column is absent
/// * `InputError::MissingMColumn` - the configured `m` column is absent
pub fn check_pisa_columns(table: &Table, config: &PipelineConfig) -> Result<(), InputError> {
    table.require_columns(PISA_REQUIRED_COLUMNS)?;

    if let Some(m_col) = config.m_col.as_deref() {
        if !table.has_column(m_col) {
            return Err(InputError::MissingMColumn {
                column: m_col.to_string(),
                path: table.path.display().to_string(),
            });
        }
    }

    Ok(())
}

/// Enrich every complete row of `table`, preserving input order
///
/// # Errors
/// Schema errors from [`check_pisa_columns`]
pub fn enrich_table(table: &Table, config: &PipelineConfig) -> Result<Vec<EnrichedRow>, InputError> {
    check_pisa_columns(table, config)?;

    let m_col = config.m_col.as_deref();
    let enriched: Vec<EnrichedRow> = table
        .rows()
        .filter_map(|row| enrich_row(&row, config.eps, m_col))
        .collect();

    let dropped = table.len() - enriched.len();
    if dropped > 0 {
        debug!("Dropped {} incomplete rows from {}", dropped, table.path.display());
    }

    Ok(enriched)
}
