//! Reduce integrated rows into one summary per group.
//!
//! The final structural length of a group is read from the last row the
//! integrator annotated, never re-summed, so the summary always agrees
//! with the per-row file.

use crate::parser::schema::{EnrichedRow, GroupKey, GroupSummary};
use log::debug;
use std::collections::HashMap;

/// Running statistics for one group
#[derive(Debug, Clone)]
struct SummaryBuilder {
    key: GroupKey,
    rows: usize,
    theta_min: f64,
    theta_max: f64,
    max_r: f64,
    max_psi: f64,
    sum_r: f64,
    sum_psi: f64,
    l_struct_uv: f64,
    l_struct_muv: Option<f64>,
}

impl SummaryBuilder {
    fn new(row: &EnrichedRow) -> Self {
        Self {
            key: row.key.clone(),
            rows: 0,
            theta_min: row.theta,
            theta_max: row.theta,
            max_r: row.point.r,
            max_psi: row.point.psi,
            sum_r: 0.0,
            sum_psi: 0.0,
            l_struct_uv: 0.0,
            l_struct_muv: None,
        }
    }

    fn push(&mut self, row: &EnrichedRow) {
        self.rows += 1;
        self.theta_min = self.theta_min.min(row.theta);
        self.theta_max = self.theta_max.max(row.theta);
        self.max_r = self.max_r.max(row.point.r);
        self.max_psi = self.max_psi.max(row.point.psi);
        self.sum_r += row.point.r;
        self.sum_psi += row.point.psi;
        self.l_struct_uv = row.step.l_struct_uv;
        self.l_struct_muv = row.step.l_struct_muv;
    }

    fn finish(self) -> GroupSummary {
        let n = self.rows.max(1) as f64;
        GroupSummary {
            mode: self.key.mode,
            alpha: self.key.alpha.raw,
            k: self.key.k.raw,
            rows: self.rows,
            theta_min: self.theta_min,
            theta_max: self.theta_max,
            l_struct_uv: self.l_struct_uv,
            l_struct_muv: self.l_struct_muv,
            max_r: self.max_r,
            max_psi: self.max_psi,
            mean_r: self.sum_r / n,
            mean_psi: self.sum_psi / n,
        }
    }
}

/// Summarise integrated rows per group.
///
/// `rows` must already be in integration order. Summaries are ordered by
/// `(mode, alpha value, k value)`; keys that tie numerically keep the
/// order in which they first appeared.
pub fn summarize_groups(rows: &[EnrichedRow]) -> Vec<GroupSummary> {
    let mut builders: Vec<SummaryBuilder> = Vec::new();
    let mut index: HashMap<&GroupKey, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(&row.key).or_insert_with(|| {
            builders.push(SummaryBuilder::new(row));
            builders.len() - 1
        });
        builders[slot].push(row);
    }

    builders.sort_by(|a, b| a.key.sort_cmp(&b.key));

    debug!("Summarised {} rows into {} groups", rows.len(), builders.len());

    builders.into_iter().map(SummaryBuilder::finish).collect()
}
