//! Grouped incremental integration of structural length.
//!
//! Rows are stably sorted by `(mode, alpha, k, theta)` and then walked once.
//! Each group `(mode, alpha, k)` owns a small accumulator created on first
//! sight. A row's step values measure the move *to* it from the previous
//! row of its group, and its cumulative values include that move.
//!
//! Algorithm:
//! 1. Stable sort by the numeric ordering key
//! 2. For each row, look up (or create) its group accumulator
//! 3. First row of a group: deltas, steps and totals are 0
//! 4. Later rows: Euclidean step in (u, v) and optionally (m, u, v)
//! 5. Annotate the row, then advance the accumulator

use crate::parser::schema::{EnrichedRow, GroupKey, StepMetrics};
use log::debug;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Running state for one group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupAccumulator {
    pub prev_u: f64,
    pub prev_v: f64,
    pub prev_m: f64,
    pub cumulative_uv: f64,
    pub cumulative_muv: f64,
    /// Rows folded in so far
    pub seen: usize,
}

impl GroupAccumulator {
    /// Fold in the next row of this group and return its annotations
    pub fn advance(&mut self, u: f64, v: f64, m: Option<f64>) -> StepMetrics {
        let (du, dv, d_uv, d_muv) = if self.seen == 0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let du = u - self.prev_u;
            let dv = v - self.prev_v;
            let d_uv = (du * du + dv * dv).sqrt();
            let d_muv = match m {
                Some(m) => {
                    let dm = m - self.prev_m;
                    (dm * dm + du * du + dv * dv).sqrt()
                }
                None => 0.0,
            };
            (du, dv, d_uv, d_muv)
        };

        self.cumulative_uv += d_uv;
        self.cumulative_muv += d_muv;

        self.prev_u = u;
        self.prev_v = v;
        self.prev_m = m.unwrap_or(0.0);
        self.seen += 1;

        StepMetrics {
            du,
            dv,
            d_uv_step: d_uv,
            l_struct_uv: self.cumulative_uv,
            d_muv_step: m.map(|_| d_muv),
            l_struct_muv: m.map(|_| self.cumulative_muv),
        }
    }
}

/// Row ordering used before integration.
///
/// Float fields compare with `total_cmp`, so the order is total and the
/// stable sort is reproducible.
pub fn row_order(a: &EnrichedRow, b: &EnrichedRow) -> Ordering {
    a.key
        .sort_cmp(&b.key)
        .then_with(|| a.theta.total_cmp(&b.theta))
}

/// Stable in-place sort by `(mode, alpha, k, theta)`
pub fn sort_rows(rows: &mut [EnrichedRow]) {
    rows.sort_by(row_order);
}

/// Sort `rows` and annotate each with its step and cumulative values.
///
/// Returns the final accumulator of every group encountered.
pub fn integrate(rows: &mut [EnrichedRow]) -> HashMap<GroupKey, GroupAccumulator> {
    sort_rows(rows);

    let mut groups: HashMap<GroupKey, GroupAccumulator> = HashMap::new();

    for row in rows.iter_mut() {
        let acc = groups.entry(row.key.clone()).or_default();
        row.step = acc.advance(row.point.u, row.point.v, row.m_used);
    }

    debug!("Integrated {} rows across {} groups", rows.len(), groups.len());

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural::enrich::structural_point;

    fn row(mode: &str, alpha: &str, k: &str, theta: f64, a: f64, s: f64, m: Option<f64>) -> EnrichedRow {
        EnrichedRow {
            key: GroupKey::new(mode, alpha, k),
            theta_raw: theta.to_string(),
            a_raw: a.to_string(),
            s_raw: s.to_string(),
            theta,
            point: structural_point(a, s, 1e-12),
            m_used: m,
            step: StepMetrics::default(),
        }
    }

    #[test]
    fn test_first_row_is_zero() {
        let mut acc = GroupAccumulator::default();
        let step = acc.advance(3.0, 4.0, Some(1.0));

        assert_eq!(step.du, 0.0);
        assert_eq!(step.dv, 0.0);
        assert_eq!(step.d_uv_step, 0.0);
        assert_eq!(step.l_struct_uv, 0.0);
        assert_eq!(step.d_muv_step, Some(0.0));
        assert_eq!(step.l_struct_muv, Some(0.0));
    }

    #[test]
    fn test_steps_accumulate() {
        let mut acc = GroupAccumulator::default();
        acc.advance(0.0, 0.0, None);
        let s1 = acc.advance(3.0, 4.0, None);
        let s2 = acc.advance(3.0, 0.0, None);

        assert_eq!(s1.d_uv_step, 5.0);
        assert_eq!(s1.l_struct_uv, 5.0);
        assert_eq!(s2.dv, -4.0);
        assert_eq!(s2.l_struct_uv, 9.0);
        assert!(s2.d_muv_step.is_none());
    }

    #[test]
    fn test_third_coordinate_step() {
        let mut acc = GroupAccumulator::default();
        acc.advance(0.0, 0.0, Some(0.0));
        let step = acc.advance(1.0, 2.0, Some(2.0));

        assert_eq!(step.d_muv_step, Some(3.0));
        assert_eq!(step.l_struct_muv, Some(3.0));
    }

    #[test]
    fn test_integrate_sorts_and_resets_per_group() {
        let mut rows = vec![
            row("A", "1", "1", 1.0, 0.6, 0.4, None),
            row("B", "1", "1", 0.0, 0.1, 0.1, None),
            row("A", "1", "1", 0.0, 0.5, 0.5, None),
        ];

        let groups = integrate(&mut rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(rows[0].key.mode, "A");
        assert_eq!(rows[0].theta, 0.0);
        assert_eq!(rows[0].step.l_struct_uv, 0.0);
        assert!((rows[1].step.d_uv_step - 0.190_997_327_6).abs() < 1e-9);
        assert_eq!(rows[2].key.mode, "B");
        assert_eq!(rows[2].step.l_struct_uv, 0.0);
    }

    #[test]
    fn test_equal_floats_distinct_tokens_are_separate_groups() {
        let mut rows = vec![
            row("A", "1", "1", 0.0, 0.1, 0.1, None),
            row("A", "1.0", "1", 1.0, 0.9, 0.9, None),
            row("A", "1", "1", 2.0, 0.2, 0.2, None),
        ];

        let groups = integrate(&mut rows);

        assert_eq!(groups.len(), 2);
        // "1.0" starts its own stream even though it sorts between the others
        assert_eq!(rows[1].key.alpha.raw, "1.0");
        assert_eq!(rows[1].step.d_uv_step, 0.0);
        assert!(rows[2].step.d_uv_step > 0.0);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut rows = vec![
            row("A", "1", "1", 0.0, 0.1, 0.1, None),
            row("A", "1", "1", 0.0, 0.2, 0.2, None),
        ];
        sort_rows(&mut rows);
        assert_eq!(rows[0].a_raw, "0.1");
        assert_eq!(rows[1].a_raw, "0.2");
    }
}
