//! Domain records shared by the pipeline stages and the writers.
//!
//! These types are derived once per run from an immutable input file and
//! discarded after output is written.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A numeric key column seen two ways: identity by the raw token,
/// ordering by its parsed value.
///
/// Two tokens such as `"1"` and `"1.0"` are distinct keys that sort
/// together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyToken {
    pub raw: String,
    pub value: f64,
}

impl KeyToken {
    /// Unparsable tokens sort as `0.0`
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = raw.trim().parse::<f64>().unwrap_or(0.0);
        Self { raw, value }
    }
}

impl PartialEq for KeyToken {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for KeyToken {}

impl Hash for KeyToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

/// Identity of one independent integration stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub mode: String,
    pub alpha: KeyToken,
    pub k: KeyToken,
}

impl GroupKey {
    pub fn new(mode: impl Into<String>, alpha: impl Into<String>, k: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            alpha: KeyToken::new(alpha),
            k: KeyToken::new(k),
        }
    }

    /// Numeric ordering: mode text, then alpha value, then k value.
    ///
    /// Keys equal under this ordering may still be distinct groups.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        self.mode
            .cmp(&other.mode)
            .then_with(|| self.alpha.value.total_cmp(&other.alpha.value))
            .then_with(|| self.k.value.total_cmp(&other.k.value))
    }
}

/// Position of one row in structural space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralPoint {
    pub u: f64,
    pub v: f64,
    /// `sqrt(u² + v²)`
    pub r: f64,
    /// `½(u² + v²)`
    pub psi: f64,
}

/// Integrator annotations for one row
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepMetrics {
    pub du: f64,
    pub dv: f64,
    pub d_uv_step: f64,
    pub l_struct_uv: f64,
    /// Present only when the third coordinate is enabled
    pub d_muv_step: Option<f64>,
    pub l_struct_muv: Option<f64>,
}

/// An input row that survived the completeness filter, plus everything
/// derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRow {
    pub key: GroupKey,
    /// Input text, echoed verbatim on output
    pub theta_raw: String,
    pub a_raw: String,
    pub s_raw: String,
    pub theta: f64,
    pub point: StructuralPoint,
    pub m_used: Option<f64>,
    pub step: StepMetrics,
}

/// Per-group statistics over the integrated rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub mode: String,
    pub alpha: String,
    pub k: String,
    pub rows: usize,
    pub theta_min: f64,
    pub theta_max: f64,
    #[serde(rename = "L_struct_uv")]
    pub l_struct_uv: f64,
    #[serde(rename = "L_struct_muv", skip_serializing_if = "Option::is_none")]
    pub l_struct_muv: Option<f64>,
    #[serde(rename = "max_R")]
    pub max_r: f64,
    #[serde(rename = "max_Psi")]
    pub max_psi: f64,
    #[serde(rename = "mean_R")]
    pub mean_r: f64,
    #[serde(rename = "mean_Psi")]
    pub mean_psi: f64,
}

/// Whole-file metrics for one upstream trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceMetrics {
    pub trace: String,
    pub rows: usize,
    pub closed: i64,
    pub last_event: String,
    #[serde(rename = "L_classical")]
    pub l_classical: f64,
    #[serde(rename = "L_struct")]
    pub l_struct: f64,
    /// `L_struct / (L_classical + 1e-12)`
    pub eta: f64,
    #[serde(rename = "max_R")]
    pub max_r: f64,
    #[serde(rename = "max_Psi")]
    pub max_psi: f64,
}
