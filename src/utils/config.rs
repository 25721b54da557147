//! Configuration and constants for the CLI.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default clamp epsilon for the structural transform
pub const DEFAULT_EPS: f64 = 1e-12;

/// Guard added to the classical length before computing `eta`
pub const ETA_EPS: f64 = 1e-12;

/// Significant digits used for every floating-point output field
pub const OUTPUT_PRECISION: usize = 15;

// Columns the grouped (pisa) pipeline cannot run without
pub const PISA_REQUIRED_COLUMNS: &[&str] =
    &["mode", "alpha", "k", "theta", "a_avg_mean", "s_avg_mean"];

// Columns a whole trace must carry; R, Psi, closed and event default when absent
pub const TRACE_REQUIRED_COLUMNS: &[&str] = &["dx", "u", "v"];

pub const DEFAULT_ROW_OUT: &str = "pisa_structural_distance_rows.csv";
pub const DEFAULT_SUMMARY_OUT: &str = "pisa_structural_distance_summary.csv";
pub const DEFAULT_EXTRACT_OUT: &str = "structural_distance_summary.csv";
pub const DEFAULT_EFFICIENCY_OUT: &str = "structural_efficiency_summary.csv";

/// Settings for the grouped pipeline, resolved once before any row is read.
///
/// `m_col` is either a concrete column name or `None`; nothing downstream
/// re-checks a flag.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Clamp epsilon for `atanh_safe`
    #[serde(default = "default_eps")]
    pub eps: f64,

    /// Column used as the third coordinate `m`
    #[serde(default)]
    pub m_col: Option<String>,
}

fn default_eps() -> f64 {
    DEFAULT_EPS
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            m_col: None,
        }
    }
}

impl PipelineConfig {
    /// Apply CLI overrides on top of this config and normalise `m_col`.
    pub fn with_overrides(mut self, eps: Option<f64>, m_col: Option<String>) -> Self {
        if let Some(eps) = eps {
            self.eps = eps;
        }
        if m_col.is_some() {
            self.m_col = m_col;
        }
        self.m_col = normalize_m_col(self.m_col.take());
        self
    }

    /// Check that `eps` leaves a non-empty clamp interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.eps.is_finite() || self.eps <= 0.0 || self.eps >= 1.0 {
            return Err(ConfigError::InvalidEpsilon(self.eps));
        }
        Ok(())
    }
}

/// Blank or whitespace-only names disable the third coordinate
pub fn normalize_m_col(m_col: Option<String>) -> Option<String> {
    m_col
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Load pipeline settings from a TOML file
///
/// # Example
/// ```ignore
/// let config = load_config("pisa.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: PipelineConfig = toml::from_str(&contents)?;
    Ok(config)
}
