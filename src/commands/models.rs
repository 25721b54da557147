use crate::utils::config::{
    PipelineConfig, DEFAULT_EFFICIENCY_OUT, DEFAULT_EXTRACT_OUT, DEFAULT_ROW_OUT,
    DEFAULT_SUMMARY_OUT,
};
use std::path::PathBuf;

/// Arguments for the pisa command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct PisaArgs {
    /// Aggregated grid CSV
    pub input: PathBuf,

    /// Per-row output CSV
    pub row_out: PathBuf,

    /// Group summary output CSV
    pub summary_out: PathBuf,

    /// Optional JSON copy of the group summaries
    pub json_out: Option<PathBuf>,

    /// Resolved epsilon and `m` column
    pub config: PipelineConfig,
}

impl Default for PisaArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            row_out: PathBuf::from(DEFAULT_ROW_OUT),
            summary_out: PathBuf::from(DEFAULT_SUMMARY_OUT),
            json_out: None,
            config: PipelineConfig::default(),
        }
    }
}

/// Arguments shared by the extract and efficiency commands
#[derive(Debug, Clone)]
pub struct TraceArgs {
    /// Trace CSVs, processed in the order given
    pub inputs: Vec<PathBuf>,

    /// Summary output CSV
    pub output: PathBuf,

    /// Optional JSON copy of the trace records
    pub json_out: Option<PathBuf>,
}

impl TraceArgs {
    pub fn extract(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output: PathBuf::from(DEFAULT_EXTRACT_OUT),
            json_out: None,
        }
    }

    pub fn efficiency(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output: PathBuf::from(DEFAULT_EFFICIENCY_OUT),
            json_out: None,
        }
    }
}
