//! SSIG Distance CLI
//!
//! Computes classical and structural path lengths from SSIG traces.
//! Writes per-row, per-group and per-trace summary files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use ssig_distance::commands::{
    display_columns, display_version, execute_pisa, execute_trace_report, PisaArgs, TraceArgs,
};
use ssig_distance::output::TraceReport;
use ssig_distance::utils::config::{
    load_config, PipelineConfig, DEFAULT_EFFICIENCY_OUT, DEFAULT_EXTRACT_OUT, DEFAULT_ROW_OUT,
    DEFAULT_SUMMARY_OUT,
};

/// SSIG Distance - structural path-length metrics for SSIG traces
#[derive(Parser, Debug)]
#[command(name = "ssig-distance")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Grouped structural distance over an aggregated grid CSV
    Pisa {
        /// Aggregated grid CSV (e.g. case07_grid_agg.csv)
        #[arg(long = "in")]
        input: PathBuf,

        /// Per-theta rows output CSV
        #[arg(long, default_value = DEFAULT_ROW_OUT)]
        row_out: PathBuf,

        /// Group summary output CSV
        #[arg(long, default_value = DEFAULT_SUMMARY_OUT)]
        summary_out: PathBuf,

        /// Clamp epsilon for atanh (overrides --config)
        #[arg(long)]
        eps: Option<f64>,

        /// Numeric column to treat as m for D_muv (e.g. 'm' or 'x')
        #[arg(long)]
        m_col: Option<String>,

        /// TOML file with eps / m_col defaults
        #[arg(long, env = "SSIG_DISTANCE_CONFIG")]
        config: Option<PathBuf>,

        /// Also write the group summaries as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Whole-trace classical and structural lengths
    Extract {
        /// One or more SSIG trace CSV files
        #[arg(long = "in", num_args = 1.., required = true)]
        inputs: Vec<PathBuf>,

        /// Output summary CSV
        #[arg(long, default_value = DEFAULT_EXTRACT_OUT)]
        out: PathBuf,

        /// Also write the trace records as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Whole-trace structural-to-classical efficiency ratio
    Efficiency {
        /// One or more SSIG trace CSV files
        #[arg(long = "in", num_args = 1.., required = true)]
        inputs: Vec<PathBuf>,

        /// Output summary CSV
        #[arg(long, default_value = DEFAULT_EFFICIENCY_OUT)]
        out: PathBuf,

        /// Also write the trace records as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Display output column sets
    Columns,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Pisa {
            input,
            row_out,
            summary_out,
            eps,
            m_col,
            config,
            json,
        } => {
            let base = match config {
                Some(path) => load_config(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => PipelineConfig::default(),
            };

            let args = PisaArgs {
                input,
                row_out,
                summary_out,
                json_out: json,
                config: base.with_overrides(eps, m_col),
            };

            execute_pisa(args)?;
        }

        Commands::Extract { inputs, out, json } => {
            let args = TraceArgs {
                output: out,
                json_out: json,
                ..TraceArgs::extract(inputs)
            };
            execute_trace_report(args, TraceReport::Extract)?;
        }

        Commands::Efficiency { inputs, out, json } => {
            let args = TraceArgs {
                output: out,
                json_out: json,
                ..TraceArgs::efficiency(inputs)
            };
            execute_trace_report(args, TraceReport::Efficiency)?;
        }

        Commands::Columns => {
            display_columns();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
