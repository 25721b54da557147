//! Pisa command implementation.
//!
//! The pisa command:
//! 1. Reads the aggregated grid CSV and checks its columns
//! 2. Enriches complete rows with structural coordinates
//! 3. Sorts and integrates structural length per group
//! 4. Summarises groups and writes output files

use super::models::PisaArgs;
use crate::aggregator::summarize_groups;
use crate::output::{format_g, write_json, write_rows, write_summaries};
use crate::parser::read_table;
use crate::parser::schema::{EnrichedRow, GroupSummary};
use crate::structural::{enrich_table, integrate};
use crate::utils::config::PipelineConfig;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// In-memory result of the grouped pipeline
#[derive(Debug, Clone)]
pub struct PisaOutput {
    /// Rows in integration order, annotated
    pub rows: Vec<EnrichedRow>,
    pub summaries: Vec<GroupSummary>,
}

/// Run enrichment, integration and aggregation without touching disk
/// beyond reading `input`.
pub fn run_pisa(input: &Path, config: &PipelineConfig) -> Result<PisaOutput> {
    config.validate().context("Invalid pipeline configuration")?;

    info!("Step 1/4: Reading {}", input.display());
    let table = read_table(input)?;

    info!("Step 2/4: Enriching {} rows...", table.len());
    let mut rows = enrich_table(&table, config)?;
    debug!("{} rows passed the completeness filter", rows.len());

    info!("Step 3/4: Integrating structural length...");
    let groups = integrate(&mut rows);
    debug!("{} integration groups", groups.len());

    let summaries = summarize_groups(&rows);

    Ok(PisaOutput { rows, summaries })
}

/// One progress line per group
pub fn summary_line(summary: &GroupSummary) -> String {
    let mut line = format!(
        "mode={}, alpha={}, k={}: rows={}, L_struct_uv={}, max_R={}, max_Psi={}",
        summary.mode,
        summary.alpha,
        summary.k,
        summary.rows,
        format_g(summary.l_struct_uv),
        format_g(summary.max_r),
        format_g(summary.max_psi),
    );
    if let Some(l_muv) = summary.l_struct_muv {
        line.push_str(&format!(", L_struct_muv={}", format_g(l_muv)));
    }
    line
}

/// Execute the pisa command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Missing input file, empty input, missing required or `m` column
/// * Invalid epsilon
/// * File write errors
pub fn execute_pisa(args: PisaArgs) -> Result<()> {
    let start_time = Instant::now();

    let output = run_pisa(&args.input, &args.config)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    let use_m = args.config.m_col.is_some();

    info!("Step 4/4: Writing output files...");
    write_rows(&args.row_out, &output.rows, use_m).context("Failed to write per-row CSV")?;
    write_summaries(&args.summary_out, &output.summaries, use_m)
        .context("Failed to write summary CSV")?;
    if let Some(json_out) = &args.json_out {
        write_json(&output.summaries, json_out).context("Failed to write summary JSON")?;
    }

    for summary in &output.summaries {
        println!("{}", summary_line(summary));
    }

    println!("WROTE {}", args.row_out.display());
    println!("WROTE {}", args.summary_out.display());
    if let Some(json_out) = &args.json_out {
        println!("WROTE {}", json_out.display());
    }

    info!("Pisa completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
