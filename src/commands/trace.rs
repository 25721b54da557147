//! Extract and efficiency command implementations.
//!
//! Both read every trace first, in the order given, and write the summary
//! only once all traces have been computed. An empty trace aborts the run.

use super::models::TraceArgs;
use crate::aggregator::compute_trace_metrics;
use crate::output::{format_g, write_json, write_traces, TraceReport};
use crate::parser::read_table;
use crate::parser::schema::TraceMetrics;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Compute metrics for each trace in order, stopping at the first failure
pub fn collect_trace_metrics(inputs: &[PathBuf]) -> Result<Vec<TraceMetrics>> {
    if inputs.is_empty() {
        anyhow::bail!("At least one trace file is required");
    }

    inputs
        .iter()
        .enumerate()
        .map(|(i, path)| -> Result<TraceMetrics> {
            info!("Trace {}/{}: {}", i + 1, inputs.len(), path.display());
            let table = read_table(path)?;
            let metrics = compute_trace_metrics(&table)
                .with_context(|| format!("Failed to process trace {}", path.display()))?;
            Ok(metrics)
        })
        .collect()
}

/// One progress line per trace
pub fn trace_line(metrics: &TraceMetrics, report: TraceReport) -> String {
    match report {
        TraceReport::Extract => format!(
            "{}: rows={}, closed={}, L_classical={}, L_struct={}, max_R={}, max_Psi={}",
            metrics.trace,
            metrics.rows,
            metrics.closed,
            format_g(metrics.l_classical),
            format_g(metrics.l_struct),
            format_g(metrics.max_r),
            format_g(metrics.max_psi),
        ),
        TraceReport::Efficiency => format!(
            "{}: eta={}, L_classical={}, L_struct={}, max_R={}, max_Psi={}",
            metrics.trace,
            format_g(metrics.eta),
            format_g(metrics.l_classical),
            format_g(metrics.l_struct),
            format_g(metrics.max_r),
            format_g(metrics.max_psi),
        ),
    }
}

/// Execute the extract or efficiency command
///
/// **Public** - main entry point called from main.rs
pub fn execute_trace_report(args: TraceArgs, report: TraceReport) -> Result<()> {
    let records = collect_trace_metrics(&args.inputs)?;

    write_traces(&args.output, &records, report).context("Failed to write trace summary CSV")?;
    if let Some(json_out) = &args.json_out {
        write_json(&records, json_out).context("Failed to write trace summary JSON")?;
    }

    for record in &records {
        println!("{}", trace_line(record, report));
    }

    println!("WROTE {}", args.output.display());
    if let Some(json_out) = &args.json_out {
        println!("WROTE {}", json_out.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_inputs_is_error() {
        assert!(collect_trace_metrics(&[]).is_err());
    }

    #[test]
    fn test_trace_lines() {
        let m = TraceMetrics {
            trace: "t.csv".to_string(),
            rows: 3,
            closed: 0,
            last_event: String::new(),
            l_classical: 6.0,
            l_struct: 7.5,
            eta: 1.25,
            max_r: 2.0,
            max_psi: 0.3,
        };

        assert_eq!(
            trace_line(&m, TraceReport::Extract),
            "t.csv: rows=3, closed=0, L_classical=6, L_struct=7.5, max_R=2, max_Psi=0.3"
        );
        assert_eq!(
            trace_line(&m, TraceReport::Efficiency),
            "t.csv: eta=1.25, L_classical=6, L_struct=7.5, max_R=2, max_Psi=0.3"
        );
    }
}
