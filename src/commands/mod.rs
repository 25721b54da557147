//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod pisa;
pub mod trace;
pub mod utils;

// Re-export main command functions
pub use models::{PisaArgs, TraceArgs};
pub use pisa::{execute_pisa, run_pisa, PisaOutput};
pub use trace::{collect_trace_metrics, execute_trace_report};
pub use utils::{display_columns, display_version};
