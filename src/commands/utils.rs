use crate::output::csv::{row_columns, summary_columns, EFFICIENCY_COLUMNS, EXTRACT_COLUMNS};

/// Display the output column sets
pub fn display_columns() {
    println!("SSIG Distance Output Columns");
    println!();
    println!("pisa rows:        {}", row_columns(true).join(","));
    println!("pisa summary:     {}", summary_columns(true).join(","));
    println!("  (m columns appear only with --m-col)");
    println!("extract summary:  {}", EXTRACT_COLUMNS.join(","));
    println!("efficiency:       {}", EFFICIENCY_COLUMNS.join(","));
}

/// Display version information
pub fn display_version() {
    println!("SSIG Distance v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Classical and structural path-length metrics for SSIG traces.");
}
