//! Header-addressed CSV loading.
//!
//! Inputs are fully materialised: a `Table` holds the header and every
//! record of one file. Fields are looked up by column name, and a record
//! shorter than the header simply lacks the trailing fields.

use crate::utils::error::InputError;
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use std::path::{Path, PathBuf};

/// One fully-read delimited file
#[derive(Debug, Clone)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub records: Vec<StringRecord>,
}

/// Borrowed view of one record with name-based field access
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    record: &'a StringRecord,
}

impl Table {
    /// Build a table from in-memory parts
    pub fn new(path: impl Into<PathBuf>, headers: Vec<String>, records: Vec<StringRecord>) -> Self {
        Self {
            path: path.into(),
            headers,
            records,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(move |record| Row {
            table: self,
            record,
        })
    }

    pub fn last_row(&self) -> Option<Row<'_>> {
        self.records.last().map(|record| Row {
            table: self,
            record,
        })
    }

    /// Fail with `MissingColumn` on the first absent name
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), InputError> {
        for column in columns {
            if !self.has_column(column) {
                return Err(InputError::MissingColumn {
                    column: column.to_string(),
                    path: self.path.display().to_string(),
                });
            }
        }
        Ok(())
    }

    /// File name used to label per-trace records
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl<'a> Row<'a> {
    /// Raw field text, `None` if the column or the field is absent
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        self.record.get(idx)
    }

    /// Raw field text, empty when absent
    pub fn get_or_empty(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(parse_f64)
    }

    pub fn get_f64_or(&self, column: &str, default: f64) -> f64 {
        self.get_f64(column).unwrap_or(default)
    }
}

/// Lenient float parse: surrounding whitespace is ignored
pub fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Read a whole CSV file with a header row
///
/// # Errors
/// * `InputError::NotFound` - path does not exist
/// * `InputError::Csv` - the file is not valid delimited text
/// * `InputError::EmptyFile` - no data rows after the header
pub fn read_table(path: impl AsRef<Path>) -> Result<Table, InputError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(InputError::NotFound(display));
    }

    debug!("Reading CSV: {}", display);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| csv_error(&display, source))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| csv_error(&display, source))?
        .iter()
        .map(str::to_string)
        .collect();

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| csv_error(&display, source))?;

    if records.is_empty() {
        return Err(InputError::EmptyFile(display));
    }

    debug!("Read {} rows with {} columns from {}", records.len(), headers.len(), display);

    Ok(Table::new(path, headers, records))
}

fn csv_error(path: &str, source: csv::Error) -> InputError {
    InputError::Csv {
        path: path.to_string(),
        source,
    }
}
