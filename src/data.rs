// Metrics Table Module
// Loads per-department research metrics from CSV.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Default location of the departmental metrics CSV
pub const DEFAULT_DATA_PATH: &str = "Data/h-index.csv";

/// One department row of the metrics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Publications")]
    pub publications: u64,
    #[serde(rename = "Citations")]
    pub citations: u64,
    #[serde(rename = "h-index")]
    pub h_index: f64,
}

impl DepartmentRecord {
    pub fn new(category: impl Into<String>, publications: u64, citations: u64, h_index: f64) -> Self {
        Self {
            category: category.into(),
            publications,
            citations,
            h_index,
        }
    }
}

/// Read-only table of department metrics, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    rows: Vec<DepartmentRecord>,
}

impl MetricsTable {
    /// Build a table from rows. An empty row set, or one whose count
    /// columns don't fit a `u64` total, is rejected.
    pub fn from_rows(rows: Vec<DepartmentRecord>) -> Result<Self, DataError> {
        Self::validated(rows, "<rows>")
    }

    fn validated(rows: Vec<DepartmentRecord>, source_name: &str) -> Result<Self, DataError> {
        if rows.is_empty() {
            return Err(DataError::Empty {
                source_name: source_name.to_string(),
            });
        }
        if checked_total(&rows, |r| r.publications).is_none() {
            return Err(DataError::Overflow {
                source_name: source_name.to_string(),
                column: "Publications",
            });
        }
        if checked_total(&rows, |r| r.citations).is_none() {
            return Err(DataError::Overflow {
                source_name: source_name.to_string(),
                column: "Citations",
            });
        }
        Ok(Self { rows })
    }

    /// Load the table from a CSV file.
    ///
    /// The header must contain `Category`, `Publications`, `Citations` and
    /// `h-index`; any other columns are ignored.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| DataError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::read(file, &path.display().to_string())
    }

    /// Parse the table from CSV text
    pub fn from_csv_str(content: &str) -> Result<Self, DataError> {
        Self::read(content.as_bytes(), "<inline>")
    }

    fn read<R: Read>(reader: R, source_name: &str) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut rows = Vec::new();
        for record in reader.deserialize::<DepartmentRecord>() {
            let record = record.map_err(|e| DataError::Csv(format!("{}: {}", source_name, e)))?;
            rows.push(record);
        }

        let table = Self::validated(rows, source_name)?;
        tracing::debug!(source = source_name, rows = table.len(), "Loaded metrics table");
        Ok(table)
    }

    pub fn rows(&self) -> &[DepartmentRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // Totals fit a u64: checked on construction
    pub fn total_publications(&self) -> u64 {
        checked_total(&self.rows, |r| r.publications).unwrap_or(u64::MAX)
    }

    pub fn total_citations(&self) -> u64 {
        checked_total(&self.rows, |r| r.citations).unwrap_or(u64::MAX)
    }

    /// Mean h-index across departments
    pub fn mean_h_index(&self) -> f64 {
        let sum: f64 = self.rows.iter().map(|r| r.h_index).sum();
        sum / self.rows.len() as f64
    }
}

/// Sum of a count column, `None` on overflow
fn checked_total(rows: &[DepartmentRecord], column: impl Fn(&DepartmentRecord) -> u64) -> Option<u64> {
    rows.iter().try_fold(0u64, |acc, r| acc.checked_add(column(r)))
}

/// Metrics table loading errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read metrics file {path}: {message}")]
    Io { path: String, message: String },
    #[error("Malformed metrics CSV: {0}")]
    Csv(String),
    #[error("Metrics table {source_name} has no rows")]
    Empty { source_name: String },
    #[error("Total of column {column} in {source_name} exceeds the supported range")]
    Overflow {
        source_name: String,
        column: &'static str,
    },
}
