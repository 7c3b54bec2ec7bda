//! # Sample Metadata Report
//!
//! One row per sample, grouped by experiment in the order experiments were
//! supplied. Columns are fixed first, then one per unified category:
//!
//! | Column | Source |
//! |--------|--------|
//! | GSE | experiment accession |
//! | GSM | sample accession |
//! | Title | `!Sample_title` |
//! | Organism | `!Sample_organism_ch1` |
//! | Source | `!Sample_source_name_ch1` |
//! | Scan protocol | `!Sample_scan_protocol` |
//! | *unified categories* | curated characteristics |
//!
//! Every unified category of the mapping gets a column even when no sample has
//! a value for it. Absent values are written as the configured missing marker,
//! never as an empty cell.

mod builder;
mod writer;


pub use writer::report_file_name;

use serde::{Deserialize, Serialize};

use crate::model::Cell;
use crate::soft::labels;

/// Default text written for absent values
pub const DEFAULT_MISSING_MARKER: &str = "NA";

/// Experiment accession column
pub const EXPERIMENT_COLUMN: &str = "GSE";

/// Sample accession column
pub const SAMPLE_COLUMN: &str = "GSM";

/// Fixed columns taken from dedicated tags, paired with their category label
pub const FIXED_CATEGORY_COLUMNS: [(&str, &str); 4] = [
    ("Title", labels::TITLE),
    ("Organism", labels::ORGANISM),
    ("Source", labels::SOURCE),
    ("Scan protocol", labels::SCAN),
];

/// Output settings for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Text written for absent values
    pub missing_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
        }
    }
}

/// One report row, aligned with [`Report::columns`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Experiment accession
    pub experiment: String,
    /// Sample accession
    pub sample: String,
    /// Cells after the two accession columns
    pub cells: Vec<Cell>,
}

/// Consolidated sample metadata table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    columns: Vec<String>,
    rows: Vec<ReportRow>,
}

impl Report {
    /// Column names in output order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in output order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the report has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell of `row` under the first column named `column`
    ///
    /// Accession columns are returned as values.
    pub fn value(&self, row: usize, column: &str) -> Option<Cell> {
        let row = self.rows.get(row)?;
        let index = self.columns.iter().position(|c| c == column)?;
        match index {
            0 => Some(Cell::Value(row.experiment.clone())),
            1 => Some(Cell::Value(row.sample.clone())),
            i => row.cells.get(i - 2).cloned(),
        }
    }
}
