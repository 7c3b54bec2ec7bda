//! Table I/O shared by the experiment list, category mapping and report.
//!
//! The format follows the file extension: `.csv` is comma-separated, `.tsv`,
//! `.tab` and `.txt` are tab-separated, and `.xlsx` is an Excel workbook (first
//! worksheet, header in the first row). Any other extension is rejected.

use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use calamine::{Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};

/// Errors that can occur while reading or writing tables
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading or writing a table file
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Workbook could not be read
    #[error("Excel read error: {0}")]
    XlsxReadError(#[from] calamine::XlsxError),

    /// Workbook could not be written
    #[error("Excel write error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    /// Workbook without any worksheet
    #[error("Workbook contains no worksheet")]
    EmptyWorkbook,

    /// File extension does not name a supported table format
    #[error("Unsupported table format: {0:?} (expected .tsv, .csv or .xlsx)")]
    UnsupportedFormat(String),

    /// Missing required column
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Format of a table file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Tab-separated values
    #[default]
    Tsv,
    /// Comma-separated values
    Csv,
    /// Excel workbook
    Xlsx,
}

impl TableFormat {
    /// Pick the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "tsv" | "tab" | "txt" => Ok(TableFormat::Tsv),
            "csv" => Ok(TableFormat::Csv),
            "xlsx" => Ok(TableFormat::Xlsx),
            _ => Err(TableError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Tsv => "tsv",
            TableFormat::Csv => "csv",
            TableFormat::Xlsx => "xlsx",
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            TableFormat::Csv => b',',
            TableFormat::Tsv | TableFormat::Xlsx => b'\t',
        }
    }
}

/// A table held in memory: one header row, then data rows of text cells
///
/// Rows may be shorter or longer than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a table file, format chosen by extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)?;
        let file = File::open(path)?;
        Self::from_reader(file, format)
    }

    /// Read a table in `format` from `reader`
    pub fn from_reader<R: Read>(reader: R, format: TableFormat) -> Result<Self, TableError> {
        match format {
            TableFormat::Tsv | TableFormat::Csv => read_delimited(reader, format),
            TableFormat::Xlsx => read_workbook(reader),
        }
    }

    /// Header cells as read
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Index of the column named `name`, ignoring surrounding whitespace
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}

fn read_delimited<R: Read>(reader: R, format: TableFormat) -> Result<Table, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

fn read_workbook<R: Read>(mut reader: R) -> Result<Table, TableError> {
    // calamine needs Seek; workbooks are small enough to buffer whole
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(TableError::EmptyWorkbook)??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();

    Ok(Table {
        headers,
        rows: rows.collect(),
    })
}

/// Trimmed cell, `None` when empty or absent in a short row
pub fn cell(row: &[String], index: usize) -> Option<&str> {
    row.get(index).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Write `rows` (header first) to `writer` in `format`
///
/// Workbooks are built in memory and written in one piece; empty cells are
/// left blank.
pub fn write_table<'a, W, I>(mut writer: W, format: TableFormat, rows: I) -> Result<(), TableError>
where
    W: Write,
    I: IntoIterator<Item = Vec<&'a str>>,
{
    match format {
        TableFormat::Tsv | TableFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .delimiter(format.delimiter())
                .flexible(true)
                .from_writer(writer);
            for row in rows {
                csv_writer.write_record(&row)?;
            }
            csv_writer.flush()?;
        }
        TableFormat::Xlsx => {
            let mut workbook = Workbook::new();
            let worksheet = workbook.add_worksheet();
            for (r, row) in rows.into_iter().enumerate() {
                // out-of-range indices saturate and are rejected by the worksheet
                let r = u32::try_from(r).unwrap_or(u32::MAX);
                for (c, text) in row.into_iter().enumerate() {
                    if text.is_empty() {
                        continue;
                    }
                    let c = u16::try_from(c).unwrap_or(u16::MAX);
                    worksheet.write_string(r, c, text)?;
                }
            }
            let buffer = workbook.save_to_buffer()?;
            writer.write_all(&buffer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(TableFormat::from_path("a/list.csv").unwrap(), TableFormat::Csv);
        assert_eq!(TableFormat::from_path("a/list.CSV").unwrap(), TableFormat::Csv);
        assert_eq!(TableFormat::from_path("list.tsv").unwrap(), TableFormat::Tsv);
        assert_eq!(TableFormat::from_path("list.txt").unwrap(), TableFormat::Tsv);
        assert_eq!(
            TableFormat::from_path("available_categories.xlsx").unwrap(),
            TableFormat::Xlsx
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        for path in ["list", "list.xls", "list.ods", "list.json"] {
            assert!(
                matches!(
                    TableFormat::from_path(path),
                    Err(TableError::UnsupportedFormat(_))
                ),
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_column_lookup() {
        let table =
            Table::from_reader(" Dataset \tNotes\nGSE1\t\n".as_bytes(), TableFormat::Tsv).unwrap();
        assert_eq!(table.column_index("Dataset").unwrap(), 0);
        assert!(matches!(
            table.column_index("Missing"),
            Err(TableError::MissingColumn(_))
        ));

        let row = table.rows().next().unwrap();
        assert_eq!(cell(row, 0), Some("GSE1"));
        assert_eq!(cell(row, 1), None);
        assert_eq!(cell(row, 5), None);
    }

    #[test]
    fn test_workbook_round_trip() {
        let mut buf = Vec::new();
        write_table(
            &mut buf,
            TableFormat::Xlsx,
            vec![
                vec!["AVAILABLE_CATEGORIES", "UNIFIED_CATEGORIES"],
                vec!["disease state", "Disease"],
                vec!["age", ""],
            ],
        )
        .unwrap();

        let table = Table::from_reader(buf.as_slice(), TableFormat::Xlsx).unwrap();
        assert_eq!(table.headers(), &["AVAILABLE_CATEGORIES", "UNIFIED_CATEGORIES"]);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(cell(rows[0], 1), Some("Disease"));
        assert_eq!(cell(rows[1], 0), Some("age"));
        assert_eq!(cell(rows[1], 1), None);
    }

    #[test]
    fn test_invalid_workbook() {
        let result = Table::from_reader("not a workbook".as_bytes(), TableFormat::Xlsx);
        assert!(matches!(result, Err(TableError::XlsxReadError(_))));
    }
}
