use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use tempfile::NamedTempFile;

use super::{Report, ReportConfig};
use crate::table::{self, TableError, TableFormat};

/// File name for a report written on `date`, optionally tagged with a project label
pub fn report_file_name(date: NaiveDate, label: Option<&str>, format: TableFormat) -> String {
    let date = date.format("%Y-%m-%d");
    match label.map(str::trim).filter(|l| !l.is_empty()) {
        Some(label) => format!(
            "{}_{}_experiments_metadata.{}",
            date,
            label,
            format.extension()
        ),
        None => format!("{}_experiments_metadata.{}", date, format.extension()),
    }
}

impl Report {
    /// Write the report as a delimited table
    pub fn write<W: Write>(
        &self,
        writer: W,
        format: TableFormat,
        config: &ReportConfig,
    ) -> Result<(), TableError> {
        let marker = config.missing_marker.as_str();
        let header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let rows = self.rows.iter().map(|row| {
            [row.experiment.as_str(), row.sample.as_str()]
                .into_iter()
                .chain(row.cells.iter().map(|cell| cell.render(marker)))
                .collect::<Vec<_>>()
        });
        table::write_table(writer, format, std::iter::once(header).chain(rows))
    }

    /// Write the report to `path`, format chosen by extension
    ///
    /// The table is staged next to the destination and moved into place once
    /// complete, so a failed write never leaves a partial report behind.
    pub fn write_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        config: &ReportConfig,
    ) -> Result<(), TableError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let format = TableFormat::from_path(path)?;
        let mut staged = NamedTempFile::new_in(dir)?;
        self.write(staged.as_file_mut(), format, config)?;
        staged.persist(path).map_err(|e| e.error)?;

        info!(
            "Wrote {} rows x {} columns to {}",
            self.len(),
            self.columns.len(),
            path.display()
        );
        Ok(())
    }
}
