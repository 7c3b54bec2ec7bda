use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use log::info;

use super::CategorySchema;
use crate::table::{self, TableError, TableFormat};
use crate::unify::{AVAILABLE_COLUMN, UNIFIED_COLUMN};

/// File name for a listing written on `date`
pub fn listing_file_name(date: NaiveDate, format: TableFormat) -> String {
    format!(
        "{}_available_categories.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

impl CategorySchema {
    /// Write the listing as a curatable mapping template
    pub fn write_listing<W: Write>(
        &self,
        writer: W,
        format: TableFormat,
    ) -> Result<(), TableError> {
        let header = vec![AVAILABLE_COLUMN, UNIFIED_COLUMN];
        let rows = self.labels().map(|label| vec![label, ""]);
        table::write_table(writer, format, std::iter::once(header).chain(rows))
    }

    /// Write the listing to `path`, format chosen by extension
    pub fn write_listing_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)?;
        let file = std::fs::File::create(path)?;
        self.write_listing(file, format)?;
        info!("Wrote {} categories to {}", self.len(), path.display());
        Ok(())
    }
}
