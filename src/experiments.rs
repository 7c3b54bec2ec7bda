//! Reading the list of experiments to process.

use std::io::Read;
use std::path::Path;

use indexmap::IndexSet;
use log::{info, warn};

use crate::table::{self, Table, TableError, TableFormat};

/// Column holding experiment accessions
pub const DATASET_COLUMN: &str = "Dataset";

/// Read experiment accessions from the `Dataset` column of a table file
pub fn read_experiment_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, TableError> {
    let path = path.as_ref();
    let accessions = experiment_list_from_table(&Table::from_path(path)?)?;
    info!("{} experiments listed in {}", accessions.len(), path.display());
    Ok(accessions)
}

/// Read experiment accessions from a table
///
/// Blank cells are skipped; repeated accessions keep their first position.
pub fn experiment_list_from_reader<R: Read>(
    reader: R,
    format: TableFormat,
) -> Result<Vec<String>, TableError> {
    experiment_list_from_table(&Table::from_reader(reader, format)?)
}

fn experiment_list_from_table(table: &Table) -> Result<Vec<String>, TableError> {
    let column = table.column_index(DATASET_COLUMN)?;

    let mut accessions = IndexSet::new();
    for row in table.rows() {
        if let Some(accession) = table::cell(row, column) {
            if !accessions.insert(accession.to_string()) {
                warn!("Experiment {} listed more than once", accession);
            }
        }
    }

    Ok(accessions.into_iter().collect())
}
