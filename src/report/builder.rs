use log::{info, warn};

use super::{Report, ReportRow, EXPERIMENT_COLUMN, FIXED_CATEGORY_COLUMNS, SAMPLE_COLUMN};
use crate::model::{Cell, Experiment, Sample};
use crate::unify::UnificationMapping;

impl Report {
    /// Build the report for `experiments` in the order given
    pub fn build<'a, I>(experiments: I, mapping: &UnificationMapping) -> Self
    where
        I: IntoIterator<Item = &'a Experiment>,
    {
        let columns = columns_for(mapping);

        let mut rows = Vec::new();
        for experiment in experiments {
            for sample in experiment.samples() {
                rows.push(build_row(&experiment.accession, sample, mapping));
            }
        }

        info!("Built report: {} rows, {} columns", rows.len(), columns.len());

        Self { columns, rows }
    }
}

fn columns_for(mapping: &UnificationMapping) -> Vec<String> {
    let mut columns: Vec<String> = [EXPERIMENT_COLUMN, SAMPLE_COLUMN]
        .into_iter()
        .chain(FIXED_CATEGORY_COLUMNS.iter().map(|(column, _)| *column))
        .map(str::to_string)
        .collect();

    for unified in mapping.unified_names() {
        if columns.iter().any(|c| c == unified) {
            warn!(
                "Unified category '{}' has the same name as an existing column",
                unified
            );
        }
        columns.push(unified.to_string());
    }
    columns
}

fn build_row(experiment: &str, sample: &Sample, mapping: &UnificationMapping) -> ReportRow {
    let mut cells: Vec<Cell> = FIXED_CATEGORY_COLUMNS
        .iter()
        .map(|(_, label)| Cell::from_option(sample.first_value(label)))
        .collect();
    cells.extend(mapping.unify(sample).into_iter().map(|(_, cell)| cell));

    ReportRow {
        experiment: experiment.to_string(),
        sample: sample.accession.clone(),
        cells,
    }
}
