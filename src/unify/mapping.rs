use std::io::Read;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};
use serde::Serialize;

use super::{unify_category, AVAILABLE_COLUMN, UNIFIED_COLUMN};
use crate::model::{Cell, Sample};
use crate::table::{self, Table, TableError, TableFormat};

/// Cell texts that mean "no unified category" (spreadsheet tools write these for blanks)
const BLANK_MARKERS: [&str; 8] = ["NA", "N/A", "n/a", "nan", "NaN", "null", "NULL", "None"];

/// Curated mapping from unified category name to the raw labels it absorbs
///
/// Unified names keep the order of their first appearance in the mapping
/// table; that order becomes the report's column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnificationMapping {
    categories: IndexMap<String, IndexSet<String>>,
}

impl UnificationMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias `raw_label` to `unified`
    pub fn insert(&mut self, raw_label: impl Into<String>, unified: impl Into<String>) {
        self.categories
            .entry(unified.into())
            .or_default()
            .insert(raw_label.into());
    }

    /// Declare a unified category, possibly without any raw label
    pub fn declare(&mut self, unified: impl Into<String>) {
        self.categories.entry(unified.into()).or_default();
    }

    /// Unified names in column order
    pub fn unified_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Raw labels aliased to `unified`
    pub fn raw_labels(&self, unified: &str) -> Option<&IndexSet<String>> {
        self.categories.get(unified)
    }

    /// Number of unified categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True if no unified category is defined
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// One cell per unified category, in column order
    pub fn unify<'a>(&'a self, sample: &Sample) -> Vec<(&'a str, Cell)> {
        self.categories
            .iter()
            .map(|(unified, raw_labels)| (unified.as_str(), unify_category(sample, raw_labels)))
            .collect()
    }

    /// Load a mapping table, format chosen by extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let mapping = Self::from_table(&Table::from_path(path)?)?;
        info!(
            "Loaded {} unified categories from {}",
            mapping.len(),
            path.display()
        );
        Ok(mapping)
    }

    /// Parse a mapping table in `format` from `reader`
    pub fn from_reader<R: Read>(reader: R, format: TableFormat) -> Result<Self, TableError> {
        Self::from_table(&Table::from_reader(reader, format)?)
    }

    /// Build a mapping from a table with `AVAILABLE_CATEGORIES` and `UNIFIED_CATEGORIES` columns
    ///
    /// Rows with a blank unified name drop their raw label from the report. A
    /// unified name on a row without a raw label still gets its (all-missing)
    /// column.
    pub fn from_table(table: &Table) -> Result<Self, TableError> {
        let available = table.column_index(AVAILABLE_COLUMN)?;
        let unified = table.column_index(UNIFIED_COLUMN)?;

        let mut mapping = Self::new();
        let mut dropped = 0usize;

        for row in table.rows() {
            let name = table::cell(row, unified).filter(|name| !BLANK_MARKERS.contains(name));
            match (table::cell(row, available), name) {
                (Some(raw_label), Some(name)) => mapping.insert(raw_label, name),
                (None, Some(name)) => mapping.declare(name),
                (Some(_), None) => dropped += 1,
                (None, None) => {}
            }
        }

        if mapping.is_empty() {
            warn!("Category mapping defines no unified categories");
        }
        debug!("{} raw categories left unmapped", dropped);

        Ok(mapping)
    }
}
