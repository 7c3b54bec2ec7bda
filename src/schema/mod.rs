//! # Category Schema Discovery
//!
//! Category labels are free text chosen by each GEO submitter, so the same
//! concept shows up as `disease state`, `disease`, `diagnosis` and so on. No
//! attempt is made to merge them automatically. Instead the pipeline runs in
//! two phases:
//!
//! 1. Collect every distinct label over all samples and write it out as a
//!    listing (`AVAILABLE_CATEGORIES` plus an empty `UNIFIED_CATEGORIES` column).
//! 2. A curator fills in `UNIFIED_CATEGORIES`, and the edited listing becomes the
//!    [`UnificationMapping`](crate::unify::UnificationMapping) for the report.

mod listing;


pub use listing::listing_file_name;

use indexmap::IndexSet;
use serde::Serialize;

use crate::model::Experiment;

/// Distinct category labels in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySchema {
    labels: IndexSet<String>,
}

impl CategorySchema {
    /// Collect labels over every sample of every experiment
    pub fn collect<'a, I>(experiments: I) -> Self
    where
        I: IntoIterator<Item = &'a Experiment>,
    {
        let mut labels = IndexSet::new();
        for experiment in experiments {
            for sample in experiment.samples() {
                for label in sample.labels() {
                    if !labels.contains(label) {
                        labels.insert(label.to_string());
                    }
                }
            }
        }
        Self { labels }
    }

    /// Labels in first-seen order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// True if `label` was observed
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if nothing was collected
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
