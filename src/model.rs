//! Experiment and sample records shared by the parser, unifier and report builder.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// One (category label, value) pair recorded for a sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryValue {
    /// Raw category label as it appeared in the record
    pub label: String,
    /// Value recorded under the label
    pub value: String,
}

impl CategoryValue {
    /// Create a new pair
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Metadata of a single sample (GSM accession)
///
/// Labels are not unique: repeated tags each contribute their own pair, kept in
/// the order they were read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    /// Sample accession (e.g. "GSM1")
    pub accession: String,
    /// Ordered (label, value) pairs
    pub values: Vec<CategoryValue>,
}

impl Sample {
    /// Create an empty sample
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            values: Vec::new(),
        }
    }

    /// Append a pair
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.values.push(CategoryValue::new(label, value));
    }

    /// Value of the first pair carrying `label`
    pub fn first_value(&self, label: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|pair| pair.label == label)
            .map(|pair| pair.value.as_str())
    }

    /// Value of the first pair whose label is any of `labels`
    ///
    /// Sequence order decides, not the order of `labels`.
    pub fn first_value_in(&self, labels: &IndexSet<String>) -> Option<&str> {
        self.values
            .iter()
            .find(|pair| labels.contains(&pair.label))
            .map(|pair| pair.value.as_str())
    }

    /// Labels of all pairs in sequence order, repeats included
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|pair| pair.label.as_str())
    }

    /// Number of recorded pairs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no pair has been recorded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A series (GSE accession) and its samples in encounter order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Experiment {
    /// Experiment accession (e.g. "GSE1")
    pub accession: String,
    samples: IndexMap<String, Sample>,
}

impl Experiment {
    /// Create an experiment without samples
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            samples: IndexMap::new(),
        }
    }

    /// Record a pair for `sample`, creating the sample on its first pair
    pub fn record(&mut self, sample: &str, label: impl Into<String>, value: impl Into<String>) {
        if let Some(existing) = self.samples.get_mut(sample) {
            existing.push(label, value);
        } else {
            let mut created = Sample::new(sample);
            created.push(label, value);
            self.samples.insert(sample.to_string(), created);
        }
    }

    /// Look up a sample by accession
    pub fn sample(&self, accession: &str) -> Option<&Sample> {
        self.samples.get(accession)
    }

    /// Samples in encounter order
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.values()
    }

    /// Number of samples
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Total number of pairs over all samples
    pub fn value_count(&self) -> usize {
        self.samples.values().map(Sample::len).sum()
    }
}

/// A report cell: either a value or the explicit missing marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
    /// Present value
    Value(String),
    /// No value for this sample
    Missing,
}

impl Cell {
    /// Wrap an optional value
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(v) => Cell::Value(v.to_string()),
            None => Cell::Missing,
        }
    }

    /// The value, if present
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Cell::Value(v) => Some(v),
            Cell::Missing => None,
        }
    }

    /// True for the missing marker
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text written to the output table
    pub fn render<'a>(&'a self, missing_marker: &'a str) -> &'a str {
        match self {
            Cell::Value(v) => v,
            Cell::Missing => missing_marker,
        }
    }
}
