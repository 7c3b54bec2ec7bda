//! # Category Unification
//!
//! Collapses the raw, submitter-specific category labels of a sample into the
//! curated unified categories of a [`UnificationMapping`].
//!
//! For each unified category the value of the *first* pair in the sample whose
//! label aliases to it is kept. Later matches are discarded, never combined, so
//! the same input always produces the same report.
//!
//! ## Example
//!
//! ```rust
//! use geometa::model::{Cell, Sample};
//! use geometa::unify::UnificationMapping;
//!
//! let mut mapping = UnificationMapping::new();
//! mapping.insert("disease state", "Disease");
//! mapping.insert("diagnosis", "Disease");
//!
//! let mut sample = Sample::new("GSM1");
//! sample.push("diagnosis", "NAFLD");
//! sample.push("disease state", "NASH");
//!
//! let row = mapping.unify(&sample);
//! assert_eq!(row, vec![("Disease", Cell::Value("NAFLD".into()))]);
//! ```

mod mapping;


pub use mapping::UnificationMapping;

use indexmap::IndexSet;

use crate::model::{Cell, Sample};

/// Column holding raw category labels in the mapping table
pub const AVAILABLE_COLUMN: &str = "AVAILABLE_CATEGORIES";

/// Column holding unified category names in the mapping table
pub const UNIFIED_COLUMN: &str = "UNIFIED_CATEGORIES";

/// Value of the first pair in `sample` whose label is in `raw_labels`
pub fn unify_category(sample: &Sample, raw_labels: &IndexSet<String>) -> Cell {
    Cell::from_option(sample.first_value_in(raw_labels))
}
