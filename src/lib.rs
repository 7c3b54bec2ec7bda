//! # geometa - GEO Sample Metadata Normalization
//!
//! `geometa` collects per-sample metadata of GEO series (GSE accessions), parses
//! the loosely structured SOFT records into ordered (category, value) pairs and
//! re-projects them through a curated category mapping into a single table with
//! one row per sample.
//!
//! ## Two-Phase Workflow
//!
//! Characteristic labels are free text chosen by each submitter, so they are
//! not merged automatically:
//!
//! 1. **Discover**: parse all experiments and list every distinct category
//!    label ([`schema::CategorySchema`]).
//! 2. **Curate**: fill in the `UNIFIED_CATEGORIES` column of that listing,
//!    mapping raw labels onto a smaller set of unified names.
//! 3. **Report**: re-run with the curated mapping to build the
//!    [`report::Report`].
//!
//! ## Quick Start
//!
//! ```rust
//! use geometa::model::Cell;
//! use geometa::report::Report;
//! use geometa::soft::SoftParser;
//! use geometa::unify::UnificationMapping;
//!
//! let experiment = SoftParser::parse_str(
//!     "GSE1",
//!     "^SAMPLE = GSM1\n\
//!      !Sample_title = Liver biopsy\n\
//!      !Sample_characteristics_ch1 = disease state: NAFLD\n",
//! );
//!
//! let mut mapping = UnificationMapping::new();
//! mapping.insert("disease state", "Disease");
//!
//! let report = Report::build([&experiment], &mapping);
//! assert_eq!(report.value(0, "Disease"), Some(Cell::Value("NAFLD".into())));
//! assert_eq!(report.value(0, "Scan protocol"), Some(Cell::Missing));
//! ```
//!
//! ## Architecture
//!
//! - [`fetch`]: record retrieval from GEO or local files
//! - [`soft`]: SOFT record parsing
//! - [`schema`]: category label discovery
//! - [`unify`]: curated category mapping
//! - [`report`]: report assembly and output
//! - [`experiments`]: experiment list input
//! - [`pipeline`]: sequential orchestration

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod experiments;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod soft;
pub mod table;
pub mod unify;

/// Re-export commonly used types for convenience
pub mod prelude {
    #[cfg(feature = "remote")]
    pub use crate::fetch::GeoFetcher;
    pub use crate::fetch::{FetchError, LocalFetcher, MemoryFetcher, RecordFetcher};
    pub use crate::model::{CategoryValue, Cell, Experiment, Sample};
    pub use crate::pipeline::{Pipeline, PipelineError};
    pub use crate::report::{Report, ReportConfig, ReportRow};
    pub use crate::schema::CategorySchema;
    pub use crate::soft::SoftParser;
    pub use crate::table::{Table, TableError, TableFormat};
    pub use crate::unify::UnificationMapping;
}
