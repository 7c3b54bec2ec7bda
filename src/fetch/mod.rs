//! # Record Retrieval
//!
//! A [`RecordFetcher`] turns an experiment accession into the raw SOFT lines of
//! its samples. Fetchers own any staging they need and clean up after
//! themselves; the parser only ever sees lines.
//!
//! - [`GeoFetcher`]: downloads from NCBI GEO (requires the `remote` feature)
//! - [`LocalFetcher`]: reads previously downloaded files from a directory
//! - [`MemoryFetcher`]: serves records held in memory

mod error;
mod local;
#[cfg(feature = "remote")]
mod remote;


pub use error::FetchError;
pub use local::LocalFetcher;
#[cfg(feature = "remote")]
pub use remote::{GeoFetcher, GEO_QUERY_URL};

use std::collections::HashMap;

/// Source of raw experiment records
pub trait RecordFetcher {
    /// Raw SOFT lines for every sample of `accession`
    fn fetch(&mut self, accession: &str) -> Result<Vec<String>, FetchError>;
}

impl<F: RecordFetcher + ?Sized> RecordFetcher for Box<F> {
    fn fetch(&mut self, accession: &str) -> Result<Vec<String>, FetchError> {
        (**self).fetch(accession)
    }
}

/// Reject accessions that cannot name a GEO record or a file
pub fn validate_accession(accession: &str) -> Result<&str, FetchError> {
    let trimmed = accession.trim();
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    if trimmed.is_empty() || !trimmed.chars().all(allowed) {
        return Err(FetchError::InvalidAccession(accession.to_string()));
    }
    Ok(trimmed)
}

/// Fetcher over records held in memory, keyed by accession
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    records: HashMap<String, String>,
}

impl MemoryFetcher {
    /// Create an empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the record text for `accession`
    pub fn with_record(mut self, accession: impl Into<String>, text: impl Into<String>) -> Self {
        self.records.insert(accession.into(), text.into());
        self
    }
}

impl RecordFetcher for MemoryFetcher {
    fn fetch(&mut self, accession: &str) -> Result<Vec<String>, FetchError> {
        let accession = validate_accession(accession)?;
        self.records
            .get(accession)
            .map(|text| text.lines().map(str::to_string).collect())
            .ok_or_else(|| FetchError::NotFound {
                accession: accession.to_string(),
                location: "memory".to_string(),
            })
    }
}
