/// Errors that can occur while retrieving experiment records
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Accession is empty or contains characters that cannot appear in one
    #[error("Invalid accession: {0:?}")]
    InvalidAccession(String),

    /// No sample records for the accession
    #[error("No sample records for {accession} at {location}")]
    NotFound {
        /// Requested accession
        accession: String,
        /// Directory or URL that was searched
        location: String,
    },

    /// I/O error reading or staging records
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP transport error
    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("GEO returned HTTP {status} for {accession}")]
    Status {
        /// Requested accession
        accession: String,
        /// HTTP status code
        status: u16,
    },
}
