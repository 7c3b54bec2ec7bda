use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use tempfile::NamedTempFile;

use super::{validate_accession, FetchError, RecordFetcher};
use crate::soft::{read_lines, BOUNDARY_MARKER};

/// GEO accession query endpoint
pub const GEO_QUERY_URL: &str = "https://www.ncbi.nlm.nih.gov/geo/query/acc.cgi";

/// Fetcher downloading brief SOFT sample records from NCBI GEO
///
/// Each download is staged in a temporary file that is removed once parsed,
/// unless a keep directory is set, in which case it is retained as `<ACC>.txt`
/// (readable later by [`LocalFetcher`](super::LocalFetcher)). A response without
/// any `^` boundary line is reported as [`FetchError::NotFound`] and never kept.
pub struct GeoFetcher {
    client: Client,
    base_url: String,
    keep_dir: Option<PathBuf>,
}

impl GeoFetcher {
    /// Create a fetcher with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("geometa/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: GEO_QUERY_URL.to_string(),
            keep_dir: None,
        })
    }

    /// Use a preconfigured HTTP client (proxy, TLS or timeout settings)
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Query a different endpoint (mirrors, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Retain downloaded records in `dir` instead of discarding them
    pub fn keep_downloads(mut self, dir: impl Into<PathBuf>) -> Self {
        self.keep_dir = Some(dir.into());
        self
    }

    /// Query URL listing all samples of `accession`
    pub fn query_url(&self, accession: &str) -> String {
        format!(
            "{}?targ=gsm&acc={}&form=text&view=brief",
            self.base_url, accession
        )
    }

    fn stage(&self) -> Result<NamedTempFile, FetchError> {
        let staged = match &self.keep_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                NamedTempFile::new_in(dir)?
            }
            None => NamedTempFile::new()?,
        };
        Ok(staged)
    }
}

impl RecordFetcher for GeoFetcher {
    fn fetch(&mut self, accession: &str) -> Result<Vec<String>, FetchError> {
        let accession = validate_accession(accession)?;
        let url = self.query_url(accession);
        info!("Downloading {}", accession);
        debug!("GET {}", url);

        let mut response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                accession: accession.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut staged = self.stage()?;
        let bytes = response.copy_to(staged.as_file_mut())?;
        debug!("Staged {} bytes at {}", bytes, staged.path().display());

        let lines = read_lines(BufReader::new(staged.reopen()?))?;

        // GEO answers unknown accessions with 200 and a body without samples
        if !lines.iter().any(|line| line.starts_with(BOUNDARY_MARKER)) {
            return Err(FetchError::NotFound {
                accession: accession.to_string(),
                location: url,
            });
        }

        if let Some(dir) = &self.keep_dir {
            let kept = dir.join(format!("{}.txt", accession));
            staged.persist(&kept).map_err(|e| e.error)?;
            debug!("Kept {}", kept.display());
        }

        Ok(lines)
    }
}
