use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use log::debug;

use super::{validate_accession, FetchError, RecordFetcher};
use crate::soft::read_lines;

/// Extensions tried in order when looking up `<accession>.<ext>`
const EXTENSIONS: [&str; 3] = ["txt", "soft", "soft.gz"];

/// Fetcher over previously downloaded SOFT files in a directory
///
/// Looks for `<ACC>.txt`, `<ACC>.soft` and `<ACC>.soft.gz`, in that order.
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    dir: PathBuf,
}

impl LocalFetcher {
    /// Create a fetcher reading from `dir`
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn locate(&self, accession: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", accession, ext)))
            .find(|path| path.is_file())
    }
}

impl RecordFetcher for LocalFetcher {
    fn fetch(&mut self, accession: &str) -> Result<Vec<String>, FetchError> {
        let accession = validate_accession(accession)?;
        let path = self.locate(accession).ok_or_else(|| FetchError::NotFound {
            accession: accession.to_string(),
            location: self.dir.display().to_string(),
        })?;
        debug!("Reading {} from {}", accession, path.display());

        let file = File::open(&path)?;
        let lines = if path.to_string_lossy().ends_with(".gz") {
            read_lines(BufReader::new(GzDecoder::new(file)))?
        } else {
            read_lines(BufReader::new(file))?
        };
        Ok(lines)
    }
}
