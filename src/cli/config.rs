//! TOML configuration file support.
//!
//! Instead of repeating paths on every run, settings can live in a config file:
//!
//! ```toml
//! # geometa.toml
//! [run]
//! experiments = "relevant_samples.tsv"
//! mapping = "available_categories.tsv"
//! output_dir = "reports"
//! label = "NAFLD"
//! missing_marker = "NA"
//! format = "tsv"            # tsv, csv or xlsx
//! source_dir = "soft"        # read local SOFT files instead of downloading
//! keep_downloads = "soft"    # keep downloaded records here
//! timeout_secs = 60
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use geometa::table::TableFormat;

/// Root configuration structure for geometa.toml files
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Run settings shared by all commands
    #[serde(default)]
    pub run: RunConfig,
}

/// Settings for discover and report runs
#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    /// Table listing experiment accessions in a `Dataset` column
    pub experiments: Option<PathBuf>,

    /// Curated category mapping table
    pub mapping: Option<PathBuf>,

    /// Directory receiving the listing and the report
    pub output_dir: Option<PathBuf>,

    /// Project label inserted into the report file name
    pub label: Option<String>,

    /// Text written for absent values
    pub missing_marker: Option<String>,

    /// Output table format
    pub format: Option<TableFormat>,

    /// Read records from this directory instead of downloading them
    pub source_dir: Option<PathBuf>,

    /// Keep downloaded records in this directory
    pub keep_downloads: Option<PathBuf>,

    /// HTTP timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise an empty configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
