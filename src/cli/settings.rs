use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

use geometa::fetch::{LocalFetcher, RecordFetcher};
use geometa::table::TableFormat;

use super::config::RunConfig;
use super::RunArgs;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Run settings after merging command-line flags over the config file
#[derive(Debug)]
pub struct Settings {
    pub experiments: PathBuf,
    pub output_dir: PathBuf,
    pub format: TableFormat,
    pub source_dir: Option<PathBuf>,
    pub keep_downloads: Option<PathBuf>,
    pub timeout: Duration,
}

impl Settings {
    pub fn resolve(args: RunArgs, config: &RunConfig) -> Result<Self> {
        let experiments = args
            .experiments
            .or_else(|| config.experiments.clone())
            .context("No experiment list given; pass --experiments or set run.experiments")?;

        let settings = Self {
            experiments,
            output_dir: args
                .output_dir
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            format: args
                .format
                .map(TableFormat::from)
                .or(config.format)
                .unwrap_or_default(),
            source_dir: args.source_dir.or_else(|| config.source_dir.clone()),
            keep_downloads: args.keep_downloads.or_else(|| config.keep_downloads.clone()),
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(config.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Local files when a source directory is set, GEO otherwise
    pub fn fetcher(&self) -> Result<Box<dyn RecordFetcher>> {
        if let Some(dir) = &self.source_dir {
            if !dir.is_dir() {
                anyhow::bail!("Source directory does not exist: {}", dir.display());
            }
            return Ok(Box::new(LocalFetcher::new(dir)));
        }
        self.remote_fetcher()
    }

    #[cfg(feature = "remote")]
    fn remote_fetcher(&self) -> Result<Box<dyn RecordFetcher>> {
        let mut fetcher = geometa::fetch::GeoFetcher::new(self.timeout)
            .context("Failed to create HTTP client")?;
        if let Some(dir) = &self.keep_downloads {
            fetcher = fetcher.keep_downloads(dir);
        }
        Ok(Box::new(fetcher))
    }

    #[cfg(not(feature = "remote"))]
    fn remote_fetcher(&self) -> Result<Box<dyn RecordFetcher>> {
        anyhow::bail!("Built without the `remote` feature; pass --source-dir to read local records")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let config = RunConfig {
            experiments: Some("from_config.tsv".into()),
            output_dir: Some("config_out".into()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let args = RunArgs {
            output_dir: Some("flag_out".into()),
            ..Default::default()
        };

        let settings = Settings::resolve(args, &config).unwrap();
        assert_eq!(settings.experiments, PathBuf::from("from_config.tsv"));
        assert_eq!(settings.output_dir, PathBuf::from("flag_out"));
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.format, TableFormat::Tsv);
    }

    #[test]
    fn test_experiment_list_required() {
        assert!(Settings::resolve(RunArgs::default(), &RunConfig::default()).is_err());
    }

    #[test]
    fn test_missing_source_dir_is_rejected() {
        let args = RunArgs {
            experiments: Some("list.tsv".into()),
            source_dir: Some("/nonexistent/soft".into()),
            ..Default::default()
        };
        let settings = Settings::resolve(args, &RunConfig::default()).unwrap();
        assert!(settings.fetcher().is_err());
    }
}
