//! Sequential fetch, parse, collect and report pipeline.
//!
//! ```rust
//! use geometa::fetch::MemoryFetcher;
//! use geometa::pipeline::Pipeline;
//! use geometa::unify::UnificationMapping;
//!
//! let fetcher = MemoryFetcher::new()
//!     .with_record("GSE1", "^SAMPLE = GSM1\n!Sample_characteristics_ch1 = age: 40\n");
//! let mut pipeline = Pipeline::new(fetcher);
//!
//! let experiments = pipeline.fetch_experiments(&["GSE1"])?;
//! let schema = pipeline.discover(&experiments);
//! assert_eq!(schema.labels().collect::<Vec<_>>(), vec!["age"]);
//!
//! let mut mapping = UnificationMapping::new();
//! mapping.insert("age", "Age");
//! let report = pipeline.report(&experiments, &mapping);
//! assert_eq!(report.len(), 1);
//! # Ok::<(), geometa::pipeline::PipelineError>(())
//! ```

use log::{info, warn};

use crate::fetch::{FetchError, RecordFetcher};
use crate::model::Experiment;
use crate::report::Report;
use crate::schema::CategorySchema;
use crate::soft::SoftParser;
use crate::unify::UnificationMapping;

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Records for an experiment could not be retrieved
    #[error("Failed to fetch {accession}: {source}")]
    Fetch {
        /// Experiment accession
        accession: String,
        /// Underlying fetch error
        #[source]
        source: FetchError,
    },
}

/// Drives a [`RecordFetcher`] through parsing, discovery and reporting
pub struct Pipeline<F> {
    fetcher: F,
}

impl<F: RecordFetcher> Pipeline<F> {
    /// Create a pipeline over `fetcher`
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch and parse every experiment, in the order given
    ///
    /// The first fetch failure aborts the run.
    pub fn fetch_experiments<S: AsRef<str>>(
        &mut self,
        accessions: &[S],
    ) -> Result<Vec<Experiment>, PipelineError> {
        let mut experiments = Vec::with_capacity(accessions.len());

        for (i, accession) in accessions.iter().enumerate() {
            let accession = accession.as_ref().trim();
            info!("[{}/{}] {}", i + 1, accessions.len(), accession);

            let lines = self
                .fetcher
                .fetch(accession)
                .map_err(|source| PipelineError::Fetch {
                    accession: accession.to_string(),
                    source,
                })?;

            let (experiment, _) = SoftParser::parse_lines(accession, &lines);
            if experiment.sample_count() == 0 {
                warn!("{} yielded no samples", accession);
            }
            experiments.push(experiment);
        }

        let samples: usize = experiments.iter().map(Experiment::sample_count).sum();
        info!("Parsed {} samples from {} experiments", samples, experiments.len());

        Ok(experiments)
    }

    /// Distinct category labels over all experiments
    pub fn discover(&self, experiments: &[Experiment]) -> CategorySchema {
        let schema = CategorySchema::collect(experiments);
        info!("Discovered {} categories", schema.len());
        schema
    }

    /// Unified report over all experiments
    pub fn report(&self, experiments: &[Experiment], mapping: &UnificationMapping) -> Report {
        Report::build(experiments, mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::model::Cell;

    fn fetcher() -> MemoryFetcher {
        MemoryFetcher::new()
            .with_record(
                "GSE1",
                "^SAMPLE = GSM1\n!Sample_title = a\n!Sample_characteristics_ch1 = disease state: NAFLD\n",
            )
            .with_record(
                "GSE2",
                "^SAMPLE = GSM2\n!Sample_title = b\n!Sample_characteristics_ch1 = diagnosis: NASH\n",
            )
    }

    #[test]
    fn test_fetch_in_supplied_order() {
        let mut pipeline = Pipeline::new(fetcher());
        let experiments = pipeline.fetch_experiments(&["GSE2", "GSE1"]).unwrap();
        let order: Vec<_> = experiments.iter().map(|e| e.accession.as_str()).collect();
        assert_eq!(order, vec!["GSE2", "GSE1"]);
    }

    #[test]
    fn test_fetch_failure_aborts() {
        let mut pipeline = Pipeline::new(fetcher());
        let result = pipeline.fetch_experiments(&["GSE1", "GSE404", "GSE2"]);
        match result {
            Err(PipelineError::Fetch { accession, .. }) => assert_eq!(accession, "GSE404"),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_then_report() {
        let mut pipeline = Pipeline::new(fetcher());
        let experiments = pipeline.fetch_experiments(&["GSE1", "GSE2"]).unwrap();

        let schema = pipeline.discover(&experiments);
        assert_eq!(
            schema.labels().collect::<Vec<_>>(),
            vec!["Title", "disease state", "diagnosis"]
        );

        let mut mapping = UnificationMapping::new();
        mapping.insert("disease state", "Disease");
        mapping.insert("diagnosis", "Disease");
        let report = pipeline.report(&experiments, &mapping);

        assert_eq!(report.value(0, "Disease"), Some(Cell::Value("NAFLD".into())));
        assert_eq!(report.value(1, "Disease"), Some(Cell::Value("NASH".into())));
    }
}
