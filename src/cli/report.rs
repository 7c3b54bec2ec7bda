use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

use geometa::experiments::read_experiment_list;
use geometa::pipeline::Pipeline;
use geometa::report::{report_file_name, ReportConfig};
use geometa::unify::UnificationMapping;

use super::config::Config;
use super::{print_summary, RunArgs, Settings};

/// Build and write the unified sample metadata report
pub fn run(
    args: RunArgs,
    mapping: Option<PathBuf>,
    label: Option<String>,
    missing_marker: Option<String>,
) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let mapping_path = mapping
        .or_else(|| config.run.mapping.clone())
        .context("No category mapping given; pass --mapping or set run.mapping")?;
    let label = label.or_else(|| config.run.label.clone());

    let mut report_config = ReportConfig::default();
    if let Some(marker) = missing_marker.or_else(|| config.run.missing_marker.clone()) {
        if marker.trim().is_empty() {
            anyhow::bail!("Missing marker must not be empty");
        }
        report_config.missing_marker = marker;
    }

    let settings = Settings::resolve(args, &config.run)?;

    // Both inputs are read before any download so a bad file fails fast
    let mapping = UnificationMapping::from_path(&mapping_path).with_context(|| {
        format!("Failed to read category mapping: {}", mapping_path.display())
    })?;
    let accessions = read_experiment_list(&settings.experiments).with_context(|| {
        format!(
            "Failed to read experiment list: {}",
            settings.experiments.display()
        )
    })?;

    let mut pipeline = Pipeline::new(settings.fetcher()?);
    let experiments = pipeline
        .fetch_experiments(&accessions[..])
        .context("Failed to retrieve experiment records")?;
    let report = pipeline.report(&experiments, &mapping);

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            settings.output_dir.display()
        )
    })?;
    let output = settings.output_dir.join(report_file_name(
        Local::now().date_naive(),
        label.as_deref(),
        settings.format,
    ));
    report
        .write_to_path(&output, &report_config)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    print_summary(
        "Report complete",
        &[
            ("Experiments", experiments.len().to_string()),
            ("Samples", report.len().to_string()),
            ("Columns", report.columns().len().to_string()),
            ("Report", output.display().to_string()),
        ],
    );

    Ok(())
}
