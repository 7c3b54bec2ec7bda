use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use geometa::experiments::read_experiment_list;
use geometa::pipeline::Pipeline;
use geometa::schema::listing_file_name;

use super::config::Config;
use super::{print_summary, RunArgs, Settings};

/// Write the listing of every category label found in the experiments
pub fn run(args: RunArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::resolve(args, &config.run)?;

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
    let schema = pipeline.discover(&experiments);

    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            settings.output_dir.display()
        )
    })?;
    let output = settings
        .output_dir
        .join(listing_file_name(Local::now().date_naive(), settings.format));
    schema
        .write_listing_to_path(&output)
        .with_context(|| format!("Failed to write category listing: {}", output.display()))?;

    info!("Fill in the UNIFIED_CATEGORIES column, then run `geometa report --mapping <FILE>`");

    let samples: usize = experiments.iter().map(|e| e.sample_count()).sum();
    print_summary(
        "Category discovery complete",
        &[
            ("Experiments", experiments.len().to_string()),
            ("Samples", samples.to_string()),
            ("Categories", schema.len().to_string()),
            ("Listing", output.display().to_string()),
        ],
    );

    Ok(())
}
