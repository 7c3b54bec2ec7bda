use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use geometa::schema::CategorySchema;
use geometa::soft::{read_lines, SoftParser};

/// Print the parsed samples of a local SOFT file as JSON
pub fn run(file: PathBuf, accession: Option<String>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let accession = accession.unwrap_or_else(|| accession_from_path(&file));
    let handle = File::open(&file).context("Failed to open file")?;
    let reader: Box<dyn BufRead> = if file.to_string_lossy().ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(handle)))
    } else {
        Box::new(BufReader::new(handle))
    };
    let lines = read_lines(reader).context("Failed to read SOFT records")?;

    let (experiment, stats) = SoftParser::parse_lines(&accession, &lines);
    info!(
        "{}: {} samples, {} pairs, {} malformed lines skipped",
        accession,
        experiment.sample_count(),
        stats.pairs,
        stats.malformed
    );
    info!(
        "{} distinct categories",
        CategorySchema::collect([&experiment]).len()
    );

    let json = serde_json::to_string_pretty(&experiment).context("Failed to serialize samples")?;
    println!("{}", json);

    Ok(())
}

/// `GSE1.soft.gz` -> `GSE1`
fn accession_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_string()
}
