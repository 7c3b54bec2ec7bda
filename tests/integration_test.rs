//! Integration tests for geometa
//!
//! These tests run the full pipeline from input tables and staged SOFT files to
//! the written report.

use flate2::write::GzEncoder;
use flate2::Compression;
use geometa::experiments::read_experiment_list;
use geometa::fetch::LocalFetcher;
use geometa::pipeline::{Pipeline, PipelineError};
use geometa::report::ReportConfig;
use geometa::table::{self, Table, TableError, TableFormat};
use geometa::unify::UnificationMapping;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

const GSE1_SOFT: &str = "^SERIES = GSE1
!Series_title = Liver disease cohort
^SAMPLE = GSM1
!Sample_title = Liver biopsy
!Sample_geo_accession = GSM1
!Sample_organism_ch1 = Homo sapiens
!Sample_source_name_ch1 = liver
!Sample_characteristics_ch1 = disease state: NAFLD
";

const GSE2_SOFT: &str = "^SAMPLE = GSM20
!Sample_title = Mouse liver, HFD
!Sample_source_name_ch1 = liver
!Sample_organism_ch1 = Mus musculus
!Sample_characteristics_ch1 = diet: high fat
!Sample_characteristics_ch1 = diagnosis: steatosis
!Sample_characteristics_ch1 = diagnosis: fibrosis
!Sample_scan_protocol = Agilent scanner
^SAMPLE = GSM21
!Sample_title = Mouse liver, chow
!Sample_source_name_ch1 = liver
!Sample_organism_ch1 = Mus musculus
!Sample_characteristics_ch1 = diet chow
";

fn write_gz(path: &Path, text: &str) {
    let file = fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// The single-sample scenario from list file to report file
#[test]
fn test_single_experiment_report() {
    let dir = tempdir().unwrap();
    let soft_dir = dir.path().join("soft");
    fs::create_dir(&soft_dir).unwrap();
    fs::write(soft_dir.join("GSE1.txt"), GSE1_SOFT).unwrap();

    let list = dir.path().join("relevant_samples.tsv");
    fs::write(&list, "Dataset\nGSE1\n").unwrap();
    let mapping_path = dir.path().join("available_categories.tsv");
    fs::write(
        &mapping_path,
        "AVAILABLE_CATEGORIES\tUNIFIED_CATEGORIES\ndisease state\tDisease\n",
    )
    .unwrap();

    let accessions = read_experiment_list(&list).unwrap();
    let mapping = UnificationMapping::from_path(&mapping_path).unwrap();

    let mut pipeline = Pipeline::new(LocalFetcher::new(&soft_dir));
    let experiments = pipeline.fetch_experiments(&accessions[..]).unwrap();
    let report = pipeline.report(&experiments, &mapping);

    let output = dir.path().join("report.tsv");
    report.write_to_path(&output, &ReportConfig::default()).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "GSE\tGSM\tTitle\tOrganism\tSource\tScan protocol\tDisease"
    );
    assert_eq!(
        lines[1],
        "GSE1\tGSM1\tLiver biopsy\tHomo sapiens\tliver\tNA\tNAFLD"
    );
}

/// Multiple experiments, gzip input, CSV tables and aliasing
#[test]
fn test_multi_experiment_csv_report() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("GSE1.soft"), GSE1_SOFT).unwrap();
    write_gz(&dir.path().join("GSE2.soft.gz"), GSE2_SOFT);

    let list = dir.path().join("experiments.csv");
    fs::write(&list, "Dataset,Comment\nGSE2,mouse\nGSE1,human\n").unwrap();
    let mapping_path = dir.path().join("mapping.csv");
    fs::write(
        &mapping_path,
        "AVAILABLE_CATEGORIES,UNIFIED_CATEGORIES\n\
         disease state,Disease\n\
         diagnosis,Disease\n\
         diet,Diet\n\
         Title,\n\
         tissue,Tissue\n",
    )
    .unwrap();

    let accessions = read_experiment_list(&list).unwrap();
    let mapping = UnificationMapping::from_path(&mapping_path).unwrap();

    let mut pipeline = Pipeline::new(LocalFetcher::new(dir.path()));
    let experiments = pipeline.fetch_experiments(&accessions[..]).unwrap();

    let schema = pipeline.discover(&experiments);
    assert_eq!(
        schema.labels().collect::<Vec<_>>(),
        vec![
            "Title",
            "Source",
            "Organism",
            "diet",
            "diagnosis",
            "Scan",
            "disease state"
        ]
    );

    let report = pipeline.report(&experiments, &mapping);
    let output = dir.path().join("out").join("report.csv");
    fs::create_dir(dir.path().join("out")).unwrap();
    report.write_to_path(&output, &ReportConfig::default()).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec![
            "GSE",
            "GSM",
            "Title",
            "Organism",
            "Source",
            "Scan protocol",
            "Disease",
            "Diet",
            "Tissue"
        ]
    );

    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        vec![
            "GSE2",
            "GSM20",
            "Mouse liver, HFD",
            "Mus musculus",
            "liver",
            "Agilent scanner",
            "steatosis",
            "high fat",
            "NA"
        ]
    );
    assert_eq!(
        rows[1],
        vec![
            "GSE2",
            "GSM21",
            "Mouse liver, chow",
            "Mus musculus",
            "liver",
            "NA",
            "NA",
            "NA",
            "NA"
        ]
    );
    assert_eq!(rows[2][0..2], ["GSE1", "GSM1"]);
    assert_eq!(rows[2][6], "NAFLD");
    assert!(rows.iter().flatten().all(|cell| !cell.is_empty()));
}

/// A missing record aborts before anything is written
#[test]
fn test_missing_experiment_aborts_run() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("GSE1.txt"), GSE1_SOFT).unwrap();

    let mut pipeline = Pipeline::new(LocalFetcher::new(dir.path()));
    let result = pipeline.fetch_experiments(&["GSE1", "GSE999"]);

    match result {
        Err(PipelineError::Fetch { accession, .. }) => assert_eq!(accession, "GSE999"),
        other => panic!("expected fetch failure, got {:?}", other),
    }
}

/// Malformed input tables are fatal
#[test]
fn test_malformed_inputs_are_fatal() {
    let dir = tempdir().unwrap();
    let mapping_path = dir.path().join("mapping.tsv");
    fs::write(&mapping_path, "RAW\tUNIFIED_CATEGORIES\nage\tAge\n").unwrap();

    assert!(matches!(
        UnificationMapping::from_path(&mapping_path),
        Err(TableError::MissingColumn(_))
    ));
    assert!(matches!(
        UnificationMapping::from_path(dir.path().join("absent.tsv")),
        Err(TableError::IoError(_))
    ));
}

/// The discovered listing, once curated, drives the report
#[test]
fn test_listing_round_trip_through_curation() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("GSE1.txt"), GSE1_SOFT).unwrap();

    let mut pipeline = Pipeline::new(LocalFetcher::new(dir.path()));
    let experiments = pipeline.fetch_experiments(&["GSE1"]).unwrap();
    let listing = dir.path().join("listing.tsv");
    pipeline
        .discover(&experiments)
        .write_listing_to_path(&listing)
        .unwrap();

    let curated: String = fs::read_to_string(&listing)
        .unwrap()
        .lines()
        .map(|line| {
            if line.starts_with("disease state\t") {
                "disease state\tCondition\n".to_string()
            } else {
                format!("{}\n", line)
            }
        })
        .collect();
    fs::write(&listing, curated).unwrap();

    let mapping = UnificationMapping::from_path(&listing).unwrap();
    assert_eq!(mapping.unified_names().collect::<Vec<_>>(), vec!["Condition"]);

    let report = pipeline.report(&experiments, &mapping);
    assert_eq!(report.columns().last().map(String::as_str), Some("Condition"));
    assert_eq!(
        report.value(0, "Condition").and_then(|c| c.as_value().map(String::from)),
        Some("NAFLD".to_string())
    );
}

/// Spreadsheet inputs produce a spreadsheet report
#[test]
fn test_workbook_inputs_and_report() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("GSE1.txt"), GSE1_SOFT).unwrap();

    let list = dir.path().join("relevant_samples.xlsx");
    table::write_table(
        fs::File::create(&list).unwrap(),
        TableFormat::Xlsx,
        vec![vec!["Dataset", "Disease"], vec!["GSE1", "NAFLD"]],
    )
    .unwrap();
    let mapping_path = dir.path().join("available_categories.xlsx");
    table::write_table(
        fs::File::create(&mapping_path).unwrap(),
        TableFormat::Xlsx,
        vec![
            vec!["AVAILABLE_CATEGORIES", "UNIFIED_CATEGORIES"],
            vec!["disease state", "Disease"],
            vec!["", "Batch"],
        ],
    )
    .unwrap();

    let accessions = read_experiment_list(&list).unwrap();
    assert_eq!(accessions, vec!["GSE1"]);
    let mapping = UnificationMapping::from_path(&mapping_path).unwrap();

    let mut pipeline = Pipeline::new(LocalFetcher::new(dir.path()));
    let experiments = pipeline.fetch_experiments(&accessions[..]).unwrap();
    let output = dir.path().join("report.xlsx");
    pipeline
        .report(&experiments, &mapping)
        .write_to_path(&output, &ReportConfig::default())
        .unwrap();

    let written = Table::from_path(&output).unwrap();
    assert_eq!(
        written.headers(),
        &["GSE", "GSM", "Title", "Organism", "Source", "Scan protocol", "Disease", "Batch"]
    );
    let rows: Vec<_> = written.rows().collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0],
        &["GSE1", "GSM1", "Liver biopsy", "Homo sapiens", "liver", "NA", "NAFLD", "NA"]
    );
}

/// Table files with an unknown extension are rejected up front
#[test]
fn test_unsupported_table_extension() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("relevant_samples.ods");
    fs::write(&list, "Dataset\nGSE1\n").unwrap();

    assert!(matches!(
        read_experiment_list(&list),
        Err(TableError::UnsupportedFormat(_))
    ));
}
