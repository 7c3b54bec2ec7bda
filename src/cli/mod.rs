use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use geometa::table::TableFormat;

mod discover;
mod inspect;
mod report;

mod config;
mod settings;

pub use settings::Settings;

/// geometa - GEO sample metadata normalization
#[derive(Parser)]
#[command(name = "geometa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output table format
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Tab-separated values
    Tsv,
    /// Comma-separated values
    Csv,
    /// Excel workbook
    Xlsx,
}

impl From<FormatArg> for TableFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tsv => TableFormat::Tsv,
            FormatArg::Csv => TableFormat::Csv,
            FormatArg::Xlsx => TableFormat::Xlsx,
        }
    }
}

/// Options shared by commands that retrieve experiments
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Table listing experiment accessions in a `Dataset` column
    #[arg(short = 'e', long, value_name = "FILE")]
    experiments: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory receiving output tables (default: current directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output table format (tsv, csv, xlsx)
    #[arg(short = 'f', long, value_enum)]
    format: Option<FormatArg>,

    /// Read SOFT records from this directory instead of downloading them
    #[arg(long, value_name = "DIR")]
    source_dir: Option<PathBuf>,

    /// Keep downloaded records in this directory
    #[arg(long, value_name = "DIR")]
    keep_downloads: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS", hide = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every category label found in the experiments
    Discover {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Build the unified sample metadata report
    Report {
        #[command(flatten)]
        run: RunArgs,

        /// Curated mapping with AVAILABLE_CATEGORIES and UNIFIED_CATEGORIES columns
        #[arg(short = 'm', long, value_name = "FILE")]
        mapping: Option<PathBuf>,

        /// Project label inserted into the report file name
        #[arg(short = 'l', long)]
        label: Option<String>,

        /// Text written for absent values (default: NA)
        #[arg(long, value_name = "TEXT")]
        missing_marker: Option<String>,
    },

    /// Print the parsed samples of a local SOFT file as JSON
    Inspect {
        /// SOFT file (.txt, .soft or .soft.gz)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Experiment accession (defaults to the file name)
        #[arg(long)]
        accession: Option<String>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Discover { run } => discover::run(run),
        Commands::Report {
            run,
            mapping,
            label,
            missing_marker,
        } => report::run(run, mapping, label, missing_marker),
        Commands::Inspect { file, accession } => inspect::run(file, accession),
    }
}

/// Print a titled key/value summary to stdout
fn print_summary(title: &str, entries: &[(&str, String)]) {
    #[cfg(feature = "colorized_output")]
    {
        use console::style;

        println!("{}", style(title).bold().cyan());
        for (key, value) in entries {
            println!("  {}: {}", style(key).bold(), value);
        }
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", title);
        for (key, value) in entries {
            println!("  {}: {}", key, value);
        }
    }
}
