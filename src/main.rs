//! # geometa
//!
//! A command-line tool for collecting and normalizing GEO sample metadata.
//!
//! ## Usage
//!
//! ```bash
//! # 1. List every category label found in the experiments
//! geometa discover --experiments relevant_samples.tsv
//!
//! # 2. Fill in UNIFIED_CATEGORIES in the listing, then build the report
//! geometa report --experiments relevant_samples.tsv \
//!     --mapping available_categories.tsv --label NAFLD
//!
//! # Inspect how a single SOFT file parses
//! geometa inspect GSE1.soft.gz
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
