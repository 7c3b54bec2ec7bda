//! # SOFT Record Parsing
//!
//! GEO serves sample metadata as SOFT text: one `^SAMPLE = GSM...` line opens a
//! sample block, followed by `!Sample_<tag> = <value>` lines. Characteristics are
//! free text of the form `!Sample_characteristics_ch1 = <label>: <value>`, and a
//! sample may carry any number of them.
//!
//! ```text
//! ^SAMPLE = GSM1
//! !Sample_title = Liver biopsy
//! !Sample_source_name_ch1 = liver
//! !Sample_organism_ch1 = Homo sapiens
//! !Sample_characteristics_ch1 = disease state: NAFLD
//! !Sample_characteristics_ch1 = age: 54
//! ```
//!
//! Parsing is best-effort: lines that cannot be resolved into a (label, value)
//! pair are skipped, never reported as errors.

mod parser;


pub use parser::{ParseStats, SoftParser};

use std::io::{self, BufRead};

/// Fixed category labels produced from dedicated tags
pub mod labels {
    /// `!Sample_title`
    pub const TITLE: &str = "Title";
    /// `!Sample_source_name_ch1`
    pub const SOURCE: &str = "Source";
    /// `!Sample_organism_ch1`
    pub const ORGANISM: &str = "Organism";
    /// `!Sample_scan_protocol`
    pub const SCAN: &str = "Scan";
}

/// First character of an entity boundary line (`^SAMPLE = GSM1`)
pub const BOUNDARY_MARKER: char = '^';

/// Separator between a tag and its value
pub const TAG_SEPARATOR: &str = " = ";

/// Separator between a characteristic's label and its value
pub const CHARACTERISTIC_SEPARATOR: &str = ": ";

/// Prefix shared by all characteristic channels (`_ch1`, `_ch2`, ...)
pub const CHARACTERISTICS_PREFIX: &str = "!Sample_characteristics_ch";

/// Tags mapped to a fixed category label
pub const FIXED_TAGS: [(&str, &str); 4] = [
    ("!Sample_title", labels::TITLE),
    ("!Sample_source_name_ch1", labels::SOURCE),
    ("!Sample_scan_protocol", labels::SCAN),
    ("!Sample_organism_ch1", labels::ORGANISM),
];

/// Read all lines from a SOFT source
///
/// Invalid UTF-8 is replaced rather than rejected, so a single bad byte in a
/// contributor's free text does not abort the experiment.
pub fn read_lines<R: BufRead>(mut reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(lines)
}
