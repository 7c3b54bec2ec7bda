use std::io::{self, BufRead};

use log::debug;

use super::{
    read_lines, BOUNDARY_MARKER, CHARACTERISTICS_PREFIX, CHARACTERISTIC_SEPARATOR, FIXED_TAGS,
    TAG_SEPARATOR,
};
use crate::model::Experiment;

/// Counters collected while parsing one experiment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines scanned
    pub lines: usize,
    /// Boundary lines seen
    pub boundaries: usize,
    /// Pairs recorded
    pub pairs: usize,
    /// Recognized tag lines that could not be resolved
    pub malformed: usize,
    /// Lines outside a sample block or with an unrecognized tag
    pub ignored: usize,
}

/// Classification of a single line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Opens a new block; `None` when the accession cannot be read
    Boundary(Option<&'a str>),
    /// A resolved (label, value) pair
    Pair(&'a str, &'a str),
    /// A recognized tag that could not be resolved
    Malformed,
    /// Anything else
    Other,
}

/// Parser for GEO SOFT sample records
pub struct SoftParser;

impl SoftParser {
    /// Parse the record lines of one experiment
    pub fn parse_lines<I, S>(accession: &str, lines: I) -> (Experiment, ParseStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut experiment = Experiment::new(accession);
        let mut stats = ParseStats::default();
        let mut current: Option<String> = None;

        for line in lines {
            stats.lines += 1;
            match classify(line.as_ref()) {
                Line::Boundary(sample) => {
                    stats.boundaries += 1;
                    current = sample.map(str::to_string);
                }
                Line::Pair(label, value) => match &current {
                    Some(sample) => {
                        experiment.record(sample, label, value);
                        stats.pairs += 1;
                    }
                    None => stats.ignored += 1,
                },
                Line::Malformed if current.is_some() => stats.malformed += 1,
                Line::Malformed | Line::Other => stats.ignored += 1,
            }
        }

        debug!(
            "{}: {} lines, {} samples, {} pairs, {} malformed, {} ignored",
            accession,
            stats.lines,
            experiment.sample_count(),
            stats.pairs,
            stats.malformed,
            stats.ignored
        );

        (experiment, stats)
    }

    /// Parse an in-memory record dump
    pub fn parse_str(accession: &str, text: &str) -> Experiment {
        Self::parse_lines(accession, text.lines()).0
    }

    /// Parse a record dump from a reader
    pub fn parse_reader<R: BufRead>(accession: &str, reader: R) -> io::Result<Experiment> {
        let lines = read_lines(reader)?;
        Ok(Self::parse_lines(accession, lines).0)
    }
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim_end_matches(['\n', '\r']);

    if line.starts_with(BOUNDARY_MARKER) {
        let sample = line
            .split_once(TAG_SEPARATOR)
            .map(|(_, id)| id.trim())
            .filter(|id| !id.is_empty());
        return Line::Boundary(sample);
    }

    if let Some((_, label)) = FIXED_TAGS.iter().find(|(tag, _)| line.starts_with(tag)) {
        return match tag_value(line) {
            Some(value) => Line::Pair(*label, value),
            None => Line::Malformed,
        };
    }

    if line.starts_with(CHARACTERISTICS_PREFIX) {
        return tag_value(line)
            .and_then(|value| value.split_once(CHARACTERISTIC_SEPARATOR))
            .map(|(label, value)| (label.trim(), value.trim()))
            .filter(|(label, value)| !label.is_empty() && !value.is_empty())
            .map_or(Line::Malformed, |(label, value)| Line::Pair(label, value));
    }

    Line::Other
}

/// Text after the first tag separator, trimmed; `None` if absent or empty
fn tag_value(line: &str) -> Option<&str> {
    line.split_once(TAG_SEPARATOR)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
