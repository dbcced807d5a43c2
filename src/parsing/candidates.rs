//! Candidate list readers.
//!
//! Plain text files hold one candidate per line, kept verbatim. TSV and CSV
//! files hold one candidate per record, taken from a selected column with
//! quoting handled by the `csv` reader. Any of these may be gzip-compressed
//! (`.gz`). No scoring-relevant transformation happens here.

use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::utils::validation::{candidate_limit_reached, MAX_CANDIDATES};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid candidate file format: {0}")]
    InvalidFormat(String),

    #[error("Too many candidates: {count} exceeds maximum allowed ({limit})")]
    TooManyCandidates { count: usize, limit: usize },
}

/// Layout of a candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateFormat {
    /// One candidate per line
    Lines,
    /// Delimited records; the candidate is one column
    Delimited(u8),
}

impl CandidateFormat {
    /// Detect the layout from a path's extension, looking through `.gz`
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        if name.ends_with(".tsv") {
            Self::Delimited(b'\t')
        } else if name.ends_with(".csv") {
            Self::Delimited(b',')
        } else {
            Self::Lines
        }
    }
}

/// How to turn a file into a candidate list
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Zero-based column holding the candidate (delimited files only)
    pub column: usize,
    /// Skip the first record of a delimited file
    pub header: bool,
    /// Keep blank lines and empty fields as empty-string candidates
    pub keep_empty: bool,
}

/// Read candidates from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or is not valid UTF-8,
/// or any error from [`parse_candidates_text`].
pub fn read_candidates(path: &Path, options: &ReadOptions) -> Result<Vec<String>, ParseError> {
    let text = read_text(path)?;
    let candidates = parse_candidates_text(&text, CandidateFormat::from_path(path), options)?;
    debug!("Read {} candidates from {}", candidates.len(), path.display());
    Ok(candidates)
}

fn read_text(path: &Path) -> Result<String, ParseError> {
    let mut text = String::new();

    if path.as_os_str() == "-" {
        std::io::stdin().lock().read_to_string(&mut text)?;
        return Ok(text);
    }

    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        BufReader::new(GzDecoder::new(file)).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }
    Ok(text)
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Parse candidate text in the given layout.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a delimited record lacks the
/// selected column, `ParseError::Csv` for malformed delimited input, or
/// `ParseError::TooManyCandidates` if the limit is exceeded.
pub fn parse_candidates_text(
    text: &str,
    format: CandidateFormat,
    options: &ReadOptions,
) -> Result<Vec<String>, ParseError> {
    parse_with_limit(text, format, options, MAX_CANDIDATES)
}

fn parse_with_limit(
    text: &str,
    format: CandidateFormat,
    options: &ReadOptions,
    limit: usize,
) -> Result<Vec<String>, ParseError> {
    let mut candidates = Vec::new();
    let mut skipped = 0usize;

    match format {
        CandidateFormat::Lines => {
            for line in text.lines() {
                // Whitespace-only lines count as blank
                if line.trim().is_empty() && !options.keep_empty {
                    skipped += 1;
                    continue;
                }
                push_candidate(&mut candidates, line, limit)?;
            }
        }
        CandidateFormat::Delimited(delimiter) => {
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .has_headers(options.header)
                .comment(Some(b'#'))
                .flexible(true)
                .from_reader(text.as_bytes());

            for record in reader.records() {
                let record = record?;
                let value = record.get(options.column).ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "Line {} has no column {} (found {} fields)",
                        record.position().map_or(0, csv::Position::line),
                        options.column,
                        record.len()
                    ))
                })?;
                if value.is_empty() && !options.keep_empty {
                    skipped += 1;
                    continue;
                }
                push_candidate(&mut candidates, value, limit)?;
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {skipped} blank lines or empty fields");
    }

    Ok(candidates)
}

fn push_candidate(candidates: &mut Vec<String>, value: &str, limit: usize) -> Result<(), ParseError> {
    if candidate_limit_reached(candidates.len(), limit) {
        return Err(ParseError::TooManyCandidates {
            count: candidates.len() + 1,
            limit,
        });
    }
    candidates.push(value.to_string());
    Ok(())
}
