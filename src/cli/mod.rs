//! Command-line interface for fuzzy-rank.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **rank**: Rank a candidate file against a single query
//! - **batch**: Rank a candidate file against every query in a second file
//! - **score**: Show every algorithm's score for one pair of strings
//! - **bench**: Time repeated ranking calls
//!
//! ## Usage
//!
//! ```text
//! # Top 5 products closest to a query
//! fuzzy-rank rank "apple pie" products.txt --top-n 5
//!
//! # Second CSV column, header row skipped, best-window comparison
//! fuzzy-rank rank "apple" products.csv --column 1 --header --mode partial
//!
//! # Weighted hybrid
//! fuzzy-rank rank "banana apple" products.txt --scorer hybrid \
//!     --weight levenshtein=0.5 --weight token_sort=0.5
//!
//! # Many queries at once, JSON output
//! fuzzy-rank batch queries.txt products.txt.gz --format json --threads 8
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::core::types::Mode;
use crate::matching::hybrid::HybridWeights;
use crate::parsing::candidates::ReadOptions;

pub mod batch;
pub mod bench;
pub mod rank;
pub mod score;

#[derive(Parser)]
#[command(name = "fuzzy-rank")]
#[command(version)]
#[command(about = "Fuzzy string matching and ranking")]
#[command(
    long_about = "fuzzy-rank scores candidate strings against a query with edit-distance, token-set, token-sort or best-window alignment similarity, optionally combined into a weighted hybrid.\n\nResults are filtered by a threshold, sorted by descending score (ties keep input order) and truncated to the top N. Batch mode ranks many queries against one candidate list in parallel."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank candidates against a single query
    Rank(rank::RankArgs),

    /// Rank candidates against every query in a file
    Batch(batch::BatchArgs),

    /// Score one pair of strings with every algorithm
    Score(score::ScoreArgs),

    /// Time repeated ranking calls
    #[command(allow_missing_positional = true)]
    Bench(bench::BenchArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Options shared by every command that scores strings
#[derive(clap::Args, Debug, Clone)]
pub struct ScoringArgs {
    /// Comparison mode: `full` compares whole strings, `partial` compares the
    /// shorter string against its best-aligned window of the longer one
    #[arg(long, default_value = "full")]
    pub mode: String,

    /// Compare strings exactly as given (no lowercasing or whitespace collapsing)
    #[arg(long)]
    pub no_process: bool,

    /// Hybrid weight as `scorer=weight` (repeatable)
    #[arg(long = "weight", value_name = "SCORER=WEIGHT")]
    pub weights: Vec<String>,

    /// JSON file mapping scorer names to hybrid weights; `--weight` entries override it
    #[arg(long)]
    pub weights_file: Option<PathBuf>,
}

impl ScoringArgs {
    /// Parse the comparison mode.
    ///
    /// # Errors
    ///
    /// Returns an error naming the mode if it is not recognized.
    pub fn mode(&self) -> anyhow::Result<Mode> {
        Ok(self.mode.parse()?)
    }

    /// Merge the weights file and `--weight` flags into validated hybrid weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the weights file cannot be read or parsed, a flag
    /// is malformed, or any weight fails validation.
    pub fn hybrid_weights(&self) -> anyhow::Result<HybridWeights> {
        let mut merged: BTreeMap<String, f64> = match &self.weights_file {
            Some(path) => load_weights_file(path)?,
            None => BTreeMap::new(),
        };

        for spec in &self.weights {
            let (name, value) = parse_weight_spec(spec)?;
            merged.insert(name, value);
        }

        Ok(HybridWeights::from_pairs(merged)?)
    }
}

/// Options controlling how candidate files are read
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Zero-based column holding the candidate in TSV/CSV files
    #[arg(long, default_value = "0")]
    pub column: usize,

    /// Skip the first row of TSV/CSV files
    #[arg(long)]
    pub header: bool,

    /// Keep blank lines as empty candidates
    #[arg(long)]
    pub keep_empty: bool,
}

impl InputArgs {
    #[must_use]
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            column: self.column,
            header: self.header,
            keep_empty: self.keep_empty,
        }
    }
}

fn load_weights_file(path: &Path) -> anyhow::Result<BTreeMap<String, f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Weights file {} is not a JSON object of numbers", path.display()))
}

fn parse_weight_spec(spec: &str) -> anyhow::Result<(String, f64)> {
    let (name, value) = spec
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid weight '{spec}': expected SCORER=WEIGHT"))?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid weight value in '{spec}'"))?;
    Ok((name.trim().to_string(), value))
}
