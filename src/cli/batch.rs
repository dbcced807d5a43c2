//! Batch command - rank a candidate file against every query in a query file.

use std::path::PathBuf;

use clap::Args;

use crate::cli::rank::{build_options, print_text_matches, print_tsv_rows};
use crate::cli::{InputArgs, OutputFormat, ScoringArgs};
use crate::matching::batch::{batch_match_with_config, BatchConfig};
use crate::parsing::candidates::{read_candidates, ReadOptions};

/// Arguments for the batch command
#[derive(Args)]
pub struct BatchArgs {
    /// Query file, one query per line (`.gz` allowed)
    #[arg(required = true)]
    pub queries: PathBuf,

    /// Candidate file (one per line, or TSV/CSV with --column; `.gz` allowed)
    #[arg(required = true)]
    pub candidates: PathBuf,

    /// Scorer: levenshtein, jaccard, token_sort, partial_ratio or hybrid
    #[arg(short, long, default_value = "levenshtein")]
    pub scorer: String,

    /// Drop candidates scoring below this value (equal scores are kept)
    #[arg(short, long, default_value = "0.0")]
    pub threshold: f64,

    /// Maximum number of matches per query; negative returns all
    #[arg(short = 'n', long, default_value = "-1", allow_negative_numbers = true)]
    pub top_n: i64,

    /// Worker threads (defaults to one per available core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute the batch command
///
/// # Errors
///
/// Returns an error if the options are invalid, either file cannot be read,
/// or the worker pool cannot be created.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: BatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let options = build_options(&args.scorer, args.threshold, args.top_n, &args.scoring)?;

    let queries = read_candidates(&args.queries, &ReadOptions::default())?;
    let candidates = read_candidates(&args.candidates, &args.input.read_options())?;
    if verbose {
        eprintln!(
            "Matching {} queries against {} candidates with {} ({} mode)",
            queries.len(),
            candidates.len(),
            options.scorer,
            options.mode
        );
    }

    let config = BatchConfig {
        threads: args.threads,
    };
    let results = batch_match_with_config(&queries, &candidates, &options, &config)?;

    match format {
        OutputFormat::Text => {
            for (query, matches) in queries.iter().zip(&results) {
                print_text_matches(query, matches);
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = queries
                .iter()
                .zip(&results)
                .map(|(query, matches)| {
                    serde_json::json!({
                        "query": query,
                        "matches": matches,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("query\trank\tindex\tscore\tcandidate");
            for (query, matches) in queries.iter().zip(&results) {
                print_tsv_rows(query, matches);
            }
        }
    }

    Ok(())
}
