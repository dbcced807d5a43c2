//! Rank command - score a candidate file against one query.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{InputArgs, OutputFormat, ScoringArgs};
use crate::core::types::{Match, Scorer};
use crate::matching::engine::{rank, RankOptions};
use crate::parsing::candidates::read_candidates;
use crate::utils::validation::top_n_limit;

/// Arguments for the rank command
#[derive(Args)]
pub struct RankArgs {
    /// Query string
    #[arg(required = true)]
    pub query: String,

    /// Candidate file (one per line, or TSV/CSV with --column; `.gz` allowed; `-` for stdin)
    #[arg(required = true)]
    pub candidates: PathBuf,

    /// Scorer: levenshtein, jaccard, token_sort, partial_ratio or hybrid
    #[arg(short, long, default_value = "levenshtein")]
    pub scorer: String,

    /// Drop candidates scoring below this value (equal scores are kept)
    #[arg(short, long, default_value = "0.0")]
    pub threshold: f64,

    /// Maximum number of matches; negative returns all
    #[arg(short = 'n', long, default_value = "-1", allow_negative_numbers = true)]
    pub top_n: i64,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Build validated ranking options from the shared CLI arguments.
///
/// # Errors
///
/// Returns an error for an unknown scorer or mode, or invalid weights.
pub fn build_options(
    scorer: &str,
    threshold: f64,
    top_n: i64,
    scoring: &ScoringArgs,
) -> anyhow::Result<RankOptions> {
    let options = RankOptions::default()
        .with_scorer(Scorer::from_name(scorer)?)
        .with_mode(scoring.mode()?)
        .with_process(!scoring.no_process)
        .with_threshold(threshold)
        .with_top_n(top_n_limit(top_n))
        .with_weights(scoring.hybrid_weights()?);
    options.validate()?;
    Ok(options)
}

/// Execute the rank command
///
/// # Errors
///
/// Returns an error if the options are invalid or the candidate file cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: RankArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Validate before touching the candidate file
    let options = build_options(&args.scorer, args.threshold, args.top_n, &args.scoring)?;

    let candidates = read_candidates(&args.candidates, &args.input.read_options())?;
    if verbose {
        eprintln!(
            "Ranking {} candidates with {} ({} mode)",
            candidates.len(),
            options.scorer,
            options.mode
        );
    }

    let matches = rank(&args.query, &candidates, &options)?;

    match format {
        OutputFormat::Text => print_text_matches(&args.query, &matches),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "query": args.query,
                "matches": matches,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("query\trank\tindex\tscore\tcandidate");
            print_tsv_rows(&args.query, &matches);
        }
    }

    Ok(())
}

pub(crate) fn print_text_matches(query: &str, matches: &[Match]) {
    println!("Query: {query}");
    if matches.is_empty() {
        println!("   (no matches)");
        return;
    }
    for (rank, m) in matches.iter().enumerate() {
        println!("   {:>3}. {:.4}  [{}] {}", rank + 1, m.score, m.index, m.text);
    }
}

pub(crate) fn print_tsv_rows(query: &str, matches: &[Match]) {
    for (rank, m) in matches.iter().enumerate() {
        println!("{}\t{}\t{}\t{:.6}\t{}", query, rank + 1, m.index, m.score, m.text);
    }
}
