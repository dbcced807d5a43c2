//! Bench command - time repeated ranking calls.
//!
//! With a single query, each listed scorer is timed with `rank`. With
//! `--queries`, each scorer is timed with `batch_match` over the whole query
//! file and throughput is reported as queries per second.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{InputArgs, OutputFormat, ScoringArgs};
use crate::core::types::Scorer;
use crate::matching::batch::{batch_match_with_config, BatchConfig};
use crate::matching::engine::{rank, RankOptions};
use crate::parsing::candidates::{read_candidates, ReadOptions};
use crate::utils::timing::{time_runs, TimingStats};

/// Arguments for the bench command
#[derive(Args)]
pub struct BenchArgs {
    /// Query string; omit when --queries is given
    #[arg(required_unless_present = "queries", conflicts_with = "queries")]
    pub query: Option<String>,

    /// Candidate file (one per line, or TSV/CSV with --column; `.gz` allowed)
    #[arg(required = true)]
    pub candidates: PathBuf,

    /// Scorers to time, comma separated
    #[arg(long, value_delimiter = ',', default_value = "levenshtein,jaccard,token_sort")]
    pub scorers: Vec<String>,

    /// Number of timed runs per scorer
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Query file; switches to timing batch matching
    #[arg(long)]
    pub queries: Option<PathBuf>,

    /// Worker threads for batch timing (defaults to one per available core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    scorer: Scorer,
    queries: usize,
    candidates: usize,
    #[serde(flatten)]
    stats: TimingStats,
    queries_per_second: f64,
}

/// Execute the bench command
///
/// # Errors
///
/// Returns an error if any scorer, mode or weight is invalid, or an input
/// file cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: BenchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Resolve every scorer first so a typo fails before any timing starts
    let scorers = args
        .scorers
        .iter()
        .map(|name| Scorer::from_name(name.trim()))
        .collect::<Result<Vec<_>, _>>()?;

    let base = RankOptions::default()
        .with_mode(args.scoring.mode()?)
        .with_process(!args.scoring.no_process)
        .with_weights(args.scoring.hybrid_weights()?);

    let candidates = read_candidates(&args.candidates, &args.input.read_options())?;
    let queries = match (&args.queries, &args.query) {
        (Some(path), _) => read_candidates(path, &ReadOptions::default())?,
        (None, Some(query)) => vec![query.clone()],
        (None, None) => anyhow::bail!("Either QUERY or --queries is required"),
    };
    let config = BatchConfig {
        threads: args.threads,
    };
    let runs = args.runs as usize;

    let mut results = Vec::with_capacity(scorers.len());
    for scorer in scorers {
        let options = base.clone().with_scorer(scorer);
        if verbose {
            eprintln!("Timing {scorer}: {runs} runs over {} queries", queries.len());
        }

        let samples = if args.queries.is_some() {
            time_runs(runs, || batch_match_with_config(&queries, &candidates, &options, &config))?
        } else {
            time_runs(runs, || rank(&queries[0], &candidates, &options))?
        };

        if let Some(stats) = TimingStats::from_samples(&samples) {
            results.push(BenchResult {
                scorer,
                queries: queries.len(),
                candidates: candidates.len(),
                queries_per_second: stats.throughput(queries.len()),
                stats,
            });
        }
    }

    match format {
        OutputFormat::Text => print_text_results(&results),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Tsv => {
            println!("scorer\tqueries\tcandidates\truns\tmean_s\tstddev_s\tmin_s\tmax_s\tqueries_per_s");
            for r in &results {
                println!(
                    "{}\t{}\t{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.1}",
                    r.scorer,
                    r.queries,
                    r.candidates,
                    r.stats.runs,
                    r.stats.mean,
                    r.stats.stddev,
                    r.stats.min,
                    r.stats.max,
                    r.queries_per_second
                );
            }
        }
    }

    Ok(())
}

fn print_text_results(results: &[BenchResult]) {
    for r in results {
        println!(
            "\n{}: {} queries x {} candidates, {} runs",
            r.scorer, r.queries, r.candidates, r.stats.runs
        );
        println!(
            "   mean {:.3} ms (±{:.3}), min {:.3} ms, max {:.3} ms",
            r.stats.mean * 1e3,
            r.stats.stddev * 1e3,
            r.stats.min * 1e3,
            r.stats.max * 1e3
        );
        println!("   {:.1} queries/s", r.queries_per_second);
    }
}
