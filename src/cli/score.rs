//! Score command - compare two strings directly with every algorithm.
//!
//! Useful for understanding why a candidate ranks where it does.

use clap::Args;

use crate::cli::{OutputFormat, ScoringArgs};
use crate::core::normalize::normalize;
use crate::core::types::{Algorithm, Mode};
use crate::matching::alignment::{align, score_with_mode};
use crate::matching::hybrid::{hybrid, HybridWeights};

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// First string
    #[arg(required = true)]
    pub a: String,

    /// Second string
    #[arg(required = true)]
    pub b: String,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Every algorithm's score for one pair
struct PairScores {
    a: String,
    b: String,
    mode: Mode,
    aligned: Option<(String, String)>,
    scores: Vec<(Algorithm, f64)>,
    hybrid: Option<f64>,
}

fn compute_scores(a: &str, b: &str, mode: Mode, process: bool, weights: &HybridWeights) -> PairScores {
    let a = normalize(a, process).into_owned();
    let b = normalize(b, process).into_owned();

    let scores = Algorithm::ALL
        .iter()
        .map(|algorithm| {
            let score = score_with_mode(mode, &a, &b, |x, y| algorithm.score(x, y));
            (*algorithm, score)
        })
        .collect();

    let hybrid_score = (!weights.is_empty())
        .then(|| score_with_mode(mode, &a, &b, |x, y| hybrid(x, y, weights)));

    let aligned = match mode {
        Mode::Full => None,
        Mode::Partial => {
            let (x, y) = align(&a, &b);
            Some((x.to_string(), y.to_string()))
        }
    };

    PairScores {
        a,
        b,
        mode,
        aligned,
        scores,
        hybrid: hybrid_score,
    }
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the mode or weights are invalid.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mode = args.scoring.mode()?;
    let weights = args.scoring.hybrid_weights()?;
    let result = compute_scores(&args.a, &args.b, mode, !args.scoring.no_process, &weights);

    if verbose {
        eprintln!("Compared as: {:?} vs {:?}", result.a, result.b);
    }

    match format {
        OutputFormat::Text => print_text_scores(&result),
        OutputFormat::Json => {
            let mut scores = serde_json::Map::new();
            for (algorithm, score) in &result.scores {
                scores.insert(algorithm.to_string(), serde_json::json!(score));
            }
            if let Some(score) = result.hybrid {
                scores.insert("hybrid".to_string(), serde_json::json!(score));
            }
            let output = serde_json::json!({
                "a": result.a,
                "b": result.b,
                "mode": result.mode.to_string(),
                "aligned": result.aligned.as_ref().map(|(x, y)| [x, y]),
                "scores": scores,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("scorer\tscore");
            for (algorithm, score) in &result.scores {
                println!("{algorithm}\t{score:.6}");
            }
            if let Some(score) = result.hybrid {
                println!("hybrid\t{score:.6}");
            }
        }
    }

    Ok(())
}

fn print_text_scores(result: &PairScores) {
    println!("\nComparing ({} mode): {:?} vs {:?}", result.mode, result.a, result.b);
    if let Some((x, y)) = &result.aligned {
        println!("   Aligned: {x:?} vs {y:?}");
    }
    println!();
    for (algorithm, score) in &result.scores {
        println!("   {:<14} {:.4}", algorithm.as_str(), score);
    }
    if let Some(score) = result.hybrid {
        println!("   {:<14} {:.4}", "hybrid", score);
    }
}
