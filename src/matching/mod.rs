//! Similarity algorithms, hybrid scoring, ranking and batch matching.
//!
//! This module provides the core matching functionality:
//!
//! - [`scoring`]: The four base algorithms (`levenshtein`, `jaccard`, `token_sort`, `partial_ratio`)
//! - [`alignment`]: The `partial` mode pre-stage that narrows the longer string to its best window
//! - [`hybrid`]: Weighted combination of the base algorithms
//! - [`engine`]: Threshold, sort and top-N for one query
//! - [`batch`]: Many queries against a shared candidate set on a worker pool
//!
//! ## Ranking
//!
//! 1. **Validate**: Unknown scorers, bad weights and NaN thresholds fail before any scoring
//! 2. **Normalize**: Query and candidates are lowercased and whitespace-collapsed when `process` is set
//! 3. **Score**: Each candidate is scored exactly once (after alignment in `partial` mode)
//! 4. **Filter**: Scores below the threshold are dropped; equal scores are kept
//! 5. **Sort**: Descending score, ties broken by ascending candidate index
//! 6. **Truncate**: At most `top_n` matches when a limit is set
//!
//! ## Example
//!
//! ```rust
//! use fuzzy_rank::{rank, HybridWeights, RankOptions, Scorer};
//!
//! let weights = HybridWeights::from_pairs([("levenshtein", 0.5), ("token_sort", 0.5)]).unwrap();
//! let options = RankOptions::default()
//!     .with_scorer(Scorer::Hybrid)
//!     .with_weights(weights)
//!     .with_top_n(Some(1));
//!
//! let matches = rank("banana apple", &["apple banana", "cherry"], &options).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].text, "apple banana");
//! ```

pub mod alignment;
pub mod batch;
pub mod engine;
pub mod hybrid;
pub mod scoring;
