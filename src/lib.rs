//! # fuzzy-rank
//!
//! A library for scoring and ranking candidate strings against a query.
//!
//! Given a query and a list of candidates, `fuzzy-rank` scores every candidate
//! with one of several interchangeable similarity algorithms, keeps those at or
//! above a threshold, sorts them by descending score and truncates to the top N.
//! Many queries can be ranked against the same candidates in parallel.
//!
//! ## Features
//!
//! - **Edit distance**: Normalized Levenshtein similarity over Unicode characters
//! - **Token overlap**: Jaccard similarity of whitespace token sets
//! - **Order-insensitive**: Levenshtein over lexicographically sorted tokens
//! - **Best alignment**: The shorter string against its best window of the longer one
//! - **Hybrid**: Weighted mean of any of the above
//! - **Partial mode**: Best-window alignment as a pre-stage for any scorer
//! - **Batch matching**: Queries spread over a rayon worker pool, results in query order
//!
//! ## Example
//!
//! ```rust
//! use fuzzy_rank::{batch_match, rank, Mode, RankOptions, Scorer};
//!
//! let candidates = ["apple pie", "banana bread", "Apple"];
//!
//! let matches = rank("apple", &candidates, &RankOptions::default()).unwrap();
//! assert_eq!(matches[0].text, "Apple");
//!
//! let options = RankOptions::default()
//!     .with_scorer(Scorer::PartialRatio)
//!     .with_threshold(0.9);
//! let results = batch_match(&["apple", "bread"], &candidates, &options).unwrap();
//! assert_eq!(results[1][0].text, "banana bread");
//!
//! let options = RankOptions::default().with_mode(Mode::Partial).with_top_n(Some(1));
//! let best = rank("pie", &candidates, &options).unwrap();
//! assert_eq!(best[0].text, "apple pie");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Scorer identifiers, match type, normalization
//! - [`matching`]: Similarity algorithms, hybrid scoring, ranking and batch matching
//! - [`parsing`]: Candidate file readers
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Validation and timing helpers

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::normalize::{normalize, tokenize};
pub use crate::core::types::*;
pub use crate::matching::batch::{batch_match, batch_match_with_config, BatchConfig};
pub use crate::matching::engine::{rank, RankOptions, RankingEngine};
pub use crate::matching::hybrid::{hybrid, HybridWeights};
pub use crate::matching::scoring::{edit_distance, jaccard, levenshtein, partial_ratio, token_sort};
pub use crate::utils::validation::MatchError;
