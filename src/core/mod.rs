//! Core data types for fuzzy ranking.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Scorer`], [`Algorithm`]: Closed set of scoring strategies, selected by identifier
//! - [`Mode`]: Whole-string or best-window comparison
//! - [`Match`]: A scored candidate carrying its original index
//! - [`normalize`](normalize::normalize): Optional case folding and whitespace collapsing
//!
//! ## Scorer Identifiers
//!
//! | Identifier      | Compares                              |
//! |-----------------|---------------------------------------|
//! | `levenshtein`   | Characters, whole string              |
//! | `jaccard`       | Token sets                            |
//! | `token_sort`    | Characters after sorting tokens       |
//! | `partial_ratio` | Shorter string against best window    |
//! | `hybrid`        | Weighted mean of the above            |

pub mod normalize;
pub mod types;
