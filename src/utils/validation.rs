//! Centralized validation and helper functions.

use thiserror::Error;

/// Maximum number of candidates accepted from a single input file (DOS protection)
pub const MAX_CANDIDATES: usize = 10_000_000;

/// Errors raised while validating a ranking request.
///
/// Every variant is detected before any scoring work starts, so a failed call
/// never produces partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Unknown scorer: '{0}' (expected one of levenshtein, jaccard, token_sort, partial_ratio, hybrid)")]
    UnknownScorer(String),

    #[error("Unknown mode: '{0}' (expected 'full' or 'partial')")]
    UnknownMode(String),

    #[error("Invalid weight for '{scorer}': {weight} (weights must be finite and non-negative)")]
    InvalidWeight { scorer: String, weight: f64 },

    #[error("Hybrid weights cannot include the 'hybrid' scorer itself")]
    NestedHybrid,

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(f64),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Validate a single hybrid weight.
///
/// # Errors
///
/// Returns `MatchError::InvalidWeight` if the weight is negative, NaN or infinite.
pub fn validate_weight(scorer: &str, weight: f64) -> Result<f64, MatchError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(MatchError::InvalidWeight {
            scorer: scorer.to_string(),
            weight,
        })
    }
}

/// Validate a score threshold. Any non-NaN value is accepted; values outside
/// `[0, 1]` simply keep everything or nothing.
///
/// # Errors
///
/// Returns `MatchError::InvalidThreshold` for NaN.
pub fn validate_threshold(threshold: f64) -> Result<f64, MatchError> {
    if threshold.is_nan() {
        Err(MatchError::InvalidThreshold(threshold))
    } else {
        Ok(threshold)
    }
}

/// Convert a signed top-N value into a result limit. Negative means unbounded.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::utils::validation::top_n_limit;
///
/// assert_eq!(top_n_limit(-1), None);
/// assert_eq!(top_n_limit(0), Some(0));
/// assert_eq!(top_n_limit(5), Some(5));
/// ```
#[must_use]
pub fn top_n_limit(top_n: i64) -> Option<usize> {
    usize::try_from(top_n).ok()
}

/// Check whether a list already holding `count` candidates is full.
///
/// Call this with the current count BEFORE adding a new candidate.
#[must_use]
pub fn candidate_limit_reached(count: usize, limit: usize) -> bool {
    count >= limit
}

/// Safely convert usize to f64 for ratio calculations
#[inline]
#[must_use]
pub fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}
