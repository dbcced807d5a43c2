use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::types::{Algorithm, Scorer};
use crate::utils::validation::{validate_weight, MatchError};

/// Validated per-algorithm weights for the hybrid scorer.
///
/// Keys are kept in [`Algorithm`] order so the weighted sum is always
/// accumulated in the same order. Absent algorithms weigh 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct HybridWeights {
    weights: BTreeMap<Algorithm, f64>,
}

impl HybridWeights {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build weights from identifier → weight pairs.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::UnknownScorer` for an unrecognized identifier,
    /// `MatchError::NestedHybrid` if `hybrid` itself is named, or
    /// `MatchError::InvalidWeight` for a negative or non-finite weight.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut weights = Self::new();
        for (name, weight) in pairs {
            let algorithm = Scorer::from_name(name.as_ref())?
                .algorithm()
                .ok_or(MatchError::NestedHybrid)?;
            weights.set(algorithm, weight)?;
        }
        Ok(weights)
    }

    /// Set the weight for one algorithm.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidWeight` for a negative or non-finite weight.
    pub fn set(&mut self, algorithm: Algorithm, weight: f64) -> Result<(), MatchError> {
        let weight = validate_weight(algorithm.as_str(), weight)?;
        self.weights.insert(algorithm, weight);
        Ok(())
    }

    /// Builder-style [`set`](Self::set)
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidWeight` for a negative or non-finite weight.
    pub fn with(mut self, algorithm: Algorithm, weight: f64) -> Result<Self, MatchError> {
        self.set(algorithm, weight)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, algorithm: Algorithm) -> f64 {
        self.weights.get(&algorithm).copied().unwrap_or(0.0)
    }

    /// Algorithms with a strictly positive weight, in summation order
    pub fn active(&self) -> impl Iterator<Item = (Algorithm, f64)> + '_ {
        self.weights
            .iter()
            .filter(|(_, w)| **w > 0.0)
            .map(|(a, w)| (*a, *w))
    }

    /// Sum of all positive weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.active().map(|(_, w)| w).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

impl TryFrom<HashMap<String, f64>> for HybridWeights {
    type Error = MatchError;

    fn try_from(map: HashMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<HybridWeights> for BTreeMap<String, f64> {
    fn from(weights: HybridWeights) -> Self {
        weights
            .weights
            .into_iter()
            .map(|(a, w)| (a.as_str().to_string(), w))
            .collect()
    }
}

/// Weighted mean of the base algorithms on `(a, b)`.
///
/// Only algorithms with a positive weight are computed. The accumulated
/// `score * weight` sum is divided by the total of those weights; a total of
/// zero yields 0.0.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::{hybrid, levenshtein, token_sort, Algorithm, HybridWeights};
///
/// let weights = HybridWeights::new()
///     .with(Algorithm::Levenshtein, 0.5).unwrap()
///     .with(Algorithm::TokenSort, 0.5).unwrap();
///
/// let (a, b) = ("apple banana", "banana apple");
/// let expected = 0.5 * levenshtein(a, b) + 0.5 * token_sort(a, b);
/// assert!((hybrid(a, b, &weights) - expected).abs() < 1e-9);
/// ```
#[must_use]
pub fn hybrid(a: &str, b: &str, weights: &HybridWeights) -> f64 {
    let mut weighted = 0.0;
    let mut total = 0.0;

    for (algorithm, weight) in weights.active() {
        weighted += algorithm.score(a, b) * weight;
        total += weight;
    }

    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}
