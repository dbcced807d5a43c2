use std::borrow::Cow;

use tracing::debug;

use crate::core::normalize::normalize;
use crate::core::types::{Match, Mode, Scorer};
use crate::matching::alignment::score_with_mode;
use crate::matching::hybrid::{hybrid, HybridWeights};
use crate::utils::validation::{top_n_limit, validate_threshold, MatchError};

/// Default minimum score for a candidate to be kept
pub const DEFAULT_THRESHOLD: f64 = 0.0;

/// Options controlling a ranking call
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Scoring strategy
    pub scorer: Scorer,
    /// Whole-string or best-window comparison
    pub mode: Mode,
    /// Lowercase and collapse whitespace before scoring
    pub process: bool,
    /// Candidates scoring below this are dropped; equal scores are kept
    pub threshold: f64,
    /// Maximum number of matches to return; `None` returns all
    pub top_n: Option<usize>,
    /// Per-algorithm weights, used only by [`Scorer::Hybrid`]
    pub weights: HybridWeights,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            scorer: Scorer::default(),
            mode: Mode::default(),
            process: true,
            threshold: DEFAULT_THRESHOLD,
            top_n: None,
            weights: HybridWeights::default(),
        }
    }
}

impl RankOptions {
    /// Build options from the string-typed call surface: scorer and mode by
    /// identifier, a signed `top_n` where negative means unbounded, and a
    /// weight map keyed by scorer identifier.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::UnknownScorer` / `MatchError::UnknownMode` for
    /// unrecognized identifiers, or any weight validation error.
    pub fn from_parts<I, K>(
        scorer: &str,
        mode: &str,
        process: bool,
        threshold: f64,
        top_n: i64,
        weights: I,
    ) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        Ok(Self {
            scorer: Scorer::from_name(scorer)?,
            mode: mode.parse()?,
            process,
            threshold: validate_threshold(threshold)?,
            top_n: top_n_limit(top_n),
            weights: HybridWeights::from_pairs(weights)?,
        })
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_process(mut self, process: bool) -> Self {
        self.process = process;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: HybridWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Check everything that can be invalid before any scoring starts.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidThreshold` for a NaN threshold.
    pub fn validate(&self) -> Result<(), MatchError> {
        validate_threshold(self.threshold)?;
        Ok(())
    }
}

/// Candidates after optional normalization, paired with their original text.
///
/// Built once and shared read-only between queries.
#[derive(Debug)]
pub struct PreparedCandidates<'a> {
    entries: Vec<(&'a str, Cow<'a, str>)>,
}

impl<'a> PreparedCandidates<'a> {
    pub fn new<S: AsRef<str>>(candidates: &'a [S], process: bool) -> Self {
        let entries = candidates
            .iter()
            .map(|c| {
                let original = c.as_ref();
                (original, normalize(original, process))
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(index, original, processed)` triples in input order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a str, &str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (original, processed))| (i, *original, &**processed))
    }
}

/// Ranks candidates against a query under fixed, validated options
#[derive(Debug, Clone)]
pub struct RankingEngine {
    options: RankOptions,
}

impl RankingEngine {
    /// Create an engine, validating the options up front.
    ///
    /// # Errors
    ///
    /// Returns any error from [`RankOptions::validate`].
    pub fn new(options: RankOptions) -> Result<Self, MatchError> {
        options.validate()?;
        Ok(Self { options })
    }

    #[must_use]
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Score an already-normalized pair with the configured scorer and mode
    #[must_use]
    pub fn score(&self, query: &str, candidate: &str) -> f64 {
        let options = &self.options;
        score_with_mode(options.mode, query, candidate, |a, b| {
            match options.scorer.algorithm() {
                Some(algorithm) => algorithm.score(a, b),
                None => hybrid(a, b, &options.weights),
            }
        })
    }

    /// Rank raw candidates against a query
    pub fn rank<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<Match> {
        let prepared = PreparedCandidates::new(candidates, self.options.process);
        self.rank_prepared(query, &prepared)
    }

    /// Rank candidates that were normalized with this engine's `process` setting.
    ///
    /// Each candidate is scored exactly once. Matches below the threshold are
    /// dropped, the rest sorted by descending score with ties broken by
    /// ascending candidate index, then truncated to `top_n`.
    pub fn rank_prepared(&self, query: &str, candidates: &PreparedCandidates<'_>) -> Vec<Match> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let query = normalize(query, self.options.process);
        let threshold = self.options.threshold;

        let mut matches: Vec<Match> = candidates
            .iter()
            .filter_map(|(index, original, processed)| {
                let score = self.score(&query, processed);
                (score >= threshold).then(|| Match::new(original, score, index))
            })
            .collect();

        matches.sort_by(Match::rank_cmp);

        if let Some(limit) = self.options.top_n {
            matches.truncate(limit);
        }

        matches
    }
}

/// Rank `candidates` against `query`.
///
/// # Errors
///
/// Returns a `MatchError` if the options are invalid; no scoring is done in
/// that case.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::{rank, RankOptions};
///
/// let matches = rank("apple", &["banana", "apple pie", "Apple"], &RankOptions::default()).unwrap();
/// assert_eq!(matches[0].text, "Apple");
/// assert_eq!(matches[0].score, 1.0);
/// ```
pub fn rank<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    options: &RankOptions,
) -> Result<Vec<Match>, MatchError> {
    let engine = RankingEngine::new(options.clone())?;
    debug!(
        "Ranking {} candidates with scorer={} mode={}",
        candidates.len(),
        options.scorer,
        options.mode
    );
    Ok(engine.rank(query, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scoring::{levenshtein, token_sort};

    fn candidates() -> Vec<&'static str> {
        vec!["apple pie", "banana", "apple", "pineapple", "Apple", "grape"]
    }

    fn assert_sorted(matches: &[Match]) {
        for pair in matches.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].index < pair[1].index),
                "out of order: {pair:?}"
            );
        }
    }

    #[test]
    fn test_rank_defaults() {
        let matches = rank("apple", &candidates(), &RankOptions::default()).unwrap();
        assert_eq!(matches.len(), candidates().len());
        assert_sorted(&matches);

        // "apple" and "Apple" both normalize to a perfect match; index breaks the tie
        assert_eq!(matches[0].text, "apple");
        assert_eq!(matches[0].index, 2);
        assert_eq!(matches[1].text, "Apple");
        assert_eq!(matches[1].index, 4);
        assert_eq!(matches[1].score, 1.0);
    }

    #[test]
    fn test_rank_without_processing_is_case_sensitive() {
        let options = RankOptions::default().with_process(false);
        let matches = rank("apple", &candidates(), &options).unwrap();
        let upper = matches.iter().find(|m| m.text == "Apple").unwrap();
        assert!((upper.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_matches_keep_original_text() {
        let matches = rank("HELLO", &["  Hello   World "], &RankOptions::default()).unwrap();
        assert_eq!(matches[0].text, "  Hello   World ");
    }

    #[test]
    fn test_threshold_equality_is_kept() {
        let exact = levenshtein("apple", "apply");
        let options = RankOptions::default().with_threshold(exact);
        let matches = rank("apple", &["apply", "zzzzz"], &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "apply");
        assert_eq!(matches[0].score, exact);
    }

    #[test]
    fn test_threshold_filters() {
        let options = RankOptions::default().with_threshold(0.9);
        let matches = rank("apple", &candidates(), &options).unwrap();
        assert!(matches.iter().all(|m| m.score >= 0.9));
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_top_n() {
        for limit in 0..8 {
            let options = RankOptions::default().with_top_n(Some(limit));
            let matches = rank("apple", &candidates(), &options).unwrap();
            assert_eq!(matches.len(), limit.min(candidates().len()));
            assert_sorted(&matches);
        }
    }

    #[test]
    fn test_top_n_keeps_best() {
        let all = rank("apple", &candidates(), &RankOptions::default()).unwrap();
        let top = rank("apple", &candidates(), &RankOptions::default().with_top_n(Some(3))).unwrap();
        assert_eq!(top.as_slice(), &all[..3]);
    }

    #[test]
    fn test_empty_candidates() {
        let empty: [&str; 0] = [];
        assert!(rank("apple", &empty, &RankOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_hybrid_single_weight_equals_raw() {
        let cands = ["apple pie", "banana"];
        let weights = HybridWeights::from_pairs([("levenshtein", 1.0)]).unwrap();
        let hybrid_options = RankOptions::default()
            .with_scorer(Scorer::Hybrid)
            .with_weights(weights);

        let hybrid_matches = rank("apple", &cands, &hybrid_options).unwrap();
        let raw_matches = rank("apple", &cands, &RankOptions::default()).unwrap();

        assert_eq!(hybrid_matches.len(), raw_matches.len());
        for (h, r) in hybrid_matches.iter().zip(&raw_matches) {
            assert_eq!(h.text, r.text);
            assert!((h.score - r.score).abs() < 1e-6);
        }
    }

    #[test]
    fn test_hybrid_half_and_half() {
        let (q, c) = ("apple banana", "banana apple");
        let weights = HybridWeights::from_pairs([("levenshtein", 0.5), ("token_sort", 0.5)]).unwrap();
        let options = RankOptions::default()
            .with_scorer(Scorer::Hybrid)
            .with_weights(weights);

        let matches = rank(q, &[c], &options).unwrap();
        let expected = 0.5 * levenshtein(q, c) + 0.5 * token_sort(q, c);
        assert!((matches[0].score - expected).abs() < 1e-6);
    }

    #[test]
    fn test_hybrid_empty_weights_keeps_all_at_zero() {
        let options = RankOptions::default().with_scorer(Scorer::Hybrid);
        let matches = rank("apple", &candidates(), &options).unwrap();
        assert_eq!(matches.len(), candidates().len());
        assert!(matches.iter().all(|m| m.score == 0.0));
        // All tied: input order is preserved
        let order: Vec<usize> = matches.iter().map(|m| m.index).collect();
        assert_eq!(order, (0..candidates().len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_partial_mode_finds_contained_query() {
        let options = RankOptions::default().with_mode(Mode::Partial);
        let matches = rank("pie", &["apple pie", "banana"], &options).unwrap();
        assert_eq!(matches[0].text, "apple pie");
        assert_eq!(matches[0].score, 1.0);
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let options = RankOptions::default().with_threshold(f64::NAN);
        let err = rank("a", &["b"], &options).unwrap_err();
        assert!(matches!(err, MatchError::InvalidThreshold(_)));
    }

    #[test]
    fn test_from_parts() {
        let options = RankOptions::from_parts(
            "hybrid",
            "partial",
            false,
            0.25,
            -1,
            [("jaccard", 2.0)],
        )
        .unwrap();
        assert_eq!(options.scorer, Scorer::Hybrid);
        assert_eq!(options.mode, Mode::Partial);
        assert!(!options.process);
        assert_eq!(options.top_n, None);
        assert_eq!(options.weights.total(), 2.0);

        let no_weights: [(&str, f64); 0] = [];
        let err = RankOptions::from_parts("non_existent_scorer", "full", true, 0.0, -1, no_weights)
            .unwrap_err();
        assert_eq!(err, MatchError::UnknownScorer("non_existent_scorer".to_string()));
        assert!(err.to_string().contains("Unknown scorer"));

        let err = RankOptions::from_parts("levenshtein", "fuzzy", true, 0.0, -1, no_weights)
            .unwrap_err();
        assert!(matches!(err, MatchError::UnknownMode(_)));
    }

    #[test]
    fn test_rank_is_idempotent() {
        let options = RankOptions::default().with_scorer(Scorer::TokenSort);
        let first = rank("pie apple", &candidates(), &options).unwrap();
        let second = rank("pie apple", &candidates(), &options).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.index, b.index);
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn test_prepared_candidates() {
        let raw = ["  Foo  Bar", "baz"];
        let prepared = PreparedCandidates::new(&raw, true);
        assert_eq!(prepared.len(), 2);
        assert!(!prepared.is_empty());
        let entries: Vec<_> = prepared.iter().collect();
        assert_eq!(entries[0], (0, "  Foo  Bar", "foo bar"));
        assert_eq!(entries[1], (1, "baz", "baz"));

        let none: [&str; 0] = [];
        let empty = PreparedCandidates::new(&none, true);
        assert!(empty.is_empty());
        let engine = RankingEngine::new(RankOptions::default()).unwrap();
        assert!(engine.rank_prepared("apple", &empty).is_empty());
        assert_eq!(engine.options(), &RankOptions::default());
    }
}
