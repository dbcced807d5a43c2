//! Many queries against one shared candidate set.
//!
//! Candidates are normalized once and shared read-only. Queries are spread
//! over a rayon pool and collected into a buffer sized up front, so each
//! result lands at its query's index regardless of which worker finishes
//! first.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::core::types::Match;
use crate::matching::engine::{PreparedCandidates, RankOptions, RankingEngine};
use crate::utils::validation::MatchError;

/// Worker pool settings for batch matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Run on a dedicated pool of this many threads. `None` uses the global
    /// rayon pool (one thread per available core).
    pub threads: Option<usize>,
}

impl BatchConfig {
    #[must_use]
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: Some(threads),
        }
    }

    fn build_pool(&self) -> Result<Option<ThreadPool>, MatchError> {
        self.threads
            .map(|n| {
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("fuzzy-rank-{i}"))
                    .build()
                    .map_err(|e| MatchError::ThreadPool(e.to_string()))
            })
            .transpose()
    }
}

/// Rank every query against `candidates` on the global worker pool.
///
/// # Errors
///
/// Returns a `MatchError` if the options are invalid. Validation happens
/// once, before any query is dispatched, so either every query is ranked or
/// none is.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::{batch_match, RankOptions};
///
/// let results = batch_match(
///     &["apple", "banana"],
///     &["apple pie", "banana bread"],
///     &RankOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0][0].text, "apple pie");
/// assert_eq!(results[1][0].text, "banana bread");
/// ```
pub fn batch_match<Q, C>(
    queries: &[Q],
    candidates: &[C],
    options: &RankOptions,
) -> Result<Vec<Vec<Match>>, MatchError>
where
    Q: AsRef<str> + Sync,
    C: AsRef<str> + Sync,
{
    batch_match_with_config(queries, candidates, options, &BatchConfig::default())
}

/// [`batch_match`] with explicit worker pool settings.
///
/// # Errors
///
/// Returns a `MatchError` if the options are invalid or a dedicated pool
/// cannot be created.
pub fn batch_match_with_config<Q, C>(
    queries: &[Q],
    candidates: &[C],
    options: &RankOptions,
    config: &BatchConfig,
) -> Result<Vec<Vec<Match>>, MatchError>
where
    Q: AsRef<str> + Sync,
    C: AsRef<str> + Sync,
{
    let engine = RankingEngine::new(options.clone())?;
    let pool = config.build_pool()?;

    let options = engine.options();
    let prepared = PreparedCandidates::new(candidates, options.process);

    debug!(
        "Batch matching {} queries against {} candidates with scorer={} mode={} threads={:?}",
        queries.len(),
        prepared.len(),
        options.scorer,
        options.mode,
        config.threads
    );

    let run = || {
        let mut results = Vec::with_capacity(queries.len());
        queries
            .par_iter()
            .map(|query| engine.rank_prepared(query.as_ref(), &prepared))
            .collect_into_vec(&mut results);
        results
    };

    Ok(match pool {
        Some(pool) => pool.install(run),
        None => run(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Mode, Scorer};
    use crate::matching::engine::rank;
    use crate::matching::hybrid::HybridWeights;

    fn candidates() -> Vec<String> {
        [
            "apple pie",
            "banana bread",
            "cherry tart",
            "Apple Crumble",
            "banana split",
            "grape juice",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    #[test]
    fn test_batch_returns_one_result_per_query_in_order() {
        let results = batch_match(&["apple", "banana"], &["apple pie", "banana bread"], &RankOptions::default())
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0][0].text, "apple pie");
        assert_eq!(results[1][0].text, "banana bread");
    }

    #[test]
    fn test_batch_matches_individual_rank() {
        let queries: Vec<String> = (0..64)
            .map(|i| ["apple", "banana", "cherry", "grape"][i % 4].repeat(1 + i % 3))
            .collect();
        let options = RankOptions::default()
            .with_scorer(Scorer::PartialRatio)
            .with_top_n(Some(3));

        let batch = batch_match(&queries, &candidates(), &options).unwrap();
        assert_eq!(batch.len(), queries.len());

        for (query, result) in queries.iter().zip(&batch) {
            let single = rank(query, &candidates(), &options).unwrap();
            assert_eq!(result, &single, "query {query:?}");
        }
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let queries = ["apple", "banana", "tart cherry", "juice"];
        let weights = HybridWeights::from_pairs([("jaccard", 1.0), ("token_sort", 2.0)]).unwrap();
        let options = RankOptions::default()
            .with_scorer(Scorer::Hybrid)
            .with_mode(Mode::Partial)
            .with_weights(weights);

        let global = batch_match(&queries, &candidates(), &options).unwrap();
        for threads in [1, 2, 4] {
            let dedicated =
                batch_match_with_config(&queries, &candidates(), &options, &BatchConfig::with_threads(threads))
                    .unwrap();
            assert_eq!(global, dedicated, "threads={threads}");
        }
    }

    #[test]
    fn test_empty_inputs() {
        let none: [&str; 0] = [];
        assert!(batch_match(&none, &candidates(), &RankOptions::default()).unwrap().is_empty());

        let results = batch_match(&["apple"], &none, &RankOptions::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_empty());
    }

    #[test]
    fn test_invalid_options_fail_whole_batch() {
        let options = RankOptions::default().with_threshold(f64::NAN);
        let err = batch_match(&["apple", "banana"], &candidates(), &options).unwrap_err();
        assert!(matches!(err, MatchError::InvalidThreshold(_)));
    }
}
