use std::collections::HashSet;

use crate::core::normalize::tokenize;
use crate::core::types::Algorithm;
use crate::utils::validation::count_to_f64;

/// Scoring function signature shared by every base algorithm
pub(crate) type ScoreFn = fn(&str, &str) -> f64;

impl Algorithm {
    /// The scoring function for this algorithm
    #[must_use]
    pub(crate) fn score_fn(self) -> ScoreFn {
        match self {
            Self::Levenshtein => levenshtein,
            Self::Jaccard => jaccard,
            Self::TokenSort => token_sort,
            Self::PartialRatio => partial_ratio,
        }
    }

    /// Score a pair of strings with this algorithm
    #[must_use]
    pub fn score(self, a: &str, b: &str) -> f64 {
        (self.score_fn())(a, b)
    }
}

/// Minimum number of single-character insertions, deletions and substitutions
/// needed to turn `a` into `b`. Counts Unicode scalar values, not bytes.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::edit_distance;
///
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// assert_eq!(edit_distance("", "abc"), 3);
/// ```
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance_chars(&a, &b)
}

/// Two-row Wagner-Fischer over char slices. The row is sized by the shorter input.
pub(crate) fn edit_distance_chars(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

pub(crate) fn levenshtein_chars(a: &[char], b: &[char]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - count_to_f64(edit_distance_chars(a, b)) / count_to_f64(max_len)
}

/// Normalized edit-distance similarity: `1 - distance / max(len(a), len(b))`
///
/// Two empty strings score 1.0; exactly one empty string scores 0.0.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_chars(&a, &b)
}

/// Jaccard similarity of whitespace token sets: |A ∩ B| / |A ∪ B|
///
/// Two empty token sets score 1.0; exactly one empty set scores 0.0.
#[must_use]
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a: HashSet<&str> = a.split_whitespace().collect();
    let b: HashSet<&str> = b.split_whitespace().collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 1.0;
    }
    let intersection = a.intersection(&b).count();
    count_to_f64(intersection) / count_to_f64(union)
}

/// Levenshtein similarity after sorting each string's tokens, so word order
/// does not matter.
#[must_use]
pub fn token_sort(a: &str, b: &str) -> f64 {
    levenshtein(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens = tokenize(s);
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Best-alignment similarity.
///
/// The shorter string (by character count) is slid across the longer one and
/// compared against every window of its own length; the highest levenshtein
/// similarity wins. Strings of equal length are compared whole.
///
/// # Examples
///
/// ```
/// use fuzzy_rank::partial_ratio;
///
/// assert_eq!(partial_ratio("apple", "apple pie"), 1.0);
/// assert_eq!(partial_ratio("apple pie", "apple"), 1.0);
/// ```
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if shorter.is_empty() {
        return if longer.is_empty() { 1.0 } else { 0.0 };
    }
    if shorter.len() == longer.len() {
        return levenshtein_chars(shorter, longer);
    }

    best_window(shorter, longer).1
}

/// Find the window of `longer` (with the length of `shorter`) that is most
/// similar to `shorter`. Returns the window's starting char offset and its
/// score; ties keep the leftmost window.
///
/// Requires `0 < shorter.len() <= longer.len()`.
pub(crate) fn best_window(shorter: &[char], longer: &[char]) -> (usize, f64) {
    let width = shorter.len();
    let mut best_offset = 0;
    let mut best_score = f64::NEG_INFINITY;

    for offset in 0..=(longer.len() - width) {
        let score = levenshtein_chars(shorter, &longer[offset..offset + width]);
        if score > best_score {
            best_score = score;
            best_offset = offset;
            if best_score >= 1.0 {
                break;
            }
        }
    }

    (best_offset, best_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    const SAMPLES: [&str; 9] = [
        "",
        "a",
        "apple",
        "apple pie",
        "banana apple",
        "apple banana",
        "kitten",
        "sitting",
        "naïve café",
    ];

    #[test]
    fn test_edit_distance_classic() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("abc", "abc"), 0);
    }

    #[test]
    fn test_edit_distance_counts_chars_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("日本", "日本語"), 1);
    }

    #[test]
    fn test_levenshtein_edges() {
        assert_eq!(levenshtein("", ""), 1.0);
        assert_eq!(levenshtein("abc", ""), 0.0);
        assert_eq!(levenshtein("", "abc"), 0.0);
        assert!((levenshtein("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < EPS);
    }

    #[test]
    fn test_identity_scores_one() {
        for s in SAMPLES {
            assert_eq!(levenshtein(s, s), 1.0, "levenshtein({s:?})");
            assert_eq!(jaccard(s, s), 1.0, "jaccard({s:?})");
            assert_eq!(token_sort(s, s), 1.0, "token_sort({s:?})");
            assert_eq!(partial_ratio(s, s), 1.0, "partial_ratio({s:?})");
        }
    }

    #[test]
    fn test_symmetry() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(levenshtein(a, b), levenshtein(b, a), "levenshtein {a:?} {b:?}");
                assert_eq!(jaccard(a, b), jaccard(b, a), "jaccard {a:?} {b:?}");
                assert_eq!(token_sort(a, b), token_sort(b, a), "token_sort {a:?} {b:?}");
                assert_eq!(
                    partial_ratio(a, b),
                    partial_ratio(b, a),
                    "partial_ratio {a:?} {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_scores_in_unit_range() {
        for a in SAMPLES {
            for b in SAMPLES {
                for algorithm in Algorithm::ALL {
                    let score = algorithm.score(a, b);
                    assert!((0.0..=1.0).contains(&score), "{algorithm} {a:?} {b:?} = {score}");
                }
            }
        }
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard("", ""), 1.0);
        assert_eq!(jaccard("apple", ""), 0.0);
        assert_eq!(jaccard("   ", "apple"), 0.0);
        assert!((jaccard("apple pie", "apple tart") - 1.0 / 3.0).abs() < EPS);
        // Duplicate tokens collapse into one set member
        assert_eq!(jaccard("a a b", "b a"), 1.0);
        // Tokens are case-sensitive
        assert_eq!(jaccard("Apple", "apple"), 0.0);
    }

    #[test]
    fn test_token_sort_ignores_order() {
        assert_eq!(token_sort("apple banana", "banana apple"), 1.0);
        assert_eq!(token_sort("  c b   a ", "a b c"), 1.0);
        assert!(levenshtein("apple banana", "banana apple") < 1.0);
    }

    #[test]
    fn test_partial_ratio_containment() {
        assert_eq!(partial_ratio("apple", "apple pie"), 1.0);
        assert_eq!(partial_ratio("pie", "apple pie"), 1.0);
        assert_eq!(partial_ratio("", "apple"), 0.0);
        assert_eq!(partial_ratio("", ""), 1.0);

        // One substitution inside a five-char window
        let score = partial_ratio("appxe", "an apple pie");
        assert!((score - 0.8).abs() < EPS);
    }

    #[test]
    fn test_best_window_prefers_leftmost() {
        let shorter: Vec<char> = "ab".chars().collect();
        let longer: Vec<char> = "xabyab".chars().collect();
        let (offset, score) = best_window(&shorter, &longer);
        assert_eq!(offset, 1);
        assert_eq!(score, 1.0);

        // No exact hit: several windows tie at 0.5, the first one wins
        let longer: Vec<char> = "azbz".chars().collect();
        let (offset, score) = best_window(&shorter, &longer);
        assert_eq!(offset, 0);
        assert!((score - 0.5).abs() < EPS);
    }

    #[test]
    fn test_score_fn_dispatch() {
        assert_eq!(Algorithm::Levenshtein.score("abc", "abd"), levenshtein("abc", "abd"));
        assert_eq!(Algorithm::Jaccard.score("a b", "b c"), jaccard("a b", "b c"));
        assert_eq!(Algorithm::TokenSort.score("b a", "a b"), 1.0);
        assert_eq!(Algorithm::PartialRatio.score("pie", "apple pie"), 1.0);
    }
}
