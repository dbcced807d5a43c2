use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::validation::MatchError;

/// A single similarity algorithm that can take part in a hybrid score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Normalized edit-distance similarity
    Levenshtein,
    /// Token-set overlap
    Jaccard,
    /// Levenshtein over lexicographically sorted tokens
    TokenSort,
    /// Best sliding-window alignment of the shorter string
    PartialRatio,
}

impl Algorithm {
    /// All algorithms in their canonical (and summation) order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Levenshtein,
        Algorithm::Jaccard,
        Algorithm::TokenSort,
        Algorithm::PartialRatio,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Levenshtein => "levenshtein",
            Self::Jaccard => "jaccard",
            Self::TokenSort => "token_sort",
            Self::PartialRatio => "partial_ratio",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scoring strategy selected by identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    #[default]
    Levenshtein,
    Jaccard,
    TokenSort,
    PartialRatio,
    /// Weighted combination of the base algorithms
    Hybrid,
}

/// Identifier → scorer lookup table. Fixed at compile time and never mutated.
const SCORER_TABLE: [(&str, Scorer); 5] = [
    ("levenshtein", Scorer::Levenshtein),
    ("jaccard", Scorer::Jaccard),
    ("token_sort", Scorer::TokenSort),
    ("partial_ratio", Scorer::PartialRatio),
    ("hybrid", Scorer::Hybrid),
];

impl Scorer {
    /// Look up a scorer by identifier.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::UnknownScorer` naming the identifier if it is not
    /// in the lookup table.
    pub fn from_name(name: &str) -> Result<Self, MatchError> {
        SCORER_TABLE
            .iter()
            .find(|(id, _)| *id == name)
            .map(|(_, scorer)| *scorer)
            .ok_or_else(|| MatchError::UnknownScorer(name.to_string()))
    }

    /// Every recognized identifier, in table order
    pub fn names() -> impl Iterator<Item = &'static str> {
        SCORER_TABLE.iter().map(|(id, _)| *id)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.algorithm().map_or("hybrid", Algorithm::as_str)
    }

    /// The base algorithm behind this scorer, or `None` for `Hybrid`
    #[must_use]
    pub fn algorithm(self) -> Option<Algorithm> {
        match self {
            Self::Levenshtein => Some(Algorithm::Levenshtein),
            Self::Jaccard => Some(Algorithm::Jaccard),
            Self::TokenSort => Some(Algorithm::TokenSort),
            Self::PartialRatio => Some(Algorithm::PartialRatio),
            Self::Hybrid => None,
        }
    }
}

impl From<Algorithm> for Scorer {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Levenshtein => Self::Levenshtein,
            Algorithm::Jaccard => Self::Jaccard,
            Algorithm::TokenSort => Self::TokenSort,
            Algorithm::PartialRatio => Self::PartialRatio,
        }
    }
}

impl FromStr for Scorer {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much of each string takes part in a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Compare both strings in their entirety
    #[default]
    Full,
    /// Compare the shorter string against its best-aligned window of the longer
    Partial,
}

impl FromStr for Mode {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "partial" => Ok(Self::Partial),
            other => Err(MatchError::UnknownMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

/// A scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Original candidate text, before any normalization
    pub text: String,

    /// Similarity score in `[0.0, 1.0]`
    pub score: f64,

    /// Position of the candidate in the input sequence
    pub index: usize,
}

impl Match {
    pub fn new(text: impl Into<String>, score: f64, index: usize) -> Self {
        Self {
            text: text.into(),
            score,
            index,
        }
    }

    /// Ranking order: descending score, then ascending candidate index
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.index.cmp(&other.index))
    }
}
