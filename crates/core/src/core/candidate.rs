//! Merge candidates and tie-breaking.
//!
//! Candidates are ranked by score first. Equal scores are resolved by an
//! explicit [`TieBreak`] policy on the pair itself, so the winner never
//! depends on hash map iteration order or on how scoring was parallelised.

use super::merges::Pair;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// How to choose among candidates that share the maximum score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The lexicographically smallest `(left, right)` pair wins.
    #[default]
    Lexicographic,
    /// The lexicographically largest `(left, right)` pair wins.
    ReverseLexicographic,
}

impl TieBreak {
    /// Order two pairs so that the preferred one compares greater.
    #[inline]
    pub fn prefer(self, a: (&str, &str), b: (&str, &str)) -> Ordering {
        match self {
            TieBreak::Lexicographic => b.cmp(&a),
            TieBreak::ReverseLexicographic => a.cmp(&b),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Lexicographic => f.write_str("lexicographic"),
            TieBreak::ReverseLexicographic => f.write_str("reverse-lexicographic"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexicographic" | "lex" => Ok(TieBreak::Lexicographic),
            "reverse-lexicographic" | "reverse" => Ok(TieBreak::ReverseLexicographic),
            other => Err(format!(
                "unknown tie-break policy {:?} (expected lexicographic or reverse-lexicographic)",
                other
            )),
        }
    }
}

/// A scored merge candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbols to merge
    pub pair: Pair,
    /// Aggregate frequency of the pair across the vocabulary
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }

    /// The left symbol.
    #[inline]
    pub fn left(&self) -> &str {
        &self.pair.0
    }

    /// The right symbol.
    #[inline]
    pub fn right(&self) -> &str {
        &self.pair.1
    }
}

/// Compare two scored pairs: higher count wins, ties go to `tie_break`.
#[inline]
pub fn compare_scored(
    a: ((&str, &str), u64),
    b: ((&str, &str), u64),
    tie_break: TieBreak,
) -> Ordering {
    a.1.cmp(&b.1).then_with(|| tie_break.prefer(a.0, b.0))
}

/// Pick the best of a set of scored pairs.
///
/// Returns `None` if the iterator is empty.
pub fn best_scored<'a, I>(scores: I, tie_break: TieBreak) -> Option<MergeCandidate>
where
    I: IntoIterator<Item = ((&'a str, &'a str), u64)>,
{
    scores
        .into_iter()
        .max_by(|&a, &b| compare_scored(a, b, tie_break))
        .map(|((left, right), count)| MergeCandidate::new((left.into(), right.into()), count))
}
