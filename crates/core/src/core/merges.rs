//! Learned merge list.
//!
//! Merges are kept in the order they were learned. The rank of a merge is its
//! position in that order; a downstream segmenter replays merges by rank.

use super::symbols::Symbol;
use ahash::AHashMap;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// An ordered pair of adjacent symbols.
pub type Pair = (Symbol, Symbol);

/// Build a [`Pair`] from two string slices.
#[inline]
pub fn pair(left: &str, right: &str) -> Pair {
    (Symbol::from(left), Symbol::from(right))
}

/// The symbol produced by merging a pair.
#[inline]
pub fn merged_symbol(pair: &Pair) -> Symbol {
    let mut merged = CompactString::with_capacity(pair.0.len() + pair.1.len());
    merged.push_str(&pair.0);
    merged.push_str(&pair.1);
    merged
}

/// One applied merge, as recorded by the training loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStep {
    /// The pair that was merged
    pub pair: Pair,
    /// Aggregate score of the pair when it was selected
    pub count: u64,
    /// Symbol-type count after the merge was applied
    pub symbol_count: usize,
}

/// Ordered collection of learned merges with rank lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeList {
    steps: Vec<MergeStep>,
    ranks: AHashMap<Pair, u32>,
}

impl MergeList {
    /// Create a new empty merge list.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            ranks: AHashMap::new(),
        }
    }

    /// Create a new merge list with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
            ranks: AHashMap::with_capacity(capacity),
        }
    }

    /// Append a merge step and return its rank.
    ///
    /// Every step is recorded in order. If the same pair is pushed again,
    /// [`MergeList::rank`] keeps reporting the earliest rank.
    pub fn push(&mut self, step: MergeStep) -> u32 {
        let rank = self.steps.len() as u32;
        self.ranks.entry(step.pair.clone()).or_insert(rank);
        self.steps.push(step);
        rank
    }

    /// Get the rank of a pair.
    #[inline]
    pub fn rank(&self, left: &str, right: &str) -> Option<u32> {
        self.ranks.get(&pair(left, right)).copied()
    }

    /// Get the step at a rank.
    #[inline]
    pub fn get(&self, rank: u32) -> Option<&MergeStep> {
        self.steps.get(rank as usize)
    }

    /// Get the most recent merge.
    #[inline]
    pub fn last(&self) -> Option<&MergeStep> {
        self.steps.last()
    }

    /// Get the number of merges.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there are no merges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over merges in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeStep> {
        self.steps.iter()
    }

    /// Pairs in rank order.
    pub fn pairs(&self) -> impl Iterator<Item = &Pair> + '_ {
        self.steps.iter().map(|s| &s.pair)
    }

    /// Get statistics about the merges.
    pub fn stats(&self) -> MergeStats {
        MergeStats {
            count: self.len(),
            max_count: self.steps.iter().map(|s| s.count).max().unwrap_or(0),
            min_count: self.steps.iter().map(|s| s.count).min().unwrap_or(0),
            final_symbol_count: self.last().map(|s| s.symbol_count),
        }
    }
}

impl FromIterator<MergeStep> for MergeList {
    fn from_iter<I: IntoIterator<Item = MergeStep>>(iter: I) -> Self {
        let mut list = MergeList::new();
        for step in iter {
            list.push(step);
        }
        list
    }
}

impl<'a> IntoIterator for &'a MergeList {
    type Item = &'a MergeStep;
    type IntoIter = std::slice::Iter<'a, MergeStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Statistics about a merge list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of merges
    pub count: usize,
    /// Highest pair score seen
    pub max_count: u64,
    /// Lowest pair score seen
    pub min_count: u64,
    /// Symbol-type count after the last merge
    pub final_symbol_count: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(left: &str, right: &str, count: u64, symbol_count: usize) -> MergeStep {
        MergeStep {
            pair: pair(left, right),
            count,
            symbol_count,
        }
    }

    #[test]
    fn test_push_and_rank() {
        let mut merges = MergeList::new();
        assert_eq!(merges.push(step("l", "o", 10, 12)), 0);
        assert_eq!(merges.push(step("lo", "w", 7, 11)), 1);

        assert_eq!(merges.rank("l", "o"), Some(0));
        assert_eq!(merges.rank("lo", "w"), Some(1));
        assert_eq!(merges.rank("o", "w"), None);
        assert_eq!(merges.get(1).map(|s| s.count), Some(7));
    }

    #[test]
    fn test_repeated_pair_keeps_earliest_rank() {
        // (a, b) can come back once a new "a" symbol forms next to a "b".
        let mut merges = MergeList::new();
        merges.push(step("a", "b", 5, 6));
        merges.push(step("x", "y", 3, 6));
        assert_eq!(merges.push(step("a", "b", 2, 5)), 2);

        assert_eq!(merges.len(), 3);
        assert_eq!(merges.rank("a", "b"), Some(0));
        assert_eq!(merges.get(2).map(|s| s.count), Some(2));
    }

    #[test]
    fn test_merged_symbol() {
        assert_eq!(merged_symbol(&pair("lo", "w")), "low");
        assert_eq!(merged_symbol(&pair("st", "_EOW")), "st_EOW");
    }

    #[test]
    fn test_stats() {
        let merges: MergeList = vec![step("a", "b", 9, 5), step("ab", "c", 4, 4)]
            .into_iter()
            .collect();

        let stats = merges.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.max_count, 9);
        assert_eq!(stats.min_count, 4);
        assert_eq!(stats.final_symbol_count, Some(4));
    }

    #[test]
    fn test_empty_stats() {
        let stats = MergeList::new().stats();
        assert_eq!(stats, MergeStats::default());
    }
}
