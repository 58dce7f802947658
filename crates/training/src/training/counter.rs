//! Pair counting for BPE training.
//!
//! This module scores adjacent symbol pairs across a word vocabulary, with
//! support for parallel processing. Pair keys borrow from the vocabulary, so
//! scoring a pass allocates nothing per pair occurrence.

use ahash::AHashMap;
use morphbpe_core::{split_key, WordVocab};

/// Pair -> aggregate frequency, borrowing symbols from the scored vocabulary.
pub type PairCounts<'a> = AHashMap<(&'a str, &'a str), u64>;

/// Counter for adjacent symbol pair frequencies.
pub struct PairCounter<'a> {
    /// Vocabulary entries as (key, frequency)
    entries: Vec<(&'a str, u64)>,
}

impl<'a> PairCounter<'a> {
    /// Create a counter over the entries of a vocabulary.
    pub fn new(vocab: &'a WordVocab) -> Self {
        Self {
            entries: vocab.iter().collect(),
        }
    }

    /// Count all pairs, in parallel if requested.
    pub fn count_pairs(&self, parallel: bool) -> PairCounts<'a> {
        if parallel {
            self.count_pairs_parallel()
        } else {
            self.count_pairs_sequential()
        }
    }

    /// Count all pairs in parallel.
    ///
    /// Scores are purely additive, so the result equals the sequential count.
    pub fn count_pairs_parallel(&self) -> PairCounts<'a> {
        use rayon::prelude::*;

        self.entries
            .par_iter()
            .fold(PairCounts::new, |mut acc, &(key, frequency)| {
                count_entry(key, frequency, &mut acc);
                acc
            })
            .reduce(PairCounts::new, merge_counts)
    }

    /// Count all pairs sequentially.
    pub fn count_pairs_sequential(&self) -> PairCounts<'a> {
        let mut pair_counts = PairCounts::new();

        for &(key, frequency) in &self.entries {
            count_entry(key, frequency, &mut pair_counts);
        }

        pair_counts
    }

    /// Get the number of vocabulary entries being scored.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Get the total count of all word occurrences.
    pub fn total_word_occurrences(&self) -> u64 {
        self.entries.iter().map(|&(_, frequency)| frequency).sum()
    }
}

/// Add one entry's adjacent pairs, weighted by its frequency.
fn count_entry<'a>(key: &'a str, frequency: u64, pair_counts: &mut PairCounts<'a>) {
    let mut symbols = split_key(key);
    let Some(mut prev) = symbols.next() else {
        return;
    };
    for next in symbols {
        *pair_counts.entry((prev, next)).or_insert(0) += frequency;
        prev = next;
    }
}

fn merge_counts<'a>(mut a: PairCounts<'a>, mut b: PairCounts<'a>) -> PairCounts<'a> {
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    for (pair, count) in b {
        *a.entry(pair).or_insert(0) += count;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(entries: &[(&str, u64)]) -> WordVocab {
        entries.iter().map(|&(k, v)| (k, v)).collect()
    }

    #[test]
    fn test_count_pairs_sequential() {
        let vocab = vocab(&[("a b _EOW", 1), ("b c _EOW", 1)]);

        let pairs = PairCounter::new(&vocab).count_pairs_sequential();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs.get(&("a", "b")), Some(&1));
        assert_eq!(pairs.get(&("b", "_EOW")), Some(&1));
        assert_eq!(pairs.get(&("b", "c")), Some(&1));
        assert_eq!(pairs.get(&("c", "_EOW")), Some(&1));
    }

    #[test]
    fn test_count_pairs_with_frequency() {
        let vocab = vocab(&[("a b _EOW", 3)]);

        let pairs = PairCounter::new(&vocab).count_pairs_sequential();
        assert_eq!(pairs.get(&("a", "b")), Some(&3));
    }

    #[test]
    fn test_repeated_pair_within_entry() {
        // "abab" contains (a, b) twice, so it contributes its frequency twice.
        let vocab = vocab(&[("a b a b _EOW", 2)]);

        let pairs = PairCounter::new(&vocab).count_pairs_sequential();
        assert_eq!(pairs.get(&("a", "b")), Some(&4));
        assert_eq!(pairs.get(&("b", "a")), Some(&2));
    }

    #[test]
    fn test_single_symbol_entries_have_no_pairs() {
        let vocab = vocab(&[("low_EOW", 5), ("lo_EOW", 1)]);

        let counter = PairCounter::new(&vocab);
        assert!(counter.count_pairs_sequential().is_empty());
        assert!(counter.count_pairs_parallel().is_empty());
        assert_eq!(counter.total_word_occurrences(), 6);
    }

    #[test]
    fn test_count_pairs_parallel() {
        let vocab = vocab(&[
            ("a b c _EOW", 1),
            ("b c d _EOW", 1),
            ("c d e _EOW", 1),
            ("e _EOW", 7),
        ]);

        let counter = PairCounter::new(&vocab);
        let pairs = counter.count_pairs_parallel();
        assert_eq!(pairs.get(&("a", "b")), Some(&1));
        assert_eq!(pairs.get(&("b", "c")), Some(&2));
        assert_eq!(pairs.get(&("c", "d")), Some(&2));
        assert_eq!(pairs.get(&("d", "e")), Some(&1));
        assert_eq!(pairs.get(&("e", "_EOW")), Some(&8));
        assert_eq!(pairs, counter.count_pairs_sequential());
    }
}
