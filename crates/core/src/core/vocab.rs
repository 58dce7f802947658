//! Word vocabulary storage.
//!
//! The working vocabulary maps each word decomposition key (symbols joined by
//! single spaces) to the number of corpus occurrences that decompose that way.

use super::symbols::{split_key, Symbol};
use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;

/// Decomposition key -> frequency mapping.
pub type WordCounts = AHashMap<CompactString, u64>;

/// Vocabulary of word decompositions with their frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordVocab {
    entries: WordCounts,
}

impl WordVocab {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            entries: WordCounts::new(),
        }
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: WordCounts::with_capacity(capacity),
        }
    }

    /// Add `frequency` occurrences of a key.
    ///
    /// Frequencies of an existing key are summed. Zero frequencies are ignored
    /// so every stored entry stays positive.
    pub fn add(&mut self, key: impl Into<CompactString>, frequency: u64) {
        if frequency == 0 {
            return;
        }
        *self.entries.entry(key.into()).or_insert(0) += frequency;
    }

    /// Get the frequency of a key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    /// Check whether a key is present.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, frequency)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Sum of all frequencies, i.e. the number of word occurrences represented.
    pub fn total_frequency(&self) -> u64 {
        self.entries.values().sum()
    }

    /// Distinct symbols appearing anywhere in the vocabulary.
    pub fn symbol_types(&self) -> AHashSet<&str> {
        self.entries.keys().flat_map(|k| split_key(k)).collect()
    }

    /// Number of distinct symbols appearing anywhere in the vocabulary.
    pub fn symbol_type_count(&self) -> usize {
        self.symbol_types().len()
    }

    /// Distinct symbols, sorted.
    pub fn sorted_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self
            .symbol_types()
            .into_iter()
            .map(Symbol::from)
            .collect();
        symbols.sort();
        symbols
    }

    /// Entries sorted by descending frequency, then ascending key.
    pub fn sorted_entries(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl IntoIterator for WordVocab {
    type Item = (CompactString, u64);
    type IntoIter = std::collections::hash_map::IntoIter<CompactString, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<CompactString>> FromIterator<(K, u64)> for WordVocab {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut vocab = WordVocab::new();
        for (key, frequency) in iter {
            vocab.add(key, frequency);
        }
        vocab
    }
}

impl From<WordCounts> for WordVocab {
    fn from(mut counts: WordCounts) -> Self {
        counts.retain(|_, frequency| *frequency > 0);
        Self { entries: counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sums_frequencies() {
        let mut vocab = WordVocab::new();
        vocab.add("l o w _EOW", 2);
        vocab.add("l o w _EOW", 3);
        vocab.add("a _EOW", 1);

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get("l o w _EOW"), Some(5));
        assert_eq!(vocab.total_frequency(), 6);
    }

    #[test]
    fn test_zero_frequency_ignored() {
        let mut vocab = WordVocab::new();
        vocab.add("a _EOW", 0);
        assert!(vocab.is_empty());
    }

    #[test]
    fn test_symbol_types() {
        let vocab: WordVocab = [("lo w _EOW", 1), ("lo t _EOW", 4)].into_iter().collect();

        assert_eq!(vocab.symbol_type_count(), 4);
        assert_eq!(vocab.sorted_symbols(), vec!["_EOW", "lo", "t", "w"]);
    }

    #[test]
    fn test_sorted_entries() {
        let vocab: WordVocab = [("b _EOW", 2), ("a _EOW", 2), ("c _EOW", 7)]
            .into_iter()
            .collect();

        assert_eq!(
            vocab.sorted_entries(),
            vec![("c _EOW", 7), ("a _EOW", 2), ("b _EOW", 2)]
        );
    }
}
