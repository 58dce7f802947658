//! Vocabulary builder: initialization, candidate selection and merging.
//!
//! The builder never holds the vocabulary itself. Each operation takes the
//! current [`WordVocab`] and either inspects it or consumes it and returns the
//! next version, so a training run is a fold over merge decisions.

use super::counter::PairCounter;
use ahash::AHashMap;
use compact_str::CompactString;
use morphbpe_core::{
    best_scored, merged_symbol, split_key, validate_eow, word_key, MergeCandidate, Pair, Result,
    Symbol, TieBreak, TokenizerError, WordCounts, WordVocab, DEFAULT_EOW, SYMBOL_SEPARATOR,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Builds and transforms BPE word vocabularies.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    /// End-of-word marker appended to every word
    eow: Symbol,
    /// Policy for equally scored candidates
    tie_break: TieBreak,
    /// Whether to score and merge in parallel
    parallel: bool,
}

impl VocabularyBuilder {
    /// Create a builder with the given end-of-word marker.
    ///
    /// Fails if the marker is empty, contains whitespace, or is a single
    /// character.
    pub fn new(eow: &str) -> Result<Self> {
        validate_eow(eow)?;
        Ok(Self {
            eow: Symbol::from(eow),
            tie_break: TieBreak::default(),
            parallel: true,
        })
    }

    /// Set the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Enable or disable parallel scoring and merging.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The end-of-word marker.
    #[inline]
    pub fn eow(&self) -> &str {
        &self.eow
    }

    /// The tie-break policy.
    #[inline]
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Whether parallel processing is enabled.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Build the initial vocabulary from lines of text.
    ///
    /// Each line is split on whitespace. Every word occurrence adds one to the
    /// key made of the word's characters followed by the end-of-word marker.
    pub fn initialize<I, S>(&self, lines: I) -> WordVocab
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_counts = WordCounts::new();
        for line in lines {
            count_words(line.as_ref(), &mut word_counts);
        }
        self.vocab_from_word_counts(word_counts)
    }

    /// Build the initial vocabulary from a buffered reader.
    ///
    /// Fails with [`TokenizerError::MalformedInput`] on the first line that is
    /// not valid UTF-8.
    pub fn initialize_from_reader<R: BufRead>(&self, reader: R) -> Result<WordVocab> {
        self.read_corpus(reader, Path::new("<reader>"))
    }

    /// Build the initial vocabulary from a text file.
    pub fn initialize_from_path(&self, path: impl AsRef<Path>) -> Result<WordVocab> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        self.read_corpus(BufReader::new(file), path)
    }

    fn read_corpus<R: BufRead>(&self, mut reader: R, path: &Path) -> Result<WordVocab> {
        let mut word_counts = WordCounts::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|err| TokenizerError::Io {
                    path: path.to_path_buf(),
                    err,
                })?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let line =
                std::str::from_utf8(&buf).map_err(|e| TokenizerError::MalformedInput {
                    line: line_number,
                    reason: e.to_string(),
                })?;
            count_words(line, &mut word_counts);
        }

        log::debug!("Read {} lines from {}", line_number, path.display());
        Ok(self.vocab_from_word_counts(word_counts))
    }

    fn vocab_from_word_counts(&self, word_counts: WordCounts) -> WordVocab {
        let mut vocab = WordVocab::with_capacity(word_counts.len());
        for (word, count) in word_counts {
            vocab.add(word_key(&word, &self.eow), count);
        }

        log::debug!(
            "Initialized vocabulary: {} distinct words, {} occurrences",
            vocab.len(),
            vocab.total_frequency()
        );
        vocab
    }

    /// Score every adjacent symbol pair and return the best one.
    ///
    /// A pair's score is the sum of the frequencies of the entries it occurs
    /// in, counted once per adjacent occurrence. Equal scores are resolved by
    /// the builder's [`TieBreak`].
    ///
    /// Fails with [`TokenizerError::EmptyVocabulary`] if no entry has two or
    /// more symbols.
    pub fn select_best_candidate(&self, vocab: &WordVocab) -> Result<MergeCandidate> {
        let pair_counts = PairCounter::new(vocab).count_pairs(self.parallel);
        best_scored(pair_counts, self.tie_break).ok_or(TokenizerError::EmptyVocabulary)
    }

    /// Merge every adjacent occurrence of `pair` across the vocabulary.
    ///
    /// Occurrences are matched on whole symbols, left to right and without
    /// overlap; a newly formed symbol is not scanned again in the same call.
    /// Entries whose keys collide after merging are summed.
    ///
    /// Returns the next vocabulary and its symbol-type count.
    pub fn merge_candidate(&self, vocab: WordVocab, pair: &Pair) -> (WordVocab, usize) {
        let needle = {
            let mut needle = CompactString::with_capacity(pair.0.len() + pair.1.len() + 1);
            needle.push_str(&pair.0);
            needle.push(SYMBOL_SEPARATOR);
            needle.push_str(&pair.1);
            needle
        };
        let merged = merged_symbol(pair);

        let apply = |(key, frequency): (CompactString, u64)| {
            // Keys without the joined pair as a substring cannot contain it
            // at symbol boundaries either.
            if !key.contains(needle.as_str()) {
                return (key, frequency);
            }
            match merge_key(&key, &pair.0, &pair.1, &merged) {
                Some(next) => (next, frequency),
                None => (key, frequency),
            }
        };

        let next: WordVocab = if self.parallel {
            use rayon::prelude::*;

            let entries: Vec<(CompactString, u64)> = vocab.into_iter().collect();
            entries
                .into_par_iter()
                .map(apply)
                .fold(WordCounts::new, |mut acc, (key, frequency)| {
                    *acc.entry(key).or_insert(0) += frequency;
                    acc
                })
                .reduce(WordCounts::new, sum_counts)
                .into()
        } else {
            vocab.into_iter().map(apply).collect()
        };

        let symbol_count = next.symbol_type_count();
        (next, symbol_count)
    }
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self {
            eow: Symbol::from(DEFAULT_EOW),
            tie_break: TieBreak::default(),
            parallel: true,
        }
    }
}

fn count_words(line: &str, word_counts: &mut WordCounts) {
    for word in line.split_whitespace() {
        *word_counts.entry(CompactString::from(word)).or_insert(0) += 1;
    }
}

fn sum_counts(mut a: WordCounts, mut b: WordCounts) -> WordCounts {
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    for (key, frequency) in b {
        *a.entry(key).or_insert(0) += frequency;
    }
    a
}

/// Rebuild `key` with every adjacent `left right` replaced by `merged`.
///
/// Returns `None` if the pair does not occur at symbol boundaries.
fn merge_key(key: &str, left: &str, right: &str, merged: &str) -> Option<CompactString> {
    let symbols: Vec<&str> = split_key(key).collect();
    let mut out = CompactString::with_capacity(key.len());
    let mut changed = false;
    let mut i = 0;

    while i < symbols.len() {
        if i > 0 {
            out.push(SYMBOL_SEPARATOR);
        }
        if i + 1 < symbols.len() && symbols[i] == left && symbols[i + 1] == right {
            out.push_str(merged);
            changed = true;
            i += 2;
        } else {
            out.push_str(symbols[i]);
            i += 1;
        }
    }

    changed.then_some(out)
}

/// Pair scores for a vocabulary, keyed by owned symbols.
///
/// Convenience for inspection and tests; the training loop scores through
/// [`VocabularyBuilder::select_best_candidate`].
pub fn pair_scores(vocab: &WordVocab) -> AHashMap<Pair, u64> {
    PairCounter::new(vocab)
        .count_pairs_sequential()
        .into_iter()
        .map(|((left, right), count)| ((Symbol::from(left), Symbol::from(right)), count))
        .collect()
}
