//! Symbols and canonical vocabulary keys.
//!
//! A word's decomposition is stored as its symbols joined by a single space.
//! Symbols never contain whitespace, so splitting a key on spaces always
//! recovers the exact symbol sequence.

use crate::error::{Result, TokenizerError};
use compact_str::CompactString;

/// An atomic unit of a word decomposition.
pub type Symbol = CompactString;

/// Default end-of-word marker.
pub const DEFAULT_EOW: &str = "_EOW";

/// Separator between symbols in a vocabulary key.
pub const SYMBOL_SEPARATOR: char = ' ';

/// Split a vocabulary key into its symbols.
#[inline]
pub fn split_key(key: &str) -> impl Iterator<Item = &str> + '_ {
    key.split(SYMBOL_SEPARATOR)
}

/// Join symbols into a canonical vocabulary key.
pub fn join_symbols<S: AsRef<str>>(symbols: &[S]) -> CompactString {
    let mut key = CompactString::default();
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            key.push(SYMBOL_SEPARATOR);
        }
        key.push_str(symbol.as_ref());
    }
    key
}

/// Build the initial key of a word: one symbol per character, then the marker.
///
/// `"low"` with marker `"_EOW"` becomes `"l o w _EOW"`.
pub fn word_key(word: &str, eow: &str) -> CompactString {
    let mut key = CompactString::default();
    for ch in word.chars() {
        key.push(ch);
        key.push(SYMBOL_SEPARATOR);
    }
    key.push_str(eow);
    key
}

/// Check that a string can be used as a symbol.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(TokenizerError::InvalidMerge("empty symbol".to_string()));
    }
    if symbol.chars().any(char::is_whitespace) {
        return Err(TokenizerError::InvalidMerge(format!(
            "symbol {:?} contains whitespace",
            symbol
        )));
    }
    Ok(())
}

/// Check that a string can be used as the end-of-word marker.
///
/// The marker must be a valid symbol and at least two characters long, so it
/// can never be confused with a single-character symbol from the corpus.
pub fn validate_eow(eow: &str) -> Result<()> {
    validate_symbol(eow)
        .map_err(|e| TokenizerError::InvalidConfig(format!("end-of-word marker: {}", e)))?;
    if eow.chars().count() < 2 {
        return Err(TokenizerError::InvalidConfig(format!(
            "end-of-word marker {:?} must be at least two characters",
            eow
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_key() {
        assert_eq!(word_key("low", DEFAULT_EOW), "l o w _EOW");
        assert_eq!(word_key("a", DEFAULT_EOW), "a _EOW");
        assert_eq!(word_key("héé", "</w>"), "h é é </w>");
    }

    #[test]
    fn test_join_and_split() {
        let key = join_symbols(&["lo", "w", "_EOW"]);
        assert_eq!(key, "lo w _EOW");
        assert_eq!(split_key(&key).collect::<Vec<_>>(), vec!["lo", "w", "_EOW"]);
    }

    #[test]
    fn test_validate_eow() {
        assert!(validate_eow("_EOW").is_ok());
        assert!(validate_eow("</w>").is_ok());
        assert!(validate_eow("").is_err());
        assert!(validate_eow("x").is_err());
        assert!(validate_eow("end word").is_err());
    }

    #[test]
    fn test_validate_symbol() {
        assert!(validate_symbol("ab").is_ok());
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("a\tb").is_err());
    }
}
