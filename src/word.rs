//! Five-letter word type shared by the evaluator, the round controller and
//! the word bank.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const WORD_LENGTH: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("expected a 5-letter word, got {0} characters")]
    InvalidLength(usize),
    #[error("'{0}' is not an ASCII letter")]
    InvalidCharacter(char),
}

/// A validated word of exactly five ASCII letters, stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Build a word from user or file input.
    ///
    /// Surrounding whitespace is not trimmed here; callers decide what counts
    /// as a word. Lowercase input is accepted and normalized.
    ///
    /// # Errors
    /// `WordError::InvalidLength` when the input is not five characters long,
    /// `WordError::InvalidCharacter` for the first non-letter found.
    pub fn new(text: &str) -> Result<Self, WordError> {
        let length = text.chars().count();
        if length != WORD_LENGTH {
            return Err(WordError::InvalidLength(length));
        }

        let mut letters = [0u8; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(text.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::InvalidCharacter(c));
            }
            *slot = c.to_ascii_uppercase() as u8;
        }

        Ok(Self(letters))
    }

    #[must_use]
    pub const fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_is_uppercased() {
        let word = Word::new("crane").unwrap();
        assert_eq!(word.as_str(), "CRANE");
        assert_eq!(word, Word::new("CrAnE").unwrap());
    }

    #[test]
    fn test_word_rejects_wrong_length() {
        assert_eq!(Word::new("CRAN"), Err(WordError::InvalidLength(4)));
        assert_eq!(Word::new("CRANES"), Err(WordError::InvalidLength(6)));
        assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
    }

    #[test]
    fn test_word_rejects_non_letters() {
        assert_eq!(Word::new("CR4NE"), Err(WordError::InvalidCharacter('4')));
        assert_eq!(Word::new("CRA E"), Err(WordError::InvalidCharacter(' ')));
        // Five characters, but not ASCII.
        assert_eq!(Word::new("CRANÉ"), Err(WordError::InvalidCharacter('É')));
    }

    #[test]
    fn test_word_parse_and_display() {
        let word: Word = "slate".parse().unwrap();
        assert_eq!(word.to_string(), "SLATE");
        assert_eq!(word.chars().collect::<String>(), "SLATE");
    }
}
