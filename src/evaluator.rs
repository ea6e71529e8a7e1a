//! Guess evaluation.
//!
//! Scores a guess against the target with the usual duplicate-letter rules:
//! exact matches are taken first, then remaining guess letters claim the
//! leftmost unclaimed occurrence of the same letter in the target. A letter
//! repeated in the guess more often than in the target is only credited as
//! many times as the target holds it.

use crate::word::{WORD_LENGTH, Word};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("guess and target must both be 5 letters (guess: {guess}, target: {target})")]
    LengthMismatch { guess: usize, target: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Gray
    Absent,
    /// Green
    Correct,
    /// Yellow
    Misplaced,
}

impl Verdict {
    /// Numeric code used in the per-turn summary line.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Correct => 1,
            Self::Misplaced => 2,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Absent => 'X',
            Self::Correct => 'G',
            Self::Misplaced => 'Y',
        }
    }
}

/// Per-position verdicts for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Comparison([Verdict; WORD_LENGTH]);

impl Comparison {
    /// Compare two validated words.
    #[must_use]
    pub fn between(guess: &Word, target: &Word) -> Self {
        Self(score(guess.letters(), target.letters()))
    }

    #[must_use]
    pub const fn verdicts(&self) -> &[Verdict; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn is_all_correct(&self) -> bool {
        self.0.iter().all(|&v| v == Verdict::Correct)
    }

    /// The numeric form, e.g. `[1 0 2 0 0]`.
    #[must_use]
    pub fn codes(&self) -> String {
        let codes: Vec<String> = self.0.iter().map(|v| v.code().to_string()).collect();
        format!("[{}]", codes.join(" "))
    }
}

impl std::ops::Index<usize> for Comparison {
    type Output = Verdict;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for verdict in &self.0 {
            write!(f, "{}", verdict.to_char())?;
        }
        Ok(())
    }
}

/// Evaluate raw strings, case-insensitively.
///
/// # Errors
/// `EvaluationError::LengthMismatch` if either side is not exactly five
/// characters long. Nothing is truncated or padded.
pub fn evaluate(guess: &str, target: &str) -> Result<Comparison, EvaluationError> {
    match (uppercase_letters(guess), uppercase_letters(target)) {
        (Some(guess), Some(target)) => Ok(Comparison(score(&guess, &target))),
        _ => Err(EvaluationError::LengthMismatch {
            guess: guess.chars().count(),
            target: target.chars().count(),
        }),
    }
}

fn uppercase_letters(text: &str) -> Option<[char; WORD_LENGTH]> {
    let letters: Vec<char> = text.chars().map(|c| c.to_ascii_uppercase()).collect();
    letters.try_into().ok()
}

fn score<T: Copy + PartialEq>(
    guess: &[T; WORD_LENGTH],
    target: &[T; WORD_LENGTH],
) -> [Verdict; WORD_LENGTH] {
    let mut verdicts = [Verdict::Absent; WORD_LENGTH];
    let mut consumed = [false; WORD_LENGTH];
    let mut pending = Vec::with_capacity(WORD_LENGTH);

    // First pass: greens
    for i in 0..WORD_LENGTH {
        if guess[i] == target[i] {
            verdicts[i] = Verdict::Correct;
            consumed[i] = true;
        } else {
            pending.push(i);
        }
    }

    // Second pass: yellows, claiming the leftmost unconsumed slot
    for i in pending {
        let slot = target
            .iter()
            .zip(consumed.iter())
            .position(|(&letter, &used)| letter == guess[i] && !used);
        if let Some(pos) = slot {
            verdicts[i] = Verdict::Misplaced;
            consumed[pos] = true;
        }
    }

    verdicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Verdict::{Absent, Correct, Misplaced};

    fn verdicts(guess: &str, target: &str) -> [Verdict; WORD_LENGTH] {
        *evaluate(guess, target).unwrap().verdicts()
    }

    #[test]
    fn test_same_word_is_all_correct() {
        for word in ["CRANE", "SPEED", "EERIE", "AAAAA", "LEVEL"] {
            let comparison = evaluate(word, word).unwrap();
            assert!(comparison.is_all_correct(), "{word} against itself");
        }
    }

    #[test]
    fn test_disjoint_letters_are_all_absent() {
        assert_eq!(verdicts("CRANE", "LOFTY"), [Absent; 5]);
        assert_eq!(verdicts("BBBBB", "AAAAA"), [Absent; 5]);
    }

    #[test]
    fn test_reversed_word() {
        assert_eq!(
            verdicts("ABCDE", "EDCBA"),
            [Misplaced, Misplaced, Correct, Misplaced, Misplaced]
        );
    }

    #[test]
    fn test_repeated_guess_letter_credited_once() {
        // ABIDE has a single E; only the first of SPEED's E's may be yellow.
        assert_eq!(
            verdicts("SPEED", "ABIDE"),
            [Absent, Absent, Misplaced, Absent, Misplaced]
        );
    }

    #[test]
    fn test_repeated_guess_letter_credited_per_occurrence() {
        // ERASE holds two E's, so both of SPEED's E's are yellow.
        assert_eq!(
            verdicts("SPEED", "ERASE"),
            [Misplaced, Absent, Misplaced, Misplaced, Absent]
        );
    }

    #[test]
    fn test_exact_match_consumes_before_misplaced() {
        // The E at position 1 is green, so the later E finds nothing left.
        assert_eq!(
            verdicts("LEVEL", "HELLO"),
            [Misplaced, Correct, Absent, Absent, Misplaced]
        );
        // A later green must not be stolen by an earlier yellow.
        assert_eq!(
            verdicts("EEXXX", "XEXXX"),
            [Absent, Correct, Correct, Correct, Correct]
        );
    }

    #[test]
    fn test_credit_never_exceeds_target_count() {
        let cases = [
            ("SPEED", "ABIDE"),
            ("EERIE", "THEME"),
            ("LLAMA", "HELLO"),
            ("AAAAA", "BANAL"),
            ("GEESE", "AGREE"),
        ];
        for (guess, target) in cases {
            let comparison = evaluate(guess, target).unwrap();
            for letter in guess.bytes() {
                let credited = guess
                    .bytes()
                    .zip(comparison.verdicts())
                    .filter(|&(g, &v)| g == letter && v != Absent)
                    .count();
                let available = target.bytes().filter(|&t| t == letter).count();
                assert!(
                    credited <= available,
                    "{guess} vs {target}: {} credited {credited} times",
                    char::from(letter)
                );
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(evaluate("crane", "CRANE").unwrap(), evaluate("CRANE", "crane").unwrap());
        assert!(evaluate("crane", "CRANE").unwrap().is_all_correct());
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            evaluate("CRAN", "CRANE"),
            Err(EvaluationError::LengthMismatch { guess: 4, target: 5 })
        );
        assert_eq!(
            evaluate("CRANE", "CRANES"),
            Err(EvaluationError::LengthMismatch { guess: 5, target: 6 })
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        // 'É' is two bytes but one letter.
        assert_eq!(
            verdicts("CRANÉ", "CRANE"),
            [Correct, Correct, Correct, Correct, Absent]
        );
        assert_eq!(
            evaluate("CRANÉS", "CRANE"),
            Err(EvaluationError::LengthMismatch { guess: 6, target: 5 })
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let first = evaluate("SPEED", "ERASE").unwrap();
        let second = evaluate("SPEED", "ERASE").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_between_matches_evaluate() {
        let guess = Word::new("crane").unwrap();
        let target = Word::new("slate").unwrap();
        assert_eq!(
            Comparison::between(&guess, &target),
            evaluate("CRANE", "SLATE").unwrap()
        );
    }

    #[test]
    fn test_comparison_rendering() {
        let comparison = evaluate("CRANE", "SLATE").unwrap();
        assert_eq!(comparison.to_string(), "XXGXG");
        assert_eq!(comparison.codes(), "[0 0 1 0 1]");
        assert_eq!(comparison[2], Correct);
    }
}
