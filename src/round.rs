//! Round state machine.
//!
//! # State Machine
//! `Active(0)` → `Active(n)` on each wrong guess → `Lost` when `n` reaches
//! `MAX_ATTEMPTS`; any state `Active(_)` → `Won` on a correct guess.
//! `Won` and `Lost` are terminal until `start_new_round` replaces the round.

use crate::debug_log;
use crate::evaluator::Comparison;
use crate::word::{Word, WordError};
use crate::wordbank::Dictionary;
use rand::Rng;
use thiserror::Error;

pub const MAX_ATTEMPTS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("guess must be exactly 5 letters, got {0}")]
    InvalidGuessLength(usize),
    #[error("guess may only contain letters ('{0}' is not a letter)")]
    InvalidGuessCharacter(char),
    #[error("dictionary is empty, no word to choose")]
    EmptyDictionary,
    #[error("round is over, start a new round")]
    RoundOver,
    #[error("no round has been started")]
    NoActiveRound,
}

impl RoundError {
    /// True for errors caused by the guess text itself. The player can retry.
    #[must_use]
    pub const fn is_rejected_guess(&self) -> bool {
        matches!(
            self,
            Self::InvalidGuessLength(_) | Self::InvalidGuessCharacter(_)
        )
    }
}

impl From<WordError> for RoundError {
    fn from(error: WordError) -> Self {
        match error {
            WordError::InvalidLength(length) => Self::InvalidGuessLength(length),
            WordError::InvalidCharacter(c) => Self::InvalidGuessCharacter(c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Number of wrong guesses so far.
    Active(usize),
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// One accepted guess and its feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub guess: Word,
    pub comparison: Comparison,
}

#[derive(Debug, Clone)]
struct Round {
    target: Word,
    state: RoundState,
    turns: Vec<Turn>,
}

impl Round {
    fn new(target: Word) -> Self {
        Self {
            target,
            state: RoundState::Active(0),
            turns: Vec::with_capacity(MAX_ATTEMPTS),
        }
    }
}

/// Owns the current round and the random source used to pick targets.
#[derive(Debug)]
pub struct RoundController<R> {
    rng: R,
    round: Option<Round>,
}

impl<R: Rng> RoundController<R> {
    /// No round is active until `start_new_round` is called.
    pub fn new(rng: R) -> Self {
        Self { rng, round: None }
    }

    /// Replace the current round with a fresh one on a uniformly chosen
    /// target. On error the previous round is left as it was.
    ///
    /// # Errors
    /// `RoundError::EmptyDictionary` when there is nothing to choose from.
    pub fn start_new_round(&mut self, dictionary: &Dictionary) -> Result<(), RoundError> {
        let target = *dictionary
            .choose(&mut self.rng)
            .ok_or(RoundError::EmptyDictionary)?;
        debug_log!("start_new_round() - target chosen from {} words", dictionary.len());
        self.round = Some(Round::new(target));
        Ok(())
    }

    /// Score a guess and advance the round.
    ///
    /// Rejected guesses leave the round untouched and do not use an attempt.
    ///
    /// # Errors
    /// `InvalidGuessLength`/`InvalidGuessCharacter` for malformed guesses,
    /// `RoundOver` once the round is won or lost, `NoActiveRound` before the
    /// first round.
    pub fn submit_guess(&mut self, guess: &str) -> Result<(Comparison, RoundState), RoundError> {
        let round = self.round.as_mut().ok_or(RoundError::NoActiveRound)?;
        let RoundState::Active(attempts_used) = round.state else {
            return Err(RoundError::RoundOver);
        };
        let guess = Word::new(guess)?;

        let comparison = Comparison::between(&guess, &round.target);
        round.state = if guess == round.target {
            RoundState::Won
        } else if attempts_used + 1 >= MAX_ATTEMPTS {
            RoundState::Lost
        } else {
            RoundState::Active(attempts_used + 1)
        };
        round.turns.push(Turn { guess, comparison });

        debug_log!(
            "submit_guess() - {} scored {} -> {:?}",
            guess,
            comparison,
            round.state
        );
        Ok((comparison, round.state))
    }

    #[must_use]
    pub fn state(&self) -> Option<RoundState> {
        self.round.as_ref().map(|round| round.state)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.state(), Some(RoundState::Won | RoundState::Lost))
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state()? {
            RoundState::Active(_) => None,
            RoundState::Won => Some(Outcome::Won),
            RoundState::Lost => Some(Outcome::Lost),
        }
    }

    /// Wrong guesses so far in the current round.
    #[must_use]
    pub fn attempts_used(&self) -> usize {
        match self.state() {
            Some(RoundState::Active(used)) => used,
            Some(RoundState::Lost) => MAX_ATTEMPTS,
            Some(RoundState::Won) => self.history().len().saturating_sub(1),
            None => 0,
        }
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        match self.state() {
            Some(RoundState::Active(used)) => MAX_ATTEMPTS - used,
            Some(_) => 0,
            None => MAX_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&Word> {
        self.round.as_ref().map(|round| &round.target)
    }

    #[must_use]
    pub fn history(&self) -> &[Turn] {
        self.round
            .as_ref()
            .map(|round| round.turns.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::load_wordbank_from_str;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn single_word(word: &str) -> Dictionary {
        Dictionary::new(load_wordbank_from_str(word))
    }

    fn controller_for(word: &str) -> RoundController<StdRng> {
        let mut controller = RoundController::new(StdRng::seed_from_u64(42));
        controller.start_new_round(&single_word(word)).unwrap();
        controller
    }

    #[test]
    fn test_single_word_dictionary_always_selected() {
        let dictionary = single_word("CRANE");
        let mut controller = RoundController::new(StdRng::seed_from_u64(1));
        for _ in 0..10 {
            controller.start_new_round(&dictionary).unwrap();
            assert_eq!(controller.target().unwrap().as_str(), "CRANE");
            assert!(!controller.is_terminal());
            assert_eq!(controller.state(), Some(RoundState::Active(0)));
            assert_eq!(controller.outcome(), None);
        }
    }

    #[test]
    fn test_empty_dictionary() {
        let mut controller = RoundController::new(StdRng::seed_from_u64(1));
        assert_eq!(
            controller.start_new_round(&Dictionary::default()),
            Err(RoundError::EmptyDictionary)
        );
        assert_eq!(controller.state(), None);
    }

    #[test]
    fn test_empty_dictionary_keeps_previous_round() {
        let mut controller = controller_for("CRANE");
        controller.submit_guess("SLATE").unwrap();
        assert!(controller.start_new_round(&Dictionary::default()).is_err());
        assert_eq!(controller.state(), Some(RoundState::Active(1)));
        assert_eq!(controller.target().unwrap().as_str(), "CRANE");
    }

    #[test]
    fn test_lost_exactly_on_sixth_wrong_guess() {
        let mut controller = controller_for("CRANE");
        for attempt in 1..MAX_ATTEMPTS {
            let (_, state) = controller.submit_guess("SLATE").unwrap();
            assert_eq!(state, RoundState::Active(attempt));
            assert!(!controller.is_terminal());
            assert_eq!(controller.attempts_remaining(), MAX_ATTEMPTS - attempt);
        }

        let (_, state) = controller.submit_guess("SLATE").unwrap();
        assert_eq!(state, RoundState::Lost);
        assert!(controller.is_terminal());
        assert_eq!(controller.outcome(), Some(Outcome::Lost));
        assert_eq!(controller.attempts_used(), MAX_ATTEMPTS);
        assert_eq!(controller.attempts_remaining(), 0);

        assert_eq!(controller.submit_guess("CRANE"), Err(RoundError::RoundOver));
    }

    #[test]
    fn test_won_at_every_attempt() {
        for wrong_guesses in 0..MAX_ATTEMPTS {
            let mut controller = controller_for("CRANE");
            for _ in 0..wrong_guesses {
                controller.submit_guess("SLATE").unwrap();
            }

            let (comparison, state) = controller.submit_guess("crane").unwrap();
            assert!(comparison.is_all_correct());
            assert_eq!(state, RoundState::Won);
            assert_eq!(controller.outcome(), Some(Outcome::Won));
            assert_eq!(controller.history().len(), wrong_guesses + 1);
            assert_eq!(controller.attempts_used(), wrong_guesses);

            // Terminal rounds reject further guesses.
            assert_eq!(controller.submit_guess("CRANE"), Err(RoundError::RoundOver));
            assert_eq!(controller.submit_guess("SLATE"), Err(RoundError::RoundOver));
            assert_eq!(controller.history().len(), wrong_guesses + 1);
        }
    }

    #[test]
    fn test_invalid_guess_does_not_use_attempt() {
        let mut controller = controller_for("CRANE");
        assert_eq!(
            controller.submit_guess("CRAN"),
            Err(RoundError::InvalidGuessLength(4))
        );
        assert_eq!(
            controller.submit_guess("CRANES"),
            Err(RoundError::InvalidGuessLength(6))
        );
        assert_eq!(
            controller.submit_guess("CR4NE"),
            Err(RoundError::InvalidGuessCharacter('4'))
        );
        assert_eq!(controller.state(), Some(RoundState::Active(0)));
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_rejected_guess_classification() {
        assert!(RoundError::InvalidGuessLength(3).is_rejected_guess());
        assert!(RoundError::InvalidGuessCharacter('1').is_rejected_guess());
        assert!(!RoundError::RoundOver.is_rejected_guess());
        assert!(!RoundError::EmptyDictionary.is_rejected_guess());
    }

    #[test]
    fn test_submit_without_round() {
        let mut controller = RoundController::new(StdRng::seed_from_u64(1));
        assert_eq!(controller.submit_guess("CRANE"), Err(RoundError::NoActiveRound));
        assert!(!controller.is_terminal());
        assert_eq!(controller.outcome(), None);
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_new_round_resets_state() {
        let dictionary = single_word("CRANE");
        let mut controller = RoundController::new(StdRng::seed_from_u64(3));
        controller.start_new_round(&dictionary).unwrap();
        controller.submit_guess("SLATE").unwrap();
        controller.submit_guess("CRANE").unwrap();
        assert!(controller.is_terminal());

        controller.start_new_round(&dictionary).unwrap();
        assert_eq!(controller.state(), Some(RoundState::Active(0)));
        assert!(controller.history().is_empty());
        assert!(!controller.is_terminal());
    }

    #[test]
    fn test_history_records_turns() {
        let mut controller = controller_for("CRANE");
        let (comparison, _) = controller.submit_guess("slate").unwrap();
        let turn = &controller.history()[0];
        assert_eq!(turn.guess.as_str(), "SLATE");
        assert_eq!(turn.comparison, comparison);
    }

    #[test]
    fn test_same_guess_same_comparison() {
        let mut controller = controller_for("CRANE");
        let (first, _) = controller.submit_guess("TRACE").unwrap();
        let (second, _) = controller.submit_guess("TRACE").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_seed_same_targets() {
        let dictionary = Dictionary::new(load_wordbank_from_str(
            "crane\nslate\nraise\nstare\narise\nirate\natone",
        ));
        let targets = |seed| {
            let mut controller = RoundController::new(StdRng::seed_from_u64(seed));
            (0..10)
                .map(|_| {
                    controller.start_new_round(&dictionary).unwrap();
                    *controller.target().unwrap()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(targets(99), targets(99));
    }
}
