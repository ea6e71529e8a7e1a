use crate::round::{MAX_ATTEMPTS, Outcome, RoundController, RoundError, Turn};
use crate::word::Word;
use crate::wordbank::Dictionary;
use crate::{debug_log, info_log};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// Rounds finished during one session. Abandoned rounds are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub won: usize,
    pub lost: usize,
}

impl SessionStats {
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.won + self.lost
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => self.won += 1,
            Outcome::Lost => self.lost += 1,
        }
    }
}

/// Trait for game UI implementations (CLI or TUI)
pub trait GameInterface {
    fn display_round_started(&mut self, max_attempts: usize);
    /// `None` means nothing usable was entered and the caller should ask again.
    fn read_guess(&mut self, attempt: usize, max_attempts: usize) -> Option<UserAction>;
    fn display_turn(&mut self, turn: &Turn);
    fn display_rejected_guess(&mut self, error: &RoundError);
    fn display_outcome(&mut self, outcome: Outcome, target: &Word);
    fn read_play_again(&mut self) -> bool;
    fn display_exit_message(&mut self, stats: &SessionStats);
}

/// Play rounds until the player exits or declines another round.
///
/// # Errors
/// `RoundError::EmptyDictionary` if a round cannot be started. Other round
/// errors indicate a broken presenter contract and are passed through too.
pub fn game_loop<I, R>(
    dictionary: &Dictionary,
    controller: &mut RoundController<R>,
    interface: &mut I,
) -> Result<SessionStats, RoundError>
where
    I: GameInterface + ?Sized,
    R: Rng,
{
    let mut stats = SessionStats::default();

    'session: loop {
        controller.start_new_round(dictionary)?;
        info_log!("New round started ({} words)", dictionary.len());
        interface.display_round_started(MAX_ATTEMPTS);

        while !controller.is_terminal() {
            let attempt = controller.history().len() + 1;
            let guess = match interface.read_guess(attempt, MAX_ATTEMPTS) {
                Some(UserAction::Guess(guess)) => guess,
                Some(UserAction::Exit) => {
                    info_log!("Player left during round at attempt {}", attempt);
                    break 'session;
                }
                None => continue,
            };

            match controller.submit_guess(&guess) {
                Ok(_) => {
                    if let Some(turn) = controller.history().last() {
                        interface.display_turn(turn);
                    }
                }
                Err(e) if e.is_rejected_guess() => {
                    debug_log!("game_loop() - rejected guess '{}': {}", guess, e);
                    interface.display_rejected_guess(&e);
                }
                Err(e) => return Err(e),
            }
        }

        if let (Some(outcome), Some(target)) = (controller.outcome(), controller.target()) {
            info_log!("Round finished: {:?}", outcome);
            stats.record(outcome);
            interface.display_outcome(outcome, target);
        }

        if !interface.read_play_again() {
            break;
        }
    }

    log::info!(
        "Session over after {} rounds: {} won, {} lost",
        stats.rounds(),
        stats.won,
        stats.lost
    );
    interface.display_exit_message(&stats);
    Ok(stats)
}
