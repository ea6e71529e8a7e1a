// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod round;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use evaluator::{Comparison, EvaluationError, Verdict, evaluate};
pub use game_state::{GameInterface, SessionStats, UserAction, game_loop};
pub use round::{MAX_ATTEMPTS, Outcome, RoundController, RoundError, RoundState, Turn};
pub use word::{Word, WordError};
pub use wordbank::{Dictionary, WordSource, load_dictionary, load_wordbank_from_file, load_wordbank_from_str};
