use crate::evaluator::Verdict;
use crate::game_state::{GameInterface, SessionStats, UserAction};
use crate::round::{Outcome, RoundError, Turn};
use crate::word::Word;
use crate::wordbank::{DEFAULT_DICTIONARY_URL, WordSource, get_dictionary_cache_path};
use clap::Parser;
use crossterm::style::Stylize;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Guess the hidden 5-letter word in six attempts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited dictionary file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Where to download the dictionary from when no cached copy exists
    #[arg(long, default_value = DEFAULT_DICTIONARY_URL)]
    pub url: String,

    /// Never download; fall back to the built-in word list
    #[arg(long)]
    pub offline: bool,

    /// Seed for picking target words (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Print guesses without colours
    #[arg(long)]
    pub no_color: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the dictionary source from the flags.
    #[must_use]
    pub fn word_source(&self) -> WordSource {
        if let Some(path) = &self.wordbank_path {
            return WordSource::File(path.clone());
        }
        match get_dictionary_cache_path() {
            Some(path) if !self.offline || path.is_file() => WordSource::Cached {
                path,
                url: self.url.clone(),
            },
            _ => WordSource::Embedded,
        }
    }

    /// Colour is skipped on request and on Windows consoles.
    #[must_use]
    pub fn use_color(&self) -> bool {
        !self.no_color && !cfg!(windows)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

const EXIT_COMMANDS: [&str; 2] = ["EXIT", "QUIT"];

/// Interpret one line of player input.
fn parse_guess(input: &str) -> Option<UserAction> {
    let input = input.trim().to_uppercase();
    if input.is_empty() {
        None
    } else if EXIT_COMMANDS.contains(&input.as_str()) {
        Some(UserAction::Exit)
    } else {
        Some(UserAction::Guess(input))
    }
}

fn is_yes(reply: &str) -> bool {
    matches!(reply.trim().to_lowercase().as_str(), "y" | "yes")
}

/// `S L A T E` with each letter coloured by its verdict.
#[must_use]
pub fn render_turn(turn: &Turn, color: bool) -> String {
    turn.guess
        .chars()
        .zip(turn.comparison.verdicts())
        .map(|(letter, &verdict)| {
            let cell = format!(" {letter} ");
            if !color {
                return cell;
            }
            match verdict {
                Verdict::Correct => cell.black().on_green().to_string(),
                Verdict::Misplaced => cell.black().on_yellow().to_string(),
                Verdict::Absent => cell.white().on_dark_grey().to_string(),
            }
        })
        .collect()
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and a writer so sessions can be scripted in tests.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W, color: bool) -> Self {
        Self {
            reader,
            writer,
            color,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.writer.write_fmt(args).and_then(|()| self.writer.flush()) {
            log::warn!("Failed to write to terminal: {e}");
        }
    }

    /// `None` at end of input or on a read error.
    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_round_started(&mut self, max_attempts: usize) {
        self.say(format_args!(
            "I picked a random 5-letter word. Try to guess it in {max_attempts} attempts.\n"
        ));
    }

    fn read_guess(&mut self, attempt: usize, max_attempts: usize) -> Option<UserAction> {
        self.say(format_args!(
            "Guess {attempt}/{max_attempts}. Please enter a 5-letter word (or 'exit'): "
        ));
        let Some(line) = self.read_line() else {
            return Some(UserAction::Exit);
        };
        parse_guess(&line)
    }

    fn display_turn(&mut self, turn: &Turn) {
        let rendered = render_turn(turn, self.color);
        let codes = turn.comparison.codes();
        self.say(format_args!("{rendered} - your guess compared: {codes}\n"));
    }

    fn display_rejected_guess(&mut self, error: &RoundError) {
        self.say(format_args!("Invalid input: {error}. You must enter a 5-letter word.\n"));
    }

    fn display_outcome(&mut self, outcome: Outcome, target: &Word) {
        match outcome {
            Outcome::Won => self.say(format_args!("Congrats! You guessed the correct word.\n")),
            Outcome::Lost => self.say(format_args!(
                "You didn't guess the right word. It was {target}\n"
            )),
        }
    }

    fn read_play_again(&mut self) -> bool {
        self.say(format_args!("Press 'y(es)' for another round, else exit. "));
        let again = self.read_line().is_some_and(|reply| is_yes(&reply));
        if again {
            self.say(format_args!("---- new game ----\n"));
        }
        again
    }

    fn display_exit_message(&mut self, stats: &SessionStats) {
        self.say(format_args!(
            "\nThanks for playing! Rounds won: {}, lost: {}.\n",
            stats.won, stats.lost
        ));
    }
}
