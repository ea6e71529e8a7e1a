//! TUI (Terminal User Interface) presenter
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `Board`: what is on screen and how keys change it, with no terminal attached
//! - `TuiInterface`: owns the terminal, draws the `Board` and feeds it key events
//!
//! # State Machine
//! - `EnteringGuess` → (round won or lost) → `RoundOver` → `EnteringGuess` on a new round

use crate::evaluator::Verdict;
use crate::game_state::{GameInterface, SessionStats, UserAction};
use crate::round::{Outcome, RoundError, Turn};
use crate::word::{WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Empty,
    Entered,
    Scored(Verdict),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Scored(Verdict::Correct) => (Color::Green, Color::Black),
            Self::Scored(Verdict::Misplaced) => (Color::Yellow, Color::Black),
            Self::Scored(Verdict::Absent) => (Color::Gray, Color::White),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn empty() -> Self {
        Self {
            letters: [' '; WORD_LENGTH],
            states: [LetterState::Empty; WORD_LENGTH],
        }
    }

    fn from_input(input: &str) -> Self {
        let mut row = Self::empty();
        for (i, ch) in input.chars().enumerate().take(WORD_LENGTH) {
            row.letters[i] = ch;
            row.states[i] = LetterState::Entered;
        }
        row
    }

    fn from_turn(turn: &Turn) -> Self {
        let mut row = Self::empty();
        for (i, (letter, &verdict)) in turn
            .guess
            .chars()
            .zip(turn.comparison.verdicts())
            .enumerate()
        {
            row.letters[i] = letter;
            row.states[i] = LetterState::Scored(verdict);
        }
        row
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Round won or lost - outcome text stored in `Board::message`
    RoundOver,
}

/// What a key press asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BoardEvent {
    Action(UserAction),
    PlayAgain(bool),
}

/// Screen contents and key handling, independent of the terminal.
#[derive(Debug)]
struct Board {
    rows: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    max_attempts: usize,
    message: String,
    error_message: String,
    status: String,
}

impl Board {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            max_attempts: crate::round::MAX_ATTEMPTS,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        }
    }

    fn start_round(&mut self, max_attempts: usize) {
        self.rows.clear();
        self.current_input.clear();
        self.error_message.clear();
        self.max_attempts = max_attempts;
        self.state = TuiState::EnteringGuess;
        self.message = "I picked a random 5-letter word. Try to guess it.".to_string();
    }

    fn record_turn(&mut self, turn: &Turn) {
        self.rows.push(GuessRow::from_turn(turn));
        self.error_message.clear();
    }

    fn finish_round(&mut self, outcome: Outcome, target: &Word) {
        self.state = TuiState::RoundOver;
        match outcome {
            Outcome::Won => self.message = format!("✓ Congrats! You guessed {target}."),
            Outcome::Lost => self.message = format!("The word was {target}."),
        }
        self.status = "Round over".to_string();
    }

    fn show_exit(&mut self, stats: &SessionStats) {
        self.message = format!("Exiting... won {}, lost {}", stats.won, stats.lost);
        self.status = "Exiting application...".to_string();
    }

    /// All rows to draw: scored guesses, the row being typed, then blanks.
    fn display_rows(&self) -> Vec<GuessRow> {
        let mut rows = self.rows.clone();
        if self.state == TuiState::EnteringGuess && rows.len() < self.max_attempts {
            rows.push(GuessRow::from_input(&self.current_input));
        }
        rows.resize(self.max_attempts.max(rows.len()), GuessRow::empty());
        rows
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Garbage that shows up when alt-tabbing: replacement and control characters.
    fn is_noise(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Char(c)
            if c == '\u{FFFD}' || ((c as u32) < ASCII_CONTROL_CHAR_THRESHOLD && c != '\t'))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<BoardEvent> {
        if key.kind != KeyEventKind::Press || Self::is_noise(&key) {
            debug_log!("handle_key() - Ignoring key event: {:?}", key);
            return None;
        }
        match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key).map(BoardEvent::Action),
            TuiState::RoundOver => Self::handle_round_over_input(key).map(BoardEvent::PlayAgain),
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Char(_) if Self::has_modifier_keys(&key) => {
                debug_log!(
                    "handle_guess_input() - Ignoring character with modifier: {:?}",
                    key.modifiers
                );
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.current_input.len() < WORD_LENGTH {
                    self.current_input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.len() == WORD_LENGTH => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = "Guess must be exactly 5 letters!".to_string();
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_round_over_input(key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('n' | 'N' | 'y' | 'Y') | KeyCode::Enter => Some(true),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(false),
            _ => None,
        }
    }

    fn instructions(&self) -> &'static str {
        match self.state {
            TuiState::EnteringGuess => "Type your 5-letter guess | ENTER: Submit | ESC: Quit",
            TuiState::RoundOver => "N/Y/ENTER: New round | Q/ESC: Quit",
        }
    }
}

/// Main TUI interface component.
///
/// Manages terminal rendering and input, and draws the `Board`.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Board,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = undo_on_error(Self::enter_screen(), restore_terminal)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: Board::new(),
        })
    }

    fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let board = &self.board;
        self.terminal.draw(|f| render(f, board))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            log::warn!("Draw error: {e}");
        }
    }

    /// Draw, then wait for one key the board turns into an event.
    fn next_event(&mut self) -> Result<BoardEvent, io::Error> {
        loop {
            self.draw()?;
            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if let Some(event) = self.board.handle_key(key) {
                        return Ok(event);
                    }
                }
                other => debug_log!("next_event() - Ignoring event: {:?}", other),
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_round_started(&mut self, max_attempts: usize) {
        self.board.start_round(max_attempts);
        self.draw_or_log();
    }

    fn read_guess(&mut self, attempt: usize, max_attempts: usize) -> Option<UserAction> {
        self.board.status = format!("Guess {attempt}/{max_attempts}");
        loop {
            match self.next_event() {
                Ok(BoardEvent::Action(action)) => return Some(action),
                Ok(BoardEvent::PlayAgain(_)) => {}
                Err(e) => {
                    log::error!("read_guess() - Terminal error, exiting: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_turn(&mut self, turn: &Turn) {
        self.board.record_turn(turn);
        self.draw_or_log();
    }

    fn display_rejected_guess(&mut self, error: &RoundError) {
        self.board.error_message = format!("Invalid guess: {error}");
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: Outcome, target: &Word) {
        self.board.finish_round(outcome, target);
        self.draw_or_log();
    }

    fn read_play_again(&mut self) -> bool {
        loop {
            match self.next_event() {
                Ok(BoardEvent::PlayAgain(again)) => return again,
                Ok(BoardEvent::Action(UserAction::Exit)) => return false,
                Ok(BoardEvent::Action(_)) => {}
                Err(e) => {
                    log::error!("read_play_again() - Terminal error, exiting: {e}");
                    return false;
                }
            }
        }
    }

    fn display_exit_message(&mut self, stats: &SessionStats) {
        self.board.show_exit(stats);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Run `undo` if a setup step failed, then pass the result on.
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Leave raw mode and the alternate screen after a failed setup.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        log::warn!("Failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        log::warn!("Failed to leave alternate screen: {e}");
    }
}

fn render(f: &mut Frame, board: &Board) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Game board
            Constraint::Min(4),     // Messages
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], board);
    render_info(f, chunks[2], board);
    render_status(f, chunks[3], &board.status);
    render_instructions(f, chunks[4], board.instructions());
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

#[allow(clippy::cast_possible_truncation)]
fn render_board(f: &mut Frame, area: Rect, board: &Board) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (index, row) in board.display_rows().iter().enumerate() {
        let y = inner.y + (index as u16 * ROW_SPACING);
        if y >= inner.y + inner.height {
            break;
        }

        let mut spans = vec![Span::raw("  ")];
        for (&letter, &state) in row.letters.iter().zip(row.states.iter()) {
            let (bg_color, fg_color) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        f.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
        );
    }
}

fn render_info(f: &mut Frame, area: Rect, board: &Board) {
    let mut lines = Vec::new();

    if !board.message.is_empty() {
        let style = match (board.state, board.message.starts_with('✓')) {
            (TuiState::RoundOver, true) => SUCCESS_STYLE,
            (TuiState::RoundOver, false) => FAILURE_STYLE,
            (TuiState::EnteringGuess, _) => MESSAGE_STYLE,
        };
        lines.push(Line::from(vec![Span::styled(board.message.as_str(), style)]));
    }

    if !board.error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(
            board.error_message.as_str(),
            ERROR_STYLE,
        )]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}
