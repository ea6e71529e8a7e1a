// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "wordle-game.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Where log records end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to; used while the TUI owns the terminal.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub verbose: bool,
    pub target: LogTarget,
}

impl LogConfig {
    #[must_use]
    pub const fn default_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

/// `<cache dir>/wordle-game/wordle-game.log`, falling back to the temp dir.
#[must_use]
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("wordle-game")
        .join(LOG_FILE_NAME)
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. `RUST_LOG` overrides the level from `config`.
///
/// # Errors
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let env = Env::default().default_filter_or(config.default_level().as_str());
    let mut builder = Builder::from_env(env);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            Local::now().format(TIMESTAMP_FORMAT),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogTarget::File(path) = &config.target {
        let file = open_log_file(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder.try_init().map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_follows_verbosity() {
        let quiet = LogConfig {
            verbose: false,
            target: LogTarget::Stderr,
        };
        let loud = LogConfig {
            verbose: true,
            ..quiet.clone()
        };
        assert_eq!(quiet.default_level(), LevelFilter::Warn);
        assert_eq!(loud.default_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_default_log_path() {
        assert!(default_log_path().ends_with("wordle-game/wordle-game.log"));
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = std::env::temp_dir().join(format!("wordle_game_logs_{}", std::process::id()));
        let path = dir.join("nested").join(LOG_FILE_NAME);
        let file = open_log_file(&path);
        assert!(file.is_ok());
        assert!(path.is_file());
        fs::remove_dir_all(&dir).unwrap();
    }
}
