use crate::word::Word;
use crate::{debug_log, info_log};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

pub const DEFAULT_DICTIONARY_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/master/words_alpha.txt";

const CACHE_DIR_NAME: &str = "wordle-game";
const CACHE_FILE_NAME: &str = "wordle.dict";

#[derive(Error, Debug)]
pub enum WordbankError {
    #[error("failed to read word list from '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to download word list from {url}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("word list contains no 5-letter words")]
    Empty,
}

/// The words a round target can be drawn from. Shared read-only across rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Uniform pick; `None` only when the dictionary is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Word> {
        self.words.choose(rng)
    }
}

impl FromIterator<Word> for Dictionary {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Where the dictionary comes from, decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// A file the user pointed at. Never downloaded over.
    File(PathBuf),
    /// The cache file, downloaded from `url` when missing.
    Cached { path: PathBuf, url: String },
    Embedded,
}

fn parse_word(line: &str) -> Option<Word> {
    Word::new(line.trim()).ok()
}

#[must_use]
pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(parse_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// `<cache dir>/wordle-game/wordle.dict`, if the platform has a cache dir.
#[must_use]
pub fn get_dictionary_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME))
}

/// Fetch the raw word list. Blocks until the whole body has arrived.
pub fn download_wordbank(url: &str) -> Result<String, WordbankError> {
    info_log!("Downloading word list from {}", url);
    let download_error = |source| WordbankError::Download {
        url: url.to_string(),
        source,
    };
    reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(reqwest::blocking::Response::text)
        .map_err(download_error)
}

/// Best effort: a cache that cannot be written only costs a download next time.
fn write_cache(path: &Path, body: &str) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        log::warn!("Could not create cache directory {}: {e}", parent.display());
        return;
    }
    match fs::write(path, body) {
        Ok(()) => debug_log!("Cached word list at {}", path.display()),
        Err(e) => log::warn!("Could not cache word list at {}: {e}", path.display()),
    }
}

fn read_words(path: &Path) -> Result<Vec<Word>, WordbankError> {
    load_wordbank_from_file(path).map_err(|source| WordbankError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the dictionary for a session.
///
/// For `WordSource::Cached`, a missing cache file triggers a download whose
/// body is written back to the cache before parsing.
///
/// # Errors
/// IO and download failures, or `WordbankError::Empty` when no line of the
/// source is a 5-letter word.
pub fn load_dictionary(source: &WordSource) -> Result<Dictionary, WordbankError> {
    let words = match source {
        WordSource::File(path) => read_words(path)?,
        WordSource::Cached { path, .. } if path.is_file() => {
            info_log!("Using cached word list at {}", path.display());
            read_words(path)?
        }
        WordSource::Cached { path, url } => {
            log::warn!("Word list not found at {}, downloading", path.display());
            let body = download_wordbank(url)?;
            write_cache(path, &body);
            load_wordbank_from_str(&body)
        }
        WordSource::Embedded => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };

    if words.is_empty() {
        return Err(WordbankError::Empty);
    }
    info_log!("Loaded {} words", words.len());
    Ok(Dictionary::new(words))
}
