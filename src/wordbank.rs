use crate::NUM_LETTERS;
use crate::error::GameError;
use crate::info_log;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fs;
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDLIST: &str = include_str!("resources/wordlist.txt");

const DEFAULT_WORDLIST_FILE: &str = "wordlist.txt";
const APP_DIR: &str = "wordle-game";

/// Where the round's word list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListSource {
    File(PathBuf),
    Embedded,
}

impl WordListSource {
    /// Pick the word list: an explicit path always wins, then `wordlist.txt` in the
    /// working directory, then the per-user data directory, then the built-in list.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path.to_path_buf());
        }

        let local = PathBuf::from(DEFAULT_WORDLIST_FILE);
        if local.is_file() {
            return Self::File(local);
        }

        if let Some(dir) = dirs::data_dir() {
            let user = dir.join(APP_DIR).join(DEFAULT_WORDLIST_FILE);
            if user.is_file() {
                return Self::File(user);
            }
        }

        Self::Embedded
    }

    pub fn read(&self) -> Result<Vec<String>, GameError> {
        match self {
            Self::File(path) => load_word_list(path),
            Self::Embedded => Ok(parse_word_list(EMBEDDED_WORDLIST)),
        }
    }
}

/// Split newline-separated word-list text into raw candidates.
///
/// No filtering happens here; that is `filter_candidates`' job.
pub fn parse_word_list(data: &str) -> Vec<String> {
    data.trim()
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GameError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| GameError::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_word_list(&data);
    info_log!("Loaded {} raw words from {}", words.len(), path.display());
    Ok(words)
}

fn is_valid_word(word: &str) -> bool {
    word.chars().count() == NUM_LETTERS && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Keep the candidates usable as secret words, uppercased, in their original order.
pub fn filter_candidates<S: AsRef<str>>(candidates: &[S]) -> Vec<String> {
    candidates
        .iter()
        .map(|word| word.as_ref())
        .filter(|word| is_valid_word(word))
        .map(str::to_uppercase)
        .collect()
}

/// Pick the secret word for a round uniformly from the valid candidates.
pub fn select_secret_word<S, R>(candidates: &[S], rng: &mut R) -> Result<String, GameError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let words = filter_candidates(candidates);
    info_log!(
        "{} of {} candidates are valid secret words",
        words.len(),
        candidates.len()
    );
    words.choose(rng).cloned().ok_or(GameError::NoValidWords)
}
