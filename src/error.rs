use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::NUM_LETTERS;

/// Errors that end the game before or during a round.
#[derive(Debug, Error)]
pub enum GameError {
    /// The word list contained nothing that can be used as a secret word.
    #[error("No words of length {} in the word list", NUM_LETTERS)]
    NoValidWords,

    #[error("failed to read word list '{path}': {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal or input stream failure while the round was running.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Reasons a submitted guess is rejected. Always recoverable: the player is re-prompted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGuess {
    #[error("You've already guessed {0}.")]
    AlreadyGuessed(String),

    #[error("Your guess must be {expected} letters.")]
    WrongLength { expected: usize },

    #[error("Invalid letter: '{0}'. Please use English letters.")]
    InvalidLetter(char),
}
