// Library interface for wordle-game
// The binary is a thin shell over these modules so integration tests can drive whole rounds

pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod interrupt;
pub mod logging;
pub mod render;
pub mod tui;
pub mod wordbank;

/// Number of attempts the player gets per round.
pub const NUM_GUESSES: usize = 6;
/// Length of the secret word and of every guess.
pub const NUM_LETTERS: usize = 5;

// Re-export commonly used items for easier testing
pub use error::{GameError, InvalidGuess};
pub use feedback::{LetterOutcome, LetterStatusMap, ScoredLetter, evaluate, evaluate_into};
pub use game_state::{GameInterface, InputEvent, Round, RoundOutcome, RoundResult, collect_guess};
pub use interrupt::{Interrupt, InterruptScope};
pub use render::{Screen, StyleTag, StyledLine, StyledSpan};
pub use wordbank::{
    EMBEDDED_WORDLIST, WordListSource, filter_candidates, load_word_list, parse_word_list,
    select_secret_word,
};
