use crate::error::{GameError, InvalidGuess};
use crate::feedback::{LetterStatusMap, evaluate, evaluate_into};
use crate::interrupt::Interrupt;
use crate::render::{Screen, StyledLine, banner_line, guess_line, letters_line, warning_line};
use crate::wordbank::select_secret_word;
use crate::{NUM_GUESSES, NUM_LETTERS, debug_log, info_log};
use rand::Rng;
use std::io;

const PLACEHOLDER: &str = "_____";
const GAME_OVER_HEADLINE: &str = "Game Over";

/// What the input source produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C, Esc, or the input stream ended.
    Interrupted,
}

/// Everything the round needs from a terminal frontend.
///
/// Implemented by the line-based console in `cli` and the ratatui frontend in `tui`.
pub trait GameInterface {
    fn display_screen(&mut self, screen: &Screen) -> io::Result<()>;
    fn display_warning(&mut self, warning: &StyledLine) -> io::Result<()>;
    /// Block until the player submits a line or an interrupt arrives.
    fn read_guess(&mut self, interrupt: &Interrupt) -> io::Result<InputEvent>;
}

/// Normalize raw input and check it against the guess rules, in order: repeat,
/// length, letters.
pub fn validate_guess(input: &str, already_guessed: &[String]) -> Result<String, InvalidGuess> {
    let guess = input.trim().to_uppercase();

    if already_guessed.contains(&guess) {
        return Err(InvalidGuess::AlreadyGuessed(guess));
    }

    if guess.chars().count() != NUM_LETTERS {
        return Err(InvalidGuess::WrongLength {
            expected: NUM_LETTERS,
        });
    }

    if let Some(invalid) = guess.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(InvalidGuess::InvalidLetter(invalid));
    }

    Ok(guess)
}

/// Prompt until the player enters a usable guess.
///
/// Rejected input is reported through the interface and the prompt repeats with no
/// retry limit. Returns `None` once an interrupt arrives.
pub fn collect_guess<I: GameInterface + ?Sized>(
    interface: &mut I,
    already_guessed: &[String],
    interrupt: &Interrupt,
) -> Result<Option<String>, GameError> {
    loop {
        if interrupt.is_triggered() {
            return Ok(None);
        }

        let input = match interface.read_guess(interrupt)? {
            InputEvent::Line(line) => line,
            InputEvent::Interrupted => {
                info_log!("collect_guess() - input interrupted");
                return Ok(None);
            }
        };

        // Ctrl-C may land while the read was blocked
        if interrupt.is_triggered() {
            return Ok(None);
        }

        match validate_guess(&input, already_guessed) {
            Ok(guess) => return Ok(Some(guess)),
            Err(reason) => {
                debug_log!("collect_guess() - rejected {:?}: {}", input, reason);
                interface.display_warning(&warning_line(reason.to_string()))?;
            }
        }
    }
}

/// Guesses made so far, viewed as `NUM_GUESSES` slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessHistory {
    guesses: Vec<String>,
}

impl GuessHistory {
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Exactly `NUM_GUESSES` entries; unfilled slots are `_____`.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.guesses
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat(PLACEHOLDER))
            .take(NUM_GUESSES)
    }

    fn push(&mut self, guess: String) {
        self.guesses.push(guess);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    AwaitingGuess(usize),
    Evaluating(usize),
    Won,
    Lost,
}

impl RoundState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub result: RoundResult,
    pub secret: String,
    /// Guesses actually submitted.
    pub attempts: usize,
    /// The round was cut short by an interrupt and resolved as a loss.
    pub interrupted: bool,
}

/// One play-through against a single secret word.
#[derive(Debug, Clone)]
pub struct Round {
    secret: String,
    history: GuessHistory,
    status: LetterStatusMap,
    state: RoundState,
}

impl Round {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_uppercase(),
            history: GuessHistory::default(),
            status: LetterStatusMap::new(),
            state: RoundState::AwaitingGuess(0),
        }
    }

    /// Start a round with a secret drawn from `candidates`.
    pub fn select<S, R>(candidates: &[S], rng: &mut R) -> Result<Self, GameError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let secret = select_secret_word(candidates, rng)?;
        log::trace!("Secret word is {secret}");
        Ok(Self::new(&secret))
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn history(&self) -> &GuessHistory {
        &self.history
    }

    pub fn status(&self) -> &LetterStatusMap {
        &self.status
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Record an accepted guess and advance the state machine.
    ///
    /// Ignored once the round is over.
    pub fn submit(&mut self, guess: String) -> RoundState {
        let RoundState::AwaitingGuess(attempt) = self.state else {
            log::warn!("Guess submitted after the round ended: {guess}");
            return self.state;
        };

        self.state = RoundState::Evaluating(attempt);
        evaluate_into(&guess, &self.secret, &mut self.status);
        let solved = guess == self.secret;
        self.history.push(guess);

        self.state = if solved {
            RoundState::Won
        } else if attempt + 1 == NUM_GUESSES {
            RoundState::Lost
        } else {
            RoundState::AwaitingGuess(attempt + 1)
        };
        info_log!("Attempt {} evaluated, now {:?}", attempt + 1, self.state);
        self.state
    }

    /// Resolve the round. An interrupted round counts as lost.
    pub fn finish(&mut self, interrupted: bool) -> RoundOutcome {
        if !self.state.is_terminal() {
            self.state = RoundState::Lost;
        }
        let result = match self.state {
            RoundState::Won => RoundResult::Won,
            _ => RoundResult::Lost,
        };
        RoundOutcome {
            result,
            secret: self.secret.clone(),
            attempts: self.history.guesses().len(),
            interrupted,
        }
    }

    pub fn screen(&self, headline: impl Into<String>) -> Screen {
        Screen {
            headline: headline.into(),
            rows: self
                .history
                .slots()
                .map(|slot| guess_line(&evaluate(slot, &self.secret)))
                .collect(),
            letters: letters_line(&self.status),
            banner: None,
        }
    }

    fn final_screen(&self, outcome: &RoundOutcome) -> Screen {
        Screen {
            banner: Some(banner_line(outcome)),
            ..self.screen(GAME_OVER_HEADLINE)
        }
    }

    /// Run the guessing loop to completion and show the final board.
    ///
    /// The interrupt token is armed only while the loop runs; an interrupt ends the
    /// loop early and still reaches the game-over screen.
    pub fn play<I: GameInterface + ?Sized>(
        mut self,
        interface: &mut I,
        interrupt: &Interrupt,
    ) -> Result<RoundOutcome, GameError> {
        let mut interrupted = false;
        {
            let _scope = interrupt.scope();
            while let RoundState::AwaitingGuess(attempt) = self.state {
                interface.display_screen(&self.screen(format!("Guess {}", attempt + 1)))?;
                match collect_guess(interface, self.history.guesses(), interrupt)? {
                    Some(guess) => {
                        self.submit(guess);
                    }
                    None => {
                        info_log!("Round interrupted at attempt {}", attempt + 1);
                        interrupted = true;
                        break;
                    }
                }
            }
        }

        let outcome = self.finish(interrupted);
        interface.display_screen(&self.final_screen(&outcome))?;
        Ok(outcome)
    }
}
