//! Styled intermediate representation of what the game shows.
//!
//! The core only produces `(text, StyleTag)` spans; the frontends in `cli` and `tui`
//! decide what each tag looks like on a real terminal.

use crate::feedback::{LetterOutcome, LetterStatusMap, ScoredLetter};
use crate::game_state::{RoundOutcome, RoundResult};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum StyleTag {
    Correct,
    Misplaced,
    Absent,
    Plain,
    Dim,
    WarningText,
    SuccessBanner,
    FailureBanner,
    Headline,
}

impl From<LetterOutcome> for StyleTag {
    fn from(outcome: LetterOutcome) -> Self {
        match outcome {
            LetterOutcome::Correct => Self::Correct,
            LetterOutcome::Misplaced => Self::Misplaced,
            LetterOutcome::Absent => Self::Absent,
            LetterOutcome::NotALetter => Self::Dim,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StyledSpan {
    pub text: String,
    pub tag: StyleTag,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, tag: StyleTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn single(text: impl Into<String>, tag: StyleTag) -> Self {
        Self {
            spans: vec![StyledSpan::new(text, tag)],
        }
    }

    pub fn tags(&self) -> Vec<StyleTag> {
        self.spans.iter().map(|s| s.tag).collect()
    }
}

/// Plain text with styling dropped.
impl fmt::Display for StyledLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

/// One full redraw: headline rule, the guess board, the letter summary and an
/// optional end-of-round banner.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Screen {
    pub headline: String,
    pub rows: Vec<StyledLine>,
    pub letters: StyledLine,
    pub banner: Option<StyledLine>,
}

pub fn guess_line(scored: &[ScoredLetter]) -> StyledLine {
    StyledLine {
        spans: scored
            .iter()
            .map(|s| StyledSpan::new(s.letter.to_string(), s.outcome.into()))
            .collect(),
    }
}

/// The "letters tried" summary, A to Z. Untried letters stay plain.
pub fn letters_line(status: &LetterStatusMap) -> StyledLine {
    StyledLine {
        spans: status
            .iter()
            .map(|(letter, outcome)| {
                StyledSpan::new(letter.to_string(), outcome.map_or(StyleTag::Plain, Into::into))
            })
            .collect(),
    }
}

pub fn warning_line(message: impl Into<String>) -> StyledLine {
    StyledLine::single(message, StyleTag::WarningText)
}

pub fn banner_line(outcome: &RoundOutcome) -> StyledLine {
    match outcome.result {
        RoundResult::Won => StyledLine::single(
            format!("Correct, the word is {}", outcome.secret),
            StyleTag::SuccessBanner,
        ),
        RoundResult::Lost => StyledLine::single(
            format!("Sorry, the word was {}", outcome.secret),
            StyleTag::FailureBanner,
        ),
    }
}
