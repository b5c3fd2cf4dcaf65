use std::collections::BTreeMap;

/// Classification of a single letter position of a guess against the secret word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LetterOutcome {
    Correct,    // Green
    Misplaced,  // Yellow
    Absent,     // Gray
    NotALetter, // Placeholder slots such as `_`
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScoredLetter {
    pub letter: char,
    pub outcome: LetterOutcome,
}

/// Score `guess` against `secret`, one outcome per position.
///
/// Each position is judged on its own: an exact match is `Correct`, a letter found
/// anywhere else in the secret is `Misplaced`. Letter counts are not tracked, so a
/// guess with two `E`s against a secret with one marks both.
pub fn evaluate(guess: &str, secret: &str) -> Vec<ScoredLetter> {
    guess
        .chars()
        .zip(secret.chars())
        .map(|(letter, expected)| {
            let outcome = if letter == expected {
                LetterOutcome::Correct
            } else if secret.contains(letter) {
                LetterOutcome::Misplaced
            } else if letter.is_ascii_alphabetic() {
                LetterOutcome::Absent
            } else {
                LetterOutcome::NotALetter
            };
            ScoredLetter { letter, outcome }
        })
        .collect()
}

/// Evaluate a guess and fold the result into `status` in one step.
pub fn evaluate_into(guess: &str, secret: &str, status: &mut LetterStatusMap) -> Vec<ScoredLetter> {
    let scored = evaluate(guess, secret);
    status.record(&scored);
    scored
}

/// Latest known outcome for every letter A-Z.
///
/// Later guesses overwrite earlier ones letter by letter, so a letter shown `Correct`
/// in one guess can be shown `Misplaced` again after a later guess uses it elsewhere.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterStatusMap {
    letters: BTreeMap<char, LetterOutcome>,
}

impl LetterStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, scored: &[ScoredLetter]) {
        for s in scored {
            if s.outcome != LetterOutcome::NotALetter {
                self.letters.insert(s.letter.to_ascii_uppercase(), s.outcome);
            }
        }
    }

    pub fn get(&self, letter: char) -> Option<LetterOutcome> {
        self.letters.get(&letter.to_ascii_uppercase()).copied()
    }

    /// All 26 letters in alphabetical order with their status, `None` if never guessed.
    pub fn iter(&self) -> impl Iterator<Item = (char, Option<LetterOutcome>)> + '_ {
        ('A'..='Z').map(|c| (c, self.get(c)))
    }
}
