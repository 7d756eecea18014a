use std::{collections::HashMap, ops::Index, slice::Iter, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use super::{
    guess::{GuessResult, LetterMark},
    letter::Letter,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    letters: Vec<Letter>,
}

impl Word {
    pub(super) fn from_letters(letters: Vec<Letter>) -> Self {
        Self { letters }
    }

    pub fn iter(&self) -> Iter<'_, Letter> {
        self.letters.iter()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn contains(&self, letter: Letter) -> bool {
        self.letters.contains(&letter)
    }

    fn letter_counts(&self) -> HashMap<Letter, usize> {
        let mut letter_counts: HashMap<Letter, usize> = HashMap::new();
        for letter in self.iter() {
            *letter_counts.entry(*letter).or_default() += 1;
        }

        letter_counts
    }

    /// Scores `word` against `self` as the answer.
    ///
    /// Exact matches are marked first and each one uses up an occurrence of
    /// its letter; only then are the leftover occurrences handed out as
    /// [`LetterMark::Present`], left to right. A letter is never marked more
    /// times than it appears in the answer.
    ///
    /// # Panics
    ///
    /// If `word` and `self` have different lengths.
    pub fn guess(&self, word: &Word) -> GuessResult {
        assert_eq!(self.len(), word.len(), "guess and answer lengths differ");

        let mut guess = GuessResult::new(word);
        debug!(guess = %word, answer = %self);

        let mut letter_counts = self.letter_counts();

        for (index, (letter, mark)) in guess.iter_mut().enumerate() {
            if self.letters.get(index) == Some(&*letter) {
                *mark = LetterMark::Correct;
                if let Some(count) = letter_counts.get_mut(&*letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        trace!(remaining = ?letter_counts);

        for (letter, mark) in guess.iter_mut() {
            if *mark == LetterMark::Correct {
                continue;
            }

            if let Some(count) = letter_counts.get_mut(&*letter).filter(|count| **count > 0) {
                trace!("{}: wrong place", letter);

                *mark = LetterMark::Present;
                *count -= 1;
            }
        }

        guess
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWordError {
    #[error("word must have at least one letter")]
    Empty,

    #[error("word `{word}` contains `{ch}`, which is not a letter from a to z")]
    InvalidCharacter { word: String, ch: char },
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseWordError::Empty);
        }

        let letters = s
            .chars()
            .map(|ch| {
                Letter::new(ch).ok_or_else(|| ParseWordError::InvalidCharacter {
                    word: s.to_owned(),
                    ch,
                })
            })
            .collect::<Result<Vec<Letter>, _>>()?;

        Ok(Self { letters })
    }
}

impl TryFrom<String> for Word {
    type Error = ParseWordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Word> for String {
    fn from(value: Word) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().map(|l| l.as_char()).collect::<String>())
    }
}

impl IntoIterator for Word {
    type Item = Letter;
    type IntoIter = std::vec::IntoIter<Letter>;

    fn into_iter(self) -> Self::IntoIter {
        self.letters.into_iter()
    }
}

impl<'w> IntoIterator for &'w Word {
    type Item = &'w Letter;
    type IntoIter = Iter<'w, Letter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for Word {
    type Output = Letter;

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}
