use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::{letter::Letter, word::Word};

/// One scored guess: every letter of the guessed word, paired with its mark.
///
/// Produced by [`Word::guess`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    letters: Vec<(Letter, LetterMark)>,
}

impl GuessResult {
    pub(super) fn new(word: &Word) -> Self {
        let letters = word
            .iter()
            .map(|letter| (*letter, LetterMark::Absent))
            .collect::<Vec<(Letter, LetterMark)>>();

        Self { letters }
    }

    /// The word that was guessed.
    pub fn word(&self) -> Word {
        Word::from_letters(self.letters.iter().map(|(letter, _)| *letter).collect())
    }

    pub fn marks(&self) -> impl Iterator<Item = LetterMark> + '_ {
        self.letters.iter().map(|(_, mark)| *mark)
    }

    pub fn is_correct(&self) -> bool {
        self.letters
            .iter()
            .all(|(_, mark)| *mark == LetterMark::Correct)
    }

    pub fn is_correct_at(&self, index: usize) -> bool {
        self[index].1 == LetterMark::Correct
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Letter, LetterMark)> + '_ {
        self.letters.iter()
    }

    pub(super) fn iter_mut(&mut self) -> impl Iterator<Item = &mut (Letter, LetterMark)> + '_ {
        self.letters.iter_mut()
    }
}

impl IntoIterator for GuessResult {
    type Item = (Letter, LetterMark);
    type IntoIter = std::vec::IntoIter<(Letter, LetterMark)>;

    fn into_iter(self) -> Self::IntoIter {
        self.letters.into_iter()
    }
}

impl Index<usize> for GuessResult {
    type Output = (Letter, LetterMark);

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}

impl std::fmt::Display for GuessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for mark in self.marks() {
            write!(f, "{mark}")?;
        }

        Ok(())
    }
}

impl PartialEq<&str> for GuessResult {
    fn eq(&self, other: &&str) -> bool {
        &self.to_string() == other
    }
}

/// Verdict for a single guessed letter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LetterMark {
    /// Not in the answer, or every occurrence was already claimed by another mark.
    #[default]
    Absent,
    /// In the answer at another position.
    Present,
    Correct,
}

impl std::fmt::Display for LetterMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Correct => "O",
            Self::Present => "o",
            Self::Absent => ".",
        })
    }
}
