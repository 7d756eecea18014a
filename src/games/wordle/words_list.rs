use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use rand::prelude::SliceRandom;
use tracing::{debug, info};

use super::{
    core::Word,
    source::{Corpus, Dictionary, LookupError},
};

/// Newline-separated word file, indexed by word length.
///
/// Lines that aren't made of letters a to z are skipped.
#[derive(Debug, Clone, Default)]
pub struct WordsList {
    by_length: HashMap<usize, Vec<Word>>,
    words: HashSet<Word>,
}

impl WordsList {
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WordsListError> {
        let path = path.as_ref();

        let text = fs::read_to_string(path).map_err(|source| WordsListError::Read {
            path: path.to_owned(),
            source,
        })?;

        let list = Self::from_lines(text.lines());

        if list.is_empty() {
            return Err(WordsListError::Empty(path.to_owned()));
        }

        info!(words = list.len(), "loaded words list");

        Ok(list)
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut skipped = 0_usize;

        let list = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match line.parse::<Word>() {
                Ok(word) => Some(word),
                Err(err) => {
                    skipped += 1;
                    debug!(%err, "skipping line");
                    None
                }
            })
            .collect::<Self>();

        if skipped > 0 {
            debug!(skipped, "some lines were not words");
        }

        list
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    pub fn random_word(&self, length: usize) -> Option<Word> {
        self.by_length
            .get(&length)?
            .choose(&mut rand::thread_rng())
            .cloned()
    }

    pub fn count_of_length(&self, length: usize) -> usize {
        self.by_length.get(&length).map_or(0, Vec::len)
    }
}

impl FromIterator<Word> for WordsList {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        let mut list = Self::default();

        for word in iter {
            if list.words.insert(word.clone()) {
                list.by_length.entry(word.len()).or_default().push(word);
            }
        }

        list
    }
}

impl Corpus for WordsList {
    async fn pick_candidate(&self, length: usize) -> Option<Word> {
        self.random_word(length)
    }
}

impl Dictionary for WordsList {
    async fn exists(&self, word: &Word) -> Result<bool, LookupError> {
        Ok(self.contains(word))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WordsListError {
    #[error("couldn't read words from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} contains no words", .0.display())]
    Empty(PathBuf),
}
