//! Collaborators the engine consults: somewhere to draw candidate answers
//! from, and something that can say whether a word is real.

use std::{future::Future, sync::Arc};

use super::core::Word;

/// Supplies candidate answers.
pub trait Corpus {
    /// Some word of `length` letters, or `None` if the corpus has none.
    fn pick_candidate(&self, length: usize) -> impl Future<Output = Option<Word>> + Send;
}

/// Answers "is this a real word?".
pub trait Dictionary {
    /// `Ok(false)` means the dictionary answered and the word is unknown.
    /// An `Err` means no answer could be had and says nothing about the word.
    fn exists(&self, word: &Word) -> impl Future<Output = Result<bool, LookupError>> + Send;
}

/// Everything the engine needs from the outside world.
pub trait WordSource {
    fn pick_candidate(&self, length: usize) -> impl Future<Output = Option<Word>> + Send;

    fn exists(&self, word: &Word) -> impl Future<Output = Result<bool, LookupError>> + Send;
}

/// Pairs a [`Corpus`] with a [`Dictionary`].
#[derive(Debug, Clone)]
pub struct Sources<C, D> {
    corpus: C,
    dictionary: D,
}

impl<C, D> Sources<C, D> {
    pub fn new(corpus: C, dictionary: D) -> Self {
        Self { corpus, dictionary }
    }

    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }
}

impl<C, D> WordSource for Sources<C, D>
where
    C: Corpus + Sync,
    D: Dictionary + Sync,
{
    fn pick_candidate(&self, length: usize) -> impl Future<Output = Option<Word>> + Send {
        self.corpus.pick_candidate(length)
    }

    fn exists(&self, word: &Word) -> impl Future<Output = Result<bool, LookupError>> + Send {
        self.dictionary.exists(word)
    }
}

impl<T> Corpus for Arc<T>
where
    T: Corpus,
{
    fn pick_candidate(&self, length: usize) -> impl Future<Output = Option<Word>> + Send {
        T::pick_candidate(self, length)
    }
}

impl<T> Dictionary for Arc<T>
where
    T: Dictionary,
{
    fn exists(&self, word: &Word) -> impl Future<Output = Result<bool, LookupError>> + Send {
        T::exists(self, word)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("error from reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("dictionary responded with unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("couldn't build lookup url: {0}")]
    Url(#[from] url::ParseError),

    #[error("dictionary unavailable: {0}")]
    Unavailable(String),
}
