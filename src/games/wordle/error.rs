use thiserror::Error;

use super::{core::Word, game::SessionId, source::LookupError};

/// A rejected guess. Apart from [`GuessError::GameAlreadyOver`], the
/// attempt stays open and the player can try again.
#[derive(Debug, Error)]
pub enum GuessError {
    #[error("game is already over")]
    GameAlreadyOver,

    #[error("guess must have {expected} letters but has {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("guess `{0}` must only use letters from a to z")]
    InvalidCharacters(String),

    #[error("couldn't check the dictionary: {0}")]
    LookupFailure(#[from] LookupError),

    #[error("`{}` is not in the word list", .0.to_string().to_lowercase())]
    NotInWordList(Word),
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error("invalid game options: {0}")]
    InvalidOptions(&'static str),

    #[error("no usable {length}-letter word found after {draws} draws")]
    NoCandidateWords { length: usize, draws: usize },

    #[error("couldn't check the dictionary: {0}")]
    LookupFailure(#[from] LookupError),
}

impl StartError {
    /// Only lookup failures are worth retrying.
    pub fn backoff(self) -> backoff::Error<Self> {
        match self {
            Self::LookupFailure(_) => backoff::Error::transient(self),
            Self::InvalidOptions(_) | Self::NoCandidateWords { .. } => {
                backoff::Error::permanent(self)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no game with id {0}")]
    UnknownSession(SessionId),

    #[error(transparent)]
    Guess(#[from] GuessError),
}
