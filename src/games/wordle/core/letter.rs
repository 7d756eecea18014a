use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single upper-case letter from `A` to `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter {
    /// Accepts either case and normalizes to upper case.
    pub fn new(ch: char) -> Option<Self> {
        ch.is_ascii_alphabetic()
            .then(|| Self(ch.to_ascii_uppercase() as u8))
    }

    pub const fn as_char(self) -> char {
        self.0 as char
    }

    pub fn alphabet() -> impl Iterator<Item = Self> {
        (b'A'..=b'Z').map(Self)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("`{0}` is not a letter from a to z")]
pub struct NotALetter(pub char);

impl TryFrom<char> for Letter {
    type Error = NotALetter;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NotALetter(value))
    }
}

impl From<Letter> for char {
    fn from(value: Letter) -> Self {
        value.as_char()
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
