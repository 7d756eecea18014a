//! A word-guessing game engine.
//!
//! [`GuessEngine`](games::wordle::GuessEngine) draws an answer from a
//! [`WordSource`](games::wordle::WordSource) and scores guesses against it;
//! [`SessionStore`](games::wordle::SessionStore) runs many games at once
//! behind session ids.

#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

pub mod cli;
pub mod config;
pub mod games;
pub mod logging;

pub type UtcDateTime = chrono::DateTime<chrono::Utc>;
