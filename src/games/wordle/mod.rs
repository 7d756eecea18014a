pub mod core;
pub use core::{GuessResult, Letter, LetterMark, ParseWordError, Word};

mod error;
pub use error::{GuessError, SessionError, StartError};

pub mod source;
pub use source::{Corpus, Dictionary, LookupError, Sources, WordSource};

mod words_list;
pub use words_list::{WordsList, WordsListError};

pub mod dictionary;
pub use dictionary::{ConfiguredDictionary, DictionaryApi};

mod puzzle;
pub use puzzle::{draw_target, DEFAULT_MAX_DRAWS};

pub mod game;
pub use game::{GameOptions, GameState, GuessEngine, SessionId, SessionStore, Status};
