mod letter;
pub use letter::{Letter, NotALetter};

mod word;
pub use word::{ParseWordError, Word};

mod guess;
pub use guess::{GuessResult, LetterMark};
