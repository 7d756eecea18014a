use serde::{Deserialize, Serialize};

use crate::games::wordle::error::StartError;

pub const DEFAULT_LENGTH: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub length: usize,
    pub max_attempts: usize,
}

impl GameOptions {
    pub const fn new(length: usize, max_attempts: usize) -> Self {
        Self {
            length,
            max_attempts,
        }
    }

    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub(super) fn validate(&self) -> Result<(), StartError> {
        if self.length == 0 {
            return Err(StartError::InvalidOptions("words need at least one letter"));
        }

        if self.max_attempts == 0 {
            return Err(StartError::InvalidOptions("at least one attempt is needed"));
        }

        Ok(())
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH, DEFAULT_MAX_ATTEMPTS)
    }
}
