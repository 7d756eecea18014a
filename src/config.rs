use std::path::PathBuf;

use serde::Deserialize;
use tracing::{info, warn};

use crate::games::wordle::{
    dictionary::DEFAULT_URL,
    game::options::{DEFAULT_LENGTH, DEFAULT_MAX_ATTEMPTS},
    GameOptions, DEFAULT_MAX_DRAWS,
};

pub const DEFAULT_CONFIG_FILE: &str = "./slimewordle.toml";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub words: WordsConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

impl Config {
    /// Reads the file named by `SLIMEWORDLE_TOML`, or `./slimewordle.toml`.
    pub fn load() -> Result<Self, Error> {
        let config_file = if let Ok(path) = std::env::var("SLIMEWORDLE_TOML") {
            info!(path, "looking for config file with SLIMEWORDLE_TOML...");
            path
        } else {
            DEFAULT_CONFIG_FILE.to_owned()
        };

        Self::load_from(&config_file)
    }

    /// The file is optional; `SLIMEWORDLE_*` environment variables override
    /// it, with `__` between section and key (`SLIMEWORDLE_GAME__LENGTH`).
    pub fn load_from(config_file: &str) -> Result<Self, Error> {
        let config: Self = ::config::Config::builder()
            .add_source(::config::File::new(config_file, ::config::FileFormat::Toml).required(false))
            .add_source(
                ::config::Environment::with_prefix("SLIMEWORDLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)?;

        config.game.check();

        Ok(config)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_length")]
    pub length: usize,
    #[serde(default = "GameConfig::default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "GameConfig::default_max_draws")]
    pub max_draws: usize,
}

impl GameConfig {
    const fn default_length() -> usize {
        DEFAULT_LENGTH
    }

    const fn default_max_attempts() -> usize {
        DEFAULT_MAX_ATTEMPTS
    }

    const fn default_max_draws() -> usize {
        DEFAULT_MAX_DRAWS
    }

    pub const fn options(&self) -> GameOptions {
        GameOptions::new(self.length, self.max_attempts)
    }

    fn check(&self) {
        if self.max_draws == 0 {
            warn!("game.max_draws is 0, no game will ever start");
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            length: Self::default_length(),
            max_attempts: Self::default_max_attempts(),
            max_draws: Self::default_max_draws(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WordsConfig {
    #[serde(default = "WordsConfig::default_path")]
    pub path: PathBuf,
}

impl WordsConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("words_alpha.txt")
    }
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryKind {
    /// Check words against the words list.
    Local,
    /// Check words against a dictionary web service.
    #[default]
    Remote,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DictionaryConfig {
    #[serde(default)]
    pub kind: DictionaryKind,
    #[serde(default = "DictionaryConfig::default_url")]
    pub url: url::Url,
    /// How long to keep retrying a game start while the dictionary is down.
    #[serde(default = "DictionaryConfig::default_retry_secs")]
    pub retry_secs: u64,
}

impl DictionaryConfig {
    fn default_url() -> url::Url {
        #[allow(clippy::unwrap_used)]
        url::Url::parse(DEFAULT_URL).unwrap()
    }

    const fn default_retry_secs() -> u64 {
        30
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            kind: DictionaryKind::default(),
            url: Self::default_url(),
            retry_secs: Self::default_retry_secs(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file read error: {0}")]
    Read(::config::ConfigError),

    #[error("parsing error: {0}")]
    Parse(::config::ConfigError),
}
