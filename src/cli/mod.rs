use std::path::PathBuf;

use crate::config::{Config, DictionaryKind};

#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file (defaults to $SLIMEWORDLE_TOML or ./slimewordle.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Letters per word
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Guesses allowed per game
    #[arg(short = 'n', long)]
    pub max_attempts: Option<usize>,

    /// Newline-separated words file to draw answers from
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Where to check whether a guess is a real word
    #[arg(long, value_enum)]
    pub dictionary: Option<DictionaryKind>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// Command-line flags win over the configuration file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(length) = self.length {
            config.game.length = length;
        }

        if let Some(max_attempts) = self.max_attempts {
            config.game.max_attempts = max_attempts;
        }

        if let Some(ref words) = self.words {
            config.words.path = words.clone();
        }

        if let Some(kind) = self.dictionary {
            config.dictionary.kind = kind;
        }
    }
}

#[derive(clap::Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Print the resolved configuration
    Config,

    /// Play in the terminal
    #[default]
    Play,
}

impl Command {
    pub fn is_play(&self) -> bool {
        matches!(self, Self::Play)
    }
}
