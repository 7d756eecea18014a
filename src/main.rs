#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use backoff::ExponentialBackoff;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_unwrap::ResultExt;

use slimewordle::{
    cli::{Cli, Command},
    config::{Config, DictionaryKind},
    games::wordle::{
        ConfiguredDictionary, DictionaryApi, GuessEngine, SessionId, SessionStore, Sources,
        StartError, Status, WordSource, WordsList,
    },
    logging,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    }
    .expect_or_log("configuration could not be loaded");
    cli.apply(&mut config);

    info!("config loaded");

    if let Command::Config = cli.command() {
        println!("{config:#?}");
        return;
    }

    let words =
        Arc::new(WordsList::load(&config.words.path).expect_or_log("words list could not be loaded"));

    let dictionary = match config.dictionary.kind {
        DictionaryKind::Local => ConfiguredDictionary::Local(words.clone()),
        DictionaryKind::Remote => {
            ConfiguredDictionary::Remote(DictionaryApi::new(config.dictionary.url.clone()))
        }
    };

    let engine =
        GuessEngine::new(Sources::new(words, dictionary)).with_max_draws(config.game.max_draws);
    let store = SessionStore::new(engine);

    if let Err(err) = play(&store, &config).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

/// Retries while the dictionary can't be reached, up to `dictionary.retry_secs`.
async fn start<S: WordSource>(
    store: &SessionStore<S>,
    config: &Config,
) -> Result<SessionId, StartError> {
    let policy = ExponentialBackoff {
        max_elapsed_time: Some(Duration::from_secs(config.dictionary.retry_secs)),
        ..ExponentialBackoff::default()
    };
    let options = config.game.options();

    backoff::future::retry_notify(
        policy,
        move || async move {
            store
                .start_session(options)
                .await
                .map_err(StartError::backoff)
        },
        |err, wait: Duration| warn!(%err, ?wait, "couldn't start a game, retrying"),
    )
    .await
}

async fn play<S: WordSource>(store: &SessionStore<S>, config: &Config) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    'games: loop {
        println!("picking a word...");
        let id = start(store, config).await.context("couldn't start a game")?;

        let state = store.get_state(id).await?;
        println!(
            "guess the {}-letter word! you have {} tries. (`new` for a new word, `exit` to quit)",
            state.length(),
            state.max_attempts(),
        );

        loop {
            let Some(line) = lines.next_line().await.context("couldn't read input")? else {
                store.end_session(id).await?;
                break 'games;
            };
            let line = line.trim();

            match line.to_lowercase().as_str() {
                "" => continue,
                "exit" => {
                    store.end_session(id).await?;
                    break 'games;
                }
                "new" => {
                    store.end_session(id).await?;
                    continue 'games;
                }
                _ => (),
            }

            let guess = match store.submit_guess(id, line).await {
                Ok(guess) => guess,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };

            println!("{}\n{guess}", guess.word());

            let state = store.get_state(id).await?;
            match state.status() {
                Status::InProgress => {
                    let unused: String = state.unused_letters().map(char::from).collect();
                    println!(
                        "{}/{} - unused letters: {unused}",
                        state.attempts_used(),
                        state.max_attempts()
                    );
                }
                Status::Won => {
                    println!("you win! ({}/{})", state.attempts_used(), state.max_attempts())
                }
                Status::Lost => {
                    if let Some(word) = state.revealed_target() {
                        println!("the word was: {}", word.to_string().to_lowercase());
                    }
                }
            }

            if state.is_finished() {
                println!("`new` to play again, `exit` to quit");
            }
        }
    }

    Ok(())
}
