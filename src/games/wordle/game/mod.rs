use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::UtcDateTime;

use super::{
    core::{GuessResult, Letter, Word},
    error::{GuessError, StartError},
    puzzle::{self, DEFAULT_MAX_DRAWS},
    source::WordSource,
};

mod cache;
pub use cache::{SessionId, SessionStore};

pub mod options;
pub use options::GameOptions;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Status {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// One game: the answer, every accepted guess so far, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    target: Word,
    max_attempts: usize,
    history: Vec<GuessResult>,
    status: Status,
    started: UtcDateTime,
}

impl GameState {
    fn new(target: Word, max_attempts: usize) -> Self {
        Self {
            target,
            max_attempts,
            history: Vec::with_capacity(max_attempts),
            status: Status::InProgress,
            started: Utc::now(),
        }
    }

    /// Letters per word.
    pub fn length(&self) -> usize {
        self.target.len()
    }

    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn history(&self) -> &[GuessResult] {
        &self.history
    }

    pub fn latest(&self) -> Option<&GuessResult> {
        self.history.last()
    }

    pub fn attempts_used(&self) -> usize {
        self.history.len()
    }

    pub fn attempts_remaining(&self) -> usize {
        self.max_attempts.saturating_sub(self.history.len())
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub const fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub const fn in_progress(&self) -> bool {
        !self.is_finished()
    }

    pub const fn started(&self) -> UtcDateTime {
        self.started
    }

    /// The answer, once there is nothing left to guess.
    pub fn revealed_target(&self) -> Option<&Word> {
        self.is_finished().then_some(&self.target)
    }

    /// Letters that haven't appeared in any guess yet.
    pub fn unused_letters(&self) -> impl Iterator<Item = Letter> + '_ {
        Letter::alphabet().filter(|letter| {
            !self
                .history
                .iter()
                .any(|guess| guess.iter().any(|(guessed, _)| guessed == letter))
        })
    }

    fn record(&mut self, guess: GuessResult) -> Status {
        debug_assert!(self.in_progress(), "guess recorded after game ended");

        let solved = guess.is_correct();
        self.history.push(guess);

        self.status = if solved {
            Status::Won
        } else if self.history.len() >= self.max_attempts {
            Status::Lost
        } else {
            Status::InProgress
        };

        self.status
    }
}

/// Runs games against a [`WordSource`].
///
/// The engine itself holds no game; each [`GameState`] is handed in by the
/// caller, so any number of games can share one engine.
#[derive(Debug, Clone)]
pub struct GuessEngine<S> {
    source: S,
    max_draws: usize,
}

impl<S> GuessEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_draws: DEFAULT_MAX_DRAWS,
        }
    }

    /// Cap on how many candidates are drawn before giving up on a target.
    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = max_draws;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub const fn max_draws(&self) -> usize {
        self.max_draws
    }
}

impl<S> GuessEngine<S>
where
    S: WordSource,
{
    #[tracing::instrument(skip(self))]
    pub async fn start(&self, options: GameOptions) -> Result<GameState, StartError> {
        options.validate()?;

        let target = puzzle::draw_target(&self.source, options.length, self.max_draws).await?;

        info!("target word is ready");

        Ok(GameState::new(target, options.max_attempts))
    }

    /// Scores `input` and records it as the next attempt.
    ///
    /// Checks run in a fixed order: game over, length, characters, then the
    /// dictionary. On any error `state` is left exactly as it was.
    #[tracing::instrument(skip(self, state), fields(attempt = state.attempts_used() + 1))]
    pub async fn submit_guess(
        &self,
        state: &mut GameState,
        input: &str,
    ) -> Result<GuessResult, GuessError> {
        if state.is_finished() {
            return Err(GuessError::GameAlreadyOver);
        }

        let found = input.chars().count();
        if found != state.length() {
            return Err(GuessError::InvalidLength {
                expected: state.length(),
                found,
            });
        }

        let word: Word = input
            .parse()
            .map_err(|_| GuessError::InvalidCharacters(input.to_owned()))?;

        let exists = self.source.exists(&word).await.map_err(|err| {
            warn!(%err, "couldn't check guess against dictionary");
            GuessError::from(err)
        })?;

        if !exists {
            debug!(%word, "not in word list");
            return Err(GuessError::NotInWordList(word));
        }

        let guess = state.target.guess(&word);
        let status = state.record(guess.clone());

        debug!(%word, marks = %guess, ?status);

        match status {
            Status::Won => info!(attempts = state.attempts_used(), "game won"),
            Status::Lost => info!("game lost"),
            Status::InProgress => (),
        }

        Ok(guess)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::{GameOptions, GameState, GuessEngine, GuessError, StartError, Status};
    use crate::games::wordle::{core::LetterMark, source::testing::MockSource};

    const WORDS: [&str; 8] = [
        "crane", "slate", "pious", "mound", "light", "fizzy", "dwelt", "chant",
    ];

    fn engine() -> GuessEngine<MockSource> {
        GuessEngine::new(MockSource::new(&["crane"]).with_words(&WORDS))
    }

    async fn crane_game() -> (GuessEngine<MockSource>, GameState) {
        let engine = engine();
        let state = engine.start(GameOptions::default()).await.unwrap();
        (engine, state)
    }

    #[tokio::test]
    async fn starts_fresh() {
        let (_, state) = crane_game().await;

        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.attempts_used(), 0);
        assert_eq!(state.attempts_remaining(), 6);
        assert_eq!(state.length(), 5);
        assert_eq!(state.revealed_target(), None);
    }

    #[tokio::test]
    #[traced_test]
    async fn win_on_first_guess() {
        let (engine, mut state) = crane_game().await;

        let guess = engine.submit_guess(&mut state, "CRANE").await.unwrap();

        assert!(guess.marks().all(|mark| mark == LetterMark::Correct));
        assert_eq!(state.status(), Status::Won);
        assert_eq!(state.history().len(), 1);
        assert_eq!(
            state.revealed_target().map(ToString::to_string).as_deref(),
            Some("CRANE")
        );
        assert!(logs_contain("game won"));
    }

    #[tokio::test]
    async fn lose_after_max_attempts() {
        let (engine, mut state) = crane_game().await;

        for (i, guess) in ["slate", "pious", "mound", "light", "fizzy"]
            .into_iter()
            .enumerate()
        {
            engine.submit_guess(&mut state, guess).await.unwrap();
            assert_eq!(state.attempts_used(), i + 1);
            assert_eq!(state.status(), Status::InProgress);
        }

        engine.submit_guess(&mut state, "dwelt").await.unwrap();

        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.history().len(), 6);
        assert_eq!(state.attempts_remaining(), 0);
        assert_eq!(
            state.revealed_target().map(ToString::to_string).as_deref(),
            Some("CRANE")
        );
    }

    #[tokio::test]
    async fn win_on_last_attempt_is_a_win() {
        let engine = engine();
        let mut state = engine
            .start(GameOptions::default().with_max_attempts(2))
            .await
            .unwrap();

        engine.submit_guess(&mut state, "slate").await.unwrap();
        engine.submit_guess(&mut state, "crane").await.unwrap();

        assert_eq!(state.status(), Status::Won);
    }

    #[tokio::test]
    async fn rejected_guesses_do_not_use_attempts() {
        let (engine, mut state) = crane_game().await;
        engine.submit_guess(&mut state, "slate").await.unwrap();
        let before = state.clone();

        let results = [
            engine.submit_guess(&mut state, "slat").await,
            engine.submit_guess(&mut state, "slates").await,
            engine.submit_guess(&mut state, "").await,
            engine.submit_guess(&mut state, "sl4te").await,
            engine.submit_guess(&mut state, "sláte").await,
            engine.submit_guess(&mut state, "qwert").await,
        ];

        assert!(matches!(
            results[0],
            Err(GuessError::InvalidLength {
                expected: 5,
                found: 4
            })
        ));
        assert!(matches!(results[1], Err(GuessError::InvalidLength { found: 6, .. })));
        assert!(matches!(results[2], Err(GuessError::InvalidLength { found: 0, .. })));
        assert!(matches!(results[3], Err(GuessError::InvalidCharacters(_))));
        assert!(matches!(results[4], Err(GuessError::InvalidCharacters(_))));
        assert!(matches!(results[5], Err(GuessError::NotInWordList(_))));

        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn length_is_checked_before_characters() {
        let (engine, mut state) = crane_game().await;

        let err = engine.submit_guess(&mut state, "ab1").await.unwrap_err();
        assert!(matches!(err, GuessError::InvalidLength { .. }));
    }

    #[tokio::test]
    async fn malformed_guesses_skip_the_dictionary() {
        let (engine, mut state) = crane_game().await;
        let lookups = engine.source().lookups();

        engine.submit_guess(&mut state, "cr").await.unwrap_err();
        engine.submit_guess(&mut state, "cr-ne").await.unwrap_err();

        assert_eq!(engine.source().lookups(), lookups);
    }

    #[tokio::test]
    async fn lookup_failure_is_not_a_missing_word() {
        let engine = GuessEngine::new(
            MockSource::new(&["crane"])
                .with_words(&WORDS)
                .failing(&["chant"]),
        );
        let mut state = engine.start(GameOptions::default()).await.unwrap();

        let err = engine.submit_guess(&mut state, "chant").await.unwrap_err();

        assert!(matches!(err, GuessError::LookupFailure(_)));
        assert_eq!(state.attempts_used(), 0);
        assert_eq!(state.status(), Status::InProgress);
    }

    #[tokio::test]
    async fn lower_case_input_is_accepted() {
        let (engine, mut state) = crane_game().await;

        let guess = engine.submit_guess(&mut state, "cRaNe").await.unwrap();

        assert_eq!(guess.word().to_string(), "CRANE");
        assert_eq!(state.status(), Status::Won);
    }

    #[tokio::test]
    async fn finished_games_reject_everything() {
        let (engine, mut state) = crane_game().await;
        engine.submit_guess(&mut state, "crane").await.unwrap();
        let finished = state.clone();
        let lookups = engine.source().lookups();

        for input in ["slate", "crane", "x", "12345"] {
            let err = engine.submit_guess(&mut state, input).await.unwrap_err();
            assert!(matches!(err, GuessError::GameAlreadyOver));
        }

        assert_eq!(state, finished);
        assert_eq!(engine.source().lookups(), lookups);
    }

    #[tokio::test]
    async fn lost_games_stay_lost() {
        let engine = engine();
        let mut state = engine
            .start(GameOptions::default().with_max_attempts(1))
            .await
            .unwrap();

        engine.submit_guess(&mut state, "slate").await.unwrap();
        assert_eq!(state.status(), Status::Lost);

        let err = engine.submit_guess(&mut state, "crane").await.unwrap_err();
        assert!(matches!(err, GuessError::GameAlreadyOver));
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.history().len(), 1);
    }

    #[tokio::test]
    async fn unused_letters_shrink() {
        let (engine, mut state) = crane_game().await;
        assert_eq!(state.unused_letters().count(), 26);

        engine.submit_guess(&mut state, "slate").await.unwrap();

        let unused: String = state.unused_letters().map(char::from).collect();
        assert_eq!(unused, "BCDFGHIJKMNOPQRUVWXYZ");
    }

    #[tokio::test]
    async fn invalid_options_are_rejected() {
        let engine = engine();

        for options in [GameOptions::new(0, 6), GameOptions::new(5, 0)] {
            let err = engine.start(options).await.unwrap_err();
            assert!(matches!(err, StartError::InvalidOptions(_)));
        }

        assert_eq!(engine.source().draws(), 0);
    }

    #[tokio::test]
    async fn other_word_lengths() {
        let engine = GuessEngine::new(
            MockSource::new(&["crane", "planet"]).with_words(&["planet", "plants"]),
        );
        let mut state = engine
            .start(GameOptions::default().with_length(6))
            .await
            .unwrap();

        let guess = engine.submit_guess(&mut state, "plants").await.unwrap();

        assert_eq!(guess, "OOOOo.");
        assert!(matches!(
            engine.submit_guess(&mut state, "crane").await,
            Err(GuessError::InvalidLength {
                expected: 6,
                found: 5
            })
        ));
    }

    #[tokio::test]
    async fn draw_cap_is_configurable() {
        let engine = GuessEngine::new(MockSource::new(&["qwert"]).with_words(&WORDS))
            .with_max_draws(3);

        let err = engine.start(GameOptions::default()).await.unwrap_err();

        assert!(matches!(err, StartError::NoCandidateWords { draws: 3, .. }));
        assert_eq!(engine.source().draws(), 3);
    }
}
