use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::{GameOptions, GameState, GuessEngine};
use crate::games::wordle::{
    core::GuessResult,
    error::{SessionError, StartError},
    source::WordSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Session {
    // held for a whole turn, dictionary lookup included
    turn: Mutex<GameState>,
    snapshot: ArcSwap<GameState>,
}

impl Session {
    fn new(state: GameState) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(state.clone()),
            turn: Mutex::new(state),
        }
    }
}

/// Every running game, keyed by [`SessionId`].
///
/// Guesses for one session are applied one at a time, in arrival order.
/// Sessions never wait on each other, and reading a session's state never
/// waits on a guess in progress.
#[derive(Debug)]
pub struct SessionStore<S> {
    engine: Arc<GuessEngine<S>>,
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Session>>>>,
    next_id: Arc<AtomicU64>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            sessions: self.sessions.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<S> SessionStore<S> {
    pub fn new(engine: GuessEngine<S>) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Arc::default(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn engine(&self) -> &GuessEngine<S> {
        &self.engine
    }

    async fn get(&self, id: SessionId) -> Result<Arc<Session>, SessionError> {
        let guard = self.sessions.read().await;
        guard
            .get(&id)
            .cloned()
            .ok_or(SessionError::UnknownSession(id))
    }

    /// Read-only snapshot as of the last accepted guess.
    pub async fn get_state(&self, id: SessionId) -> Result<Arc<GameState>, SessionError> {
        Ok(self.get(id).await?.snapshot.load_full())
    }

    /// Forgets a session, returning its final state.
    #[tracing::instrument(skip(self), fields(%id))]
    pub async fn end_session(&self, id: SessionId) -> Result<Arc<GameState>, SessionError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or(SessionError::UnknownSession(id))?;

        info!("session ended");

        Ok(session.snapshot.load_full())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl<S> SessionStore<S>
where
    S: WordSource,
{
    #[tracing::instrument(skip(self))]
    pub async fn start_session(&self, options: GameOptions) -> Result<SessionId, StartError> {
        let state = self.engine.start(options).await?;

        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Session::new(state)));

        info!(%id, "session started");

        Ok(id)
    }

    #[tracing::instrument(skip(self, text), fields(%id))]
    pub async fn submit_guess(
        &self,
        id: SessionId,
        text: &str,
    ) -> Result<GuessResult, SessionError> {
        let session = self.get(id).await?;

        let mut state = session.turn.lock().await;
        let guess = self.engine.submit_guess(&mut state, text).await?;

        session.snapshot.store(Arc::new(state.clone()));

        Ok(guess)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::{GameOptions, GuessEngine, SessionError, SessionId, SessionStore};
    use crate::games::wordle::{error::GuessError, game::Status, source::testing::MockSource};

    const WORDS: [&str; 7] = ["crane", "slate", "pious", "mound", "light", "fizzy", "dwelt"];

    fn store() -> SessionStore<MockSource> {
        SessionStore::new(GuessEngine::new(
            MockSource::new(&["crane"]).with_words(&WORDS),
        ))
    }

    #[tokio::test]
    #[traced_test]
    async fn start_and_play() {
        let store = store();
        let id = store.start_session(GameOptions::default()).await.unwrap();

        let guess = store.submit_guess(id, "slate").await.unwrap();
        assert_eq!(guess, "..O.O");

        let state = store.get_state(id).await.unwrap();
        assert_eq!(state.attempts_used(), 1);
        assert_eq!(state.attempts_remaining(), 5);
        assert!(logs_contain("session started"));
    }

    #[tokio::test]
    async fn get_state_is_idempotent() {
        let store = store();
        let id = store.start_session(GameOptions::default()).await.unwrap();
        store.submit_guess(id, "slate").await.unwrap();

        let first = store.get_state(id).await.unwrap();
        let second = store.get_state(id).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn snapshot_ignores_rejected_guesses() {
        let store = store();
        let id = store.start_session(GameOptions::default()).await.unwrap();
        let before = store.get_state(id).await.unwrap();

        let err = store.submit_guess(id, "qwert").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Guess(GuessError::NotInWordList(_))
        ));

        let after = store.get_state(id).await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn unknown_session() {
        let store = store();
        let id = SessionId(42);

        assert!(matches!(
            store.submit_guess(id, "crane").await,
            Err(SessionError::UnknownSession(missing)) if missing == id
        ));
        assert!(matches!(
            store.get_state(id).await,
            Err(SessionError::UnknownSession(_))
        ));
        assert!(matches!(
            store.end_session(id).await,
            Err(SessionError::UnknownSession(_))
        ));
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = store();
        let a = store.start_session(GameOptions::default()).await.unwrap();
        let b = store.start_session(GameOptions::default()).await.unwrap();
        assert_ne!(a, b);

        let (won, missed) = tokio::join!(store.submit_guess(a, "crane"), store.submit_guess(b, "slate"));
        won.unwrap();
        missed.unwrap();

        assert_eq!(store.get_state(a).await.unwrap().status(), Status::Won);

        let b_state = store.get_state(b).await.unwrap();
        assert_eq!(b_state.status(), Status::InProgress);
        assert_eq!(b_state.attempts_used(), 1);
    }

    #[tokio::test]
    async fn concurrent_guesses_on_one_session_are_queued() {
        let store = store();
        let id = store
            .start_session(GameOptions::default().with_max_attempts(3))
            .await
            .unwrap();

        let (first, second, third, fourth) = tokio::join!(
            store.submit_guess(id, "slate"),
            store.submit_guess(id, "pious"),
            store.submit_guess(id, "mound"),
            store.submit_guess(id, "light"),
        );

        let accepted = [&first, &second, &third, &fourth]
            .into_iter()
            .filter(|result| result.is_ok())
            .count();
        assert_eq!(accepted, 3);
        assert!(matches!(
            fourth,
            Err(SessionError::Guess(GuessError::GameAlreadyOver))
        ));

        let state = store.get_state(id).await.unwrap();
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.history().len(), 3);
    }

    #[tokio::test]
    async fn end_session_returns_final_state() {
        let store = store();
        let id = store.start_session(GameOptions::default()).await.unwrap();
        store.submit_guess(id, "crane").await.unwrap();

        let state = store.end_session(id).await.unwrap();

        assert_eq!(state.status(), Status::Won);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_sessions() {
        let store = store();
        let other = store.clone();

        let id = store.start_session(GameOptions::default()).await.unwrap();
        other.submit_guess(id, "slate").await.unwrap();

        assert_eq!(store.get_state(id).await.unwrap().attempts_used(), 1);
        assert_eq!(other.len().await, 1);
    }
}
