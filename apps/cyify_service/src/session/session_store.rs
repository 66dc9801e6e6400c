use std::{
    collections::HashMap,
    mem,
    sync::Arc,
    time::{Duration, Instant},
};

use cyify_llm::ApiKey;
use parking_lot::Mutex;
use uuid::Uuid;

use super::session_state::{SessionAction, SessionState};
use crate::core::error::SessionError;
use crate::credentials::ResolvedCredential;

/// What a started transform needs once the session lock is released.
pub struct TransformJob {
    pub input_text: String,
    pub api_key: Option<ApiKey>,
}

pub struct Session {
    state: Mutex<SessionState>,
    last_seen: Mutex<Instant>,
}

impl Session {
    fn new(credential: ResolvedCredential) -> Self {
        Self {
            state: Mutex::new(SessionState::new(credential)),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    /// Reduces `action` into the session and returns the resulting state.
    pub fn dispatch(&self, action: SessionAction) -> SessionState {
        let mut state = self.state.lock();
        let next = mem::take(&mut *state).reduce(action);
        *state = next;
        state.clone()
    }

    /// Moves the session to in-flight and hands back the inputs for the call.
    /// Returns `None` when a transform is already running.
    pub fn begin_transform(&self) -> Option<TransformJob> {
        let mut state = self.state.lock();
        let was_busy = state.is_busy();
        let next = mem::take(&mut *state).reduce(SessionAction::TransformStarted);
        *state = next;

        if was_busy {
            return None;
        }

        Some(TransformJob {
            input_text: state.input_text.clone(),
            api_key: state.api_key().cloned(),
        })
    }

    fn touch(&self) {
        *self.last_seen.lock() = Instant::now();
    }

    fn is_idle_for(&self, timeout: Duration, now: Instant) -> bool {
        !self.state.lock().is_busy() && now.duration_since(*self.last_seen.lock()) > timeout
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Arc<Session>>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Opens a new session, first dropping sessions nobody has touched
    /// within the idle timeout.
    pub fn create(&self, credential: ResolvedCredential) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.lock();

        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle_for(self.idle_timeout, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, "Evicted idle sessions");
        }

        sessions.insert(id, Arc::new(Session::new(credential)));
        tracing::info!(session_id = %id, active = sessions.len(), "Session created");

        id
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<Session>, SessionError> {
        let session = self
            .sessions
            .lock()
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))?;

        session.touch();
        Ok(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
