use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;
use uuid::Uuid;

use crate::quiz::{models::QuizError, session::QuizSession};

/// In-memory quiz sessions keyed by user id.
///
/// Closures passed in run under the entry's shard lock and must not await.
pub struct SessionStore {
    sessions: DashMap<Uuid, QuizSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn start_if_missing<F>(&self, user_id: Uuid, start: F) -> Result<(), QuizError>
    where
        F: FnOnce() -> Result<QuizSession, QuizError>,
    {
        if let Entry::Vacant(entry) = self.sessions.entry(user_id) {
            entry.insert(start()?);
            debug!("Started quiz session for user {}", user_id);
        }

        Ok(())
    }

    /// Returns `None` when the user has no session.
    pub fn with_session<T, F>(&self, user_id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut QuizSession) -> T,
    {
        let mut session = self.sessions.get_mut(&user_id)?;
        Some(f(session.value_mut()))
    }

    /// Removes and returns the session if its round is complete.
    pub fn take_completed(&self, user_id: Uuid) -> Result<Option<QuizSession>, QuizError> {
        if let Some((_, session)) = self
            .sessions
            .remove_if(&user_id, |_, session| session.is_complete())
        {
            return Ok(Some(session));
        }

        match self.sessions.contains_key(&user_id) {
            true => Err(QuizError::RoundInProgress),
            false => Ok(None),
        }
    }

    /// Puts `previous` back if exactly one answer has been submitted since it
    /// was taken. Returns false when the session moved on or was cleared.
    pub fn rollback(&self, user_id: Uuid, previous: QuizSession) -> bool {
        match self.sessions.get_mut(&user_id) {
            Some(mut current)
                if current.answer_log().len() == previous.answer_log().len() + 1 =>
            {
                *current = previous;
                debug!("Rolled back last answer for user {}", user_id);
                true
            }
            _ => false,
        }
    }

    pub fn restore(&self, user_id: Uuid, session: QuizSession) {
        self.sessions.insert(user_id, session);
    }

    pub fn clear(&self, user_id: Uuid) -> bool {
        self.sessions.remove(&user_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}
