//! Session management for conversations
//!
//! Each conversation owns one [`RangeState`]. The store only hands out
//! copies; a turn loads the session, works on its own copy and puts it back
//! when the turn is complete.

use crate::error::{BotError, Result};
use chrono::{DateTime, Utc};
use range_core::RangeState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSession {
    pub conversation_id: String,
    pub range: RangeState,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(conversation_id: impl Into<String>, range: RangeState) -> Self {
        let now = Utc::now();
        Self {
            conversation_id: conversation_id.into(),
            range,
            created_at: now,
            last_active: now,
        }
    }

    pub fn update_activity(&mut self) {
        self.last_active = Utc::now();
    }

    /// Idle for longer than `max_age_seconds`; an age too large to
    /// represent never expires
    pub fn is_expired(&self, max_age_seconds: i64) -> bool {
        chrono::Duration::try_seconds(max_age_seconds)
            .is_some_and(|max_age| Utc::now() - self.last_active > max_age)
    }
}

/// Keyed storage for conversation sessions
pub trait SessionStore: Send + Sync {
    fn get(&self, conversation_id: &str) -> Result<Option<ConversationSession>>;
    fn put(&self, session: ConversationSession) -> Result<()>;
    fn delete(&self, conversation_id: &str) -> Result<bool>;
    fn cleanup_expired(&self, max_age_seconds: i64) -> Result<usize>;
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    sessions: RwLock<HashMap<String, ConversationSession>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> BotError {
    BotError::Session(format!("Lock error: {e}"))
}

impl SessionStore for InMemoryStore {
    fn get(&self, conversation_id: &str) -> Result<Option<ConversationSession>> {
        Ok(self
            .sessions
            .read()
            .map_err(lock_error)?
            .get(conversation_id)
            .cloned())
    }

    fn put(&self, session: ConversationSession) -> Result<()> {
        self.sessions
            .write()
            .map_err(lock_error)?
            .insert(session.conversation_id.clone(), session);
        Ok(())
    }

    fn delete(&self, conversation_id: &str) -> Result<bool> {
        Ok(self
            .sessions
            .write()
            .map_err(lock_error)?
            .remove(conversation_id)
            .is_some())
    }

    fn cleanup_expired(&self, max_age_seconds: i64) -> Result<usize> {
        let mut sessions = self.sessions.write().map_err(lock_error)?;

        let initial_count = sessions.len();
        sessions.retain(|_, session| !session.is_expired(max_age_seconds));
        Ok(initial_count - sessions.len())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.sessions.read().map_err(lock_error)?.len())
    }
}

pub struct SessionManager {
    store: Box<dyn SessionStore>,
    session_ttl: i64,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_store(Box::new(InMemoryStore::new()))
    }

    pub fn with_store(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            session_ttl: 3600,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.session_ttl = ttl_seconds;
        self
    }

    /// Load a live session; an expired one is dropped and reported as absent
    pub fn load(&self, conversation_id: &str) -> Result<Option<ConversationSession>> {
        match self.store.get(conversation_id)? {
            Some(session) if session.is_expired(self.session_ttl) => {
                info!(conversation_id, "session expired");
                self.store.delete(conversation_id)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Write a session back after a turn
    pub fn save(&self, mut session: ConversationSession) -> Result<()> {
        session.update_activity();
        self.store.put(session)
    }

    /// End a conversation; the next utterance starts a new one
    pub fn end(&self, conversation_id: &str) -> Result<bool> {
        self.store.delete(conversation_id)
    }

    pub fn cleanup_expired(&self) -> Result<usize> {
        self.store.cleanup_expired(self.session_ttl)
    }

    pub fn active_count(&self) -> Result<usize> {
        self.store.len()
    }
}
