//! Session State Store
//!
//! Process-local dashboard state keyed by session id. Entries remember when
//! their session expires so a periodic purge can drop them, and they are
//! removed as soon as the session signs out.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use auth::{Session, SessionObserver};
use chrono::{DateTime, Utc};
use kernel::id::SessionId;

use crate::domain::entity::dashboard_state::{DashboardState, DashboardStatePatch};

struct Entry {
    state: DashboardState,
    expires_at: DateTime<Utc>,
}

/// Dashboard state of every live session
#[derive(Default)]
pub struct SessionStateStore {
    entries: RwLock<HashMap<SessionId, Entry>>,
}

impl SessionStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; defaults when the session has none yet
    pub fn get(&self, session: &Session) -> DashboardState {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&session.session_id)
            .map(|entry| entry.state.clone())
            .unwrap_or_default()
    }

    /// Apply a partial update and return the new state
    pub fn update(&self, session: &Session, patch: DashboardStatePatch) -> DashboardState {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(session.session_id).or_insert_with(|| Entry {
            state: DashboardState::default(),
            expires_at: session.expires_at,
        });
        entry.state.apply(patch);
        entry.state.clone()
    }

    /// Back to defaults
    pub fn reset(&self, session: &Session) -> DashboardState {
        self.remove(session.session_id);
        DashboardState::default()
    }

    pub fn remove(&self, session_id: SessionId) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&session_id);
    }

    /// Drop entries whose session has expired; returns how many
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let purged = before - entries.len();

        if purged > 0 {
            tracing::debug!(purged, remaining = entries.len(), "Purged expired session state");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionObserver for SessionStateStore {
    fn session_ended(&self, session_id: SessionId) {
        self.remove(session_id);
    }
}
