//! Session Entity
//!
//! An authenticated browser session. Lives only inside the signed cookie
//! token; nothing is stored server-side.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;
use serde::Serialize;

use crate::domain::value_object::{display_name::DisplayName, user_name::UserName};

/// Authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub username: UserName,
    pub display_name: DisplayName,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a new session valid for `lifetime`
    pub fn start(username: UserName, display_name: DisplayName, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            username,
            display_name,
            created_at: now,
            expires_at: now + lifetime,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }
}

/// Outcome of authenticating a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationStatus {
    /// No credentials presented
    Anonymous,
    /// Credentials presented but not accepted
    Rejected,
    Authenticated,
}

/// Authentication state of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthenticationStatus,
    pub session: Option<Session>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self {
            status: AuthenticationStatus::Anonymous,
            session: None,
        }
    }

    pub fn rejected() -> Self {
        Self {
            status: AuthenticationStatus::Rejected,
            session: None,
        }
    }

    pub fn authenticated(session: Session) -> Self {
        Self {
            status: AuthenticationStatus::Authenticated,
            session: Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthenticationStatus::Authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(lifetime: Duration) -> Session {
        Session::start(
            UserName::parse("alice").unwrap(),
            DisplayName::new("Alice").unwrap(),
            lifetime,
        )
    }

    #[test]
    fn test_expiry() {
        let s = session(Duration::days(30));
        assert!(!s.is_expired_at(Utc::now()));
        assert!(s.is_expired_at(Utc::now() + Duration::days(31)));
        assert_eq!(s.expires_at - s.created_at, Duration::days(30));
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(
            session(Duration::days(1)).session_id,
            session(Duration::days(1)).session_id
        );
    }

    #[test]
    fn test_auth_state() {
        assert!(!AuthState::anonymous().is_authenticated());
        assert!(!AuthState::rejected().is_authenticated());
        let state = AuthState::authenticated(session(Duration::days(1)));
        assert!(state.is_authenticated());
        assert_eq!(state.session.unwrap().username.as_str(), "alice");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AuthenticationStatus::Rejected).unwrap(),
            "\"rejected\""
        );
    }
}
