//! Check Session Use Case
//!
//! Restores a session from its signed cookie value.

use chrono::Utc;

use crate::application::authenticator::Authenticator;
use crate::application::session_token;
use crate::domain::entity::session::{AuthState, Session};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_name::UserName;

impl<R> Authenticator<R>
where
    R: CredentialRepository,
{
    /// Session for a cookie value, or `None` on any failure
    ///
    /// Checks signature, expiry and that the user still exists. The display
    /// name is taken from the current record.
    pub async fn restore(&self, token: &str) -> Option<Session> {
        let key = self.cookie_settings().key_bytes();
        let claims = match session_token::verify(token, key, Utc::now()) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                return None;
            }
        };

        let session_id = claims.session_id()?;
        let username = UserName::parse(&claims.sub).ok()?;
        let created_at = claims.issued_at()?;
        let expires_at = claims.expires_at()?;

        let Some(record) = self.find_user(&username).await else {
            tracing::debug!(username = %username, "Session for unknown user");
            return None;
        };

        Some(Session {
            session_id,
            username,
            display_name: record.display_name,
            created_at,
            expires_at,
        })
    }

    /// Authentication state for an optional cookie value
    pub async fn check(&self, token: Option<&str>) -> AuthState {
        match token {
            None => AuthState::anonymous(),
            Some(token) => match self.restore(token).await {
                Some(session) => AuthState::authenticated(session),
                None => AuthState::rejected(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use kernel::id::SessionId;

    use crate::application::authenticator::{Authenticator, test_support::*};
    use crate::application::config::AuthConfig;
    use crate::application::sign_in::SignInInput;
    use crate::domain::entity::credential_store::CredentialStore;
    use crate::application::session_token;
    use crate::domain::entity::session::{AuthenticationStatus, Session};
    use crate::domain::value_object::cookie_settings::CookieSettings;

    async fn login_token(auth: &Authenticator<MemoryRepo>) -> String {
        auth.login(SignInInput {
            username: "alice".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap()
        .token
    }

    #[tokio::test]
    async fn test_restore_valid_token() {
        let (auth, _) = authenticator();
        let token = login_token(&auth).await;

        let session = auth.restore(&token).await.unwrap();
        assert_eq!(session.username.as_str(), "alice");
        assert_eq!(session.display_name.as_str(), "Alice Liddell");
        assert!(!session.is_expired_at(chrono::Utc::now()));
    }

    #[tokio::test]
    async fn test_restore_rejects_garbage() {
        let (auth, _) = authenticator();
        assert!(auth.restore("").await.is_none());
        assert!(auth.restore("abc.def").await.is_none());
    }

    #[tokio::test]
    async fn test_restore_rejects_other_key() {
        let (auth, _) = authenticator();
        let token = login_token(&auth).await;

        let mut store = CredentialStore::new(
            CookieSettings::new("stock_dashboard", "a-completely-different-key", 30).unwrap(),
        );
        store.add_user(alice()).unwrap();
        let other = Authenticator::with_store(
            Arc::new(MemoryRepo::default()),
            Arc::new(AuthConfig::development()),
            store,
        );

        assert!(other.restore(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_restore_rejects_removed_user() {
        let (auth, _) = authenticator();
        let token = login_token(&auth).await;

        // Same key, but the user is gone
        let (empty, _) = authenticator_with(vec![], AuthConfig::development());
        assert!(empty.restore(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_restore_rejects_expired_token() {
        let (auth, _) = authenticator();
        let record = alice();
        let now = Utc::now();
        let session = Session {
            session_id: SessionId::new(),
            username: record.username,
            display_name: record.display_name,
            created_at: now - Duration::days(31),
            expires_at: now - Duration::days(1),
        };
        let token = session_token::issue(&session, auth.cookie_settings().key_bytes());

        assert!(auth.restore(&token).await.is_none());
        assert_eq!(
            auth.check(Some(&token)).await.status,
            AuthenticationStatus::Rejected
        );
    }

    #[tokio::test]
    async fn test_check_states() {
        let (auth, _) = authenticator();
        let token = login_token(&auth).await;

        assert_eq!(auth.check(None).await.status, AuthenticationStatus::Anonymous);
        assert_eq!(
            auth.check(Some("forged")).await.status,
            AuthenticationStatus::Rejected
        );
        let state = auth.check(Some(&token)).await;
        assert!(state.is_authenticated());
        assert_eq!(state.session.unwrap().username.as_str(), "alice");
    }
}
