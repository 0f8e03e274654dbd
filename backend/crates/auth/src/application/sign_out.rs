//! Sign Out Use Case
//!
//! Ends a session. Tokens are stateless, so the server side only drops
//! per-session state; the handler clears the cookie.

use crate::application::authenticator::Authenticator;
use crate::application::session_token;
use crate::domain::repository::CredentialRepository;

impl<R> Authenticator<R>
where
    R: CredentialRepository,
{
    /// End the session identified by a cookie value, if any
    ///
    /// Idempotent. An expired but authentic token still identifies its
    /// session; forged or missing tokens are ignored.
    pub fn logout(&self, token: Option<&str>) {
        let Some(token) = token else {
            return;
        };

        let Ok(claims) = session_token::verify_signature(token, self.cookie_settings().key_bytes())
        else {
            tracing::debug!("Sign out with unverifiable token");
            return;
        };

        let Some(session_id) = claims.session_id() else {
            return;
        };

        self.notify_session_ended(session_id);

        tracing::info!(username = %claims.sub, session_id = %session_id, "User signed out");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::application::authenticator::test_support::*;
    use crate::application::sign_in::SignInInput;

    #[tokio::test]
    async fn test_logout_notifies_observers() {
        let (auth, _) = authenticator();
        let observer = Arc::new(RecordingObserver::default());
        let auth = auth.with_observer(observer.clone());

        let issued = auth
            .login(SignInInput {
                username: "alice".into(),
                password: PASSWORD.into(),
            })
            .await
            .unwrap();

        auth.logout(Some(&issued.token));
        // Second logout with the same token is harmless
        auth.logout(Some(&issued.token));

        let ended = observer.ended.lock().unwrap();
        assert_eq!(ended.len(), 2);
        assert!(ended.iter().all(|id| *id == issued.session.session_id));
    }

    #[tokio::test]
    async fn test_logout_without_session() {
        let (auth, _) = authenticator();
        let observer = Arc::new(RecordingObserver::default());
        let auth = auth.with_observer(observer.clone());

        auth.logout(None);
        auth.logout(Some("forged.token"));

        assert!(observer.ended.lock().unwrap().is_empty());
    }
}
