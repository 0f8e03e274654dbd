//! Authenticator
//!
//! Owns the in-memory credential store and serializes every mutation of it.
//! The use cases (`sign_in`, `sign_up`, ...) are methods on this type, each
//! defined in its own module.

use std::sync::Arc;

use kernel::id::SessionId;
use platform::cookie::CookieConfig;
use tokio::sync::Mutex;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{credential_store::CredentialStore, session::Session, user_record::UserRecord};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{cookie_settings::CookieSettings, user_name::UserName};
use crate::error::AuthResult;

/// Notified when a session ends, so per-session state elsewhere can be dropped
pub trait SessionObserver: Send + Sync {
    fn session_ended(&self, session_id: SessionId);
}

/// A session together with its signed cookie value
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

/// Credential-store owner and session issuer
pub struct Authenticator<R>
where
    R: CredentialRepository,
{
    pub(crate) repo: Arc<R>,
    pub(crate) config: Arc<AuthConfig>,
    store: Mutex<CredentialStore>,
    cookie: CookieSettings,
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl<R> Authenticator<R>
where
    R: CredentialRepository,
{
    /// Load the credential document and take ownership of it
    ///
    /// Fails when the document is missing or malformed.
    pub async fn open(repo: Arc<R>, config: Arc<AuthConfig>) -> AuthResult<Self> {
        let store = repo.load().await?;

        tracing::info!(users = store.len(), "Credential store loaded");

        Ok(Self::with_store(repo, config, store))
    }

    /// Take ownership of an already loaded store
    pub fn with_store(repo: Arc<R>, config: Arc<AuthConfig>, store: CredentialStore) -> Self {
        Self {
            repo,
            config,
            cookie: store.cookie().clone(),
            store: Mutex::new(store),
            observers: Vec::new(),
        }
    }

    /// Register a listener for ended sessions
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn cookie_settings(&self) -> &CookieSettings {
        &self.cookie
    }

    /// Attributes of the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        self.config.cookie_config(&self.cookie)
    }

    /// Current record for a user
    pub async fn find_user(&self, username: &UserName) -> Option<UserRecord> {
        self.store.lock().await.get(username).cloned()
    }

    /// Snapshot of the whole store
    pub async fn snapshot(&self) -> CredentialStore {
        self.store.lock().await.clone()
    }

    pub(crate) fn issue_session(&self, record: &UserRecord) -> IssuedSession {
        let session = Session::start(
            record.username.clone(),
            record.display_name.clone(),
            self.cookie.lifetime(),
        );
        let token = session_token::issue(&session, self.cookie.key_bytes());
        IssuedSession { session, token }
    }

    pub(crate) fn notify_session_ended(&self, session_id: SessionId) {
        for observer in &self.observers {
            observer.session_ended(session_id);
        }
    }

    /// Read-modify-write of the credential store
    ///
    /// `change` runs on a copy. The copy is persisted and only then swapped
    /// in, so a failed save leaves memory matching disk.
    pub(crate) async fn mutate<T, F>(&self, change: F) -> AuthResult<T>
    where
        F: FnOnce(&mut CredentialStore) -> AuthResult<T>,
    {
        let mut guard = self.store.lock().await;
        let mut next = guard.clone();
        let output = change(&mut next)?;
        self.repo.save(&next).await?;
        *guard = next;
        Ok(output)
    }
}
