//! YAML Credential File
//!
//! The credential document on disk:
//!
//! ```yaml
//! credentials:
//!   usernames:
//!     alice:
//!       email: alice@example.com
//!       name: Alice Liddell
//!       password_hash: "$argon2id$v=19$..."
//!       profile_pic: profile_pics/alice.png
//! cookie:
//!   name: stock_dashboard
//!   key: a-long-random-signing-key
//!   expiry_days: 30
//! ```
//!
//! `password` is accepted as an alias of `password_hash`. Unknown keys are
//! ignored on read and dropped on write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use platform::storage::{self, StorageError};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{credential_store::CredentialStore, user_record::UserRecord};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    cookie_settings::CookieSettings, display_name::DisplayName, email::Email,
    user_name::UserName, user_password::UserPassword,
};
use crate::error::AuthResult;

// ============================================================================
// Document DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct CredentialDocument {
    #[serde(default)]
    credentials: CredentialsSection,
    cookie: CookieSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialsSection {
    #[serde(default)]
    usernames: BTreeMap<String, UserEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    name: String,
    #[serde(alias = "password")]
    password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_pic: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CookieSection {
    name: String,
    key: String,
    expiry_days: u32,
}

impl CredentialDocument {
    fn into_store(self, path: &Path) -> Result<CredentialStore, StorageError> {
        let cookie = CookieSettings::new(
            self.cookie.name,
            self.cookie.key,
            self.cookie.expiry_days,
        )
        .map_err(|e| StorageError::malformed(path, e))?;

        let mut store = CredentialStore::new(cookie);
        for (key, entry) in self.credentials.usernames {
            let record = entry
                .into_record(&key)
                .map_err(|reason| StorageError::malformed(path, format!("user {key:?}: {reason}")))?;
            store
                .add_user(record)
                .map_err(|e| StorageError::malformed(path, e))?;
        }

        Ok(store)
    }

    fn from_store(store: &CredentialStore) -> Self {
        let usernames = store
            .users()
            .map(|record| (record.username.to_string(), UserEntry::from_record(record)))
            .collect();

        let cookie = store.cookie();
        Self {
            credentials: CredentialsSection { usernames },
            cookie: CookieSection {
                name: cookie.name().to_string(),
                key: cookie.key().to_string(),
                expiry_days: cookie.expiry_days(),
            },
        }
    }
}

impl UserEntry {
    fn into_record(self, key: &str) -> Result<UserRecord, String> {
        let username = UserName::parse(key).map_err(|e| e.to_string())?;
        let display_name = DisplayName::new(&self.name).map_err(|e| e.to_string())?;
        let email = match self.email.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Email::new(raw).map_err(|e| e.to_string())?),
        };
        let password = UserPassword::from_phc_string(self.password_hash)
            .map_err(|_| "password_hash is not a PHC string".to_string())?;

        let mut record = UserRecord::new(username, display_name, email, password);
        record.profile_image_path = self.profile_pic;
        Ok(record)
    }

    fn from_record(record: &UserRecord) -> Self {
        Self {
            email: record.email.as_ref().map(|e| e.to_string()),
            name: record.display_name.to_string(),
            password_hash: record.password.as_phc_string().to_string(),
            profile_pic: record.profile_image_path.clone(),
        }
    }
}

// ============================================================================
// Repository
// ============================================================================

/// Credential document stored as one YAML file
#[derive(Debug, Clone)]
pub struct YamlCredentialFile {
    path: PathBuf,
}

impl YamlCredentialFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialRepository for YamlCredentialFile {
    async fn load(&self) -> AuthResult<CredentialStore> {
        let bytes = storage::read_required(&self.path).await?;
        let document: CredentialDocument = serde_yaml::from_slice(&bytes)
            .map_err(|e| StorageError::malformed(&self.path, e))?;
        Ok(document.into_store(&self.path)?)
    }

    async fn save(&self, store: &CredentialStore) -> AuthResult<()> {
        let yaml = serde_yaml::to_string(&CredentialDocument::from_store(store))
            .map_err(|e| StorageError::encode(&self.path, e))?;
        storage::write_atomic(&self.path, yaml.as_bytes()).await?;

        tracing::debug!(path = %self.path.display(), users = store.len(), "Credential document saved");
        Ok(())
    }
}
