//! Credential Store Entity
//!
//! In-memory form of the credential document: every registered user plus
//! the cookie-signing parameters. Persistence is the repository's job.

use std::collections::HashMap;
use std::path::PathBuf;

use platform::password::PasswordHashError;
use thiserror::Error;

use crate::domain::entity::user_record::UserRecord;
use crate::domain::value_object::{
    cookie_settings::CookieSettings,
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("user {0} already exists")]
    DuplicateUser(String),

    #[error("user {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
}

/// All user records keyed by user name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    users: HashMap<UserName, UserRecord>,
    cookie: CookieSettings,
}

impl CredentialStore {
    pub fn new(cookie: CookieSettings) -> Self {
        Self {
            users: HashMap::new(),
            cookie,
        }
    }

    pub fn cookie(&self) -> &CookieSettings {
        &self.cookie
    }

    pub fn get(&self, username: &UserName) -> Option<&UserRecord> {
        self.users.get(username)
    }

    pub fn contains(&self, username: &UserName) -> bool {
        self.users.contains_key(username)
    }

    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Insert a new record; the user name must be unused
    pub fn add_user(&mut self, record: UserRecord) -> Result<(), CredentialStoreError> {
        if self.users.contains_key(&record.username) {
            return Err(CredentialStoreError::DuplicateUser(
                record.username.to_string(),
            ));
        }
        self.users.insert(record.username.clone(), record);
        Ok(())
    }

    /// Re-hash and replace a user's password
    pub fn update_password(
        &mut self,
        username: &UserName,
        new_password: &RawPassword,
        pepper: Option<&[u8]>,
    ) -> Result<(), CredentialStoreError> {
        let record = self.record_mut(username)?;
        record.password = UserPassword::from_raw(new_password, pepper)?;
        Ok(())
    }

    pub fn set_profile_image(
        &mut self,
        username: &UserName,
        path: PathBuf,
    ) -> Result<(), CredentialStoreError> {
        self.record_mut(username)?.profile_image_path = Some(path);
        Ok(())
    }

    /// Emails are stored lowercase, so this is case-insensitive
    pub fn email_taken(&self, email: &Email) -> bool {
        self.users.values().any(|record| record.has_email(email))
    }

    fn record_mut(&mut self, username: &UserName) -> Result<&mut UserRecord, CredentialStoreError> {
        self.users
            .get_mut(username)
            .ok_or_else(|| CredentialStoreError::NotFound(username.to_string()))
    }
}
