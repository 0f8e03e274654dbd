//! User Record Entity
//!
//! One entry of the credential document.

use std::path::PathBuf;

use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique, lowercase login handle
    pub username: UserName,
    /// Full name shown in the UI
    pub display_name: DisplayName,
    /// Optional for accounts seeded by hand
    pub email: Option<Email>,
    /// Argon2id hash, never plaintext
    pub password: UserPassword,
    /// Path of the uploaded profile picture, if any
    pub profile_image_path: Option<PathBuf>,
}

impl UserRecord {
    pub fn new(
        username: UserName,
        display_name: DisplayName,
        email: Option<Email>,
        password: UserPassword,
    ) -> Self {
        Self {
            username,
            display_name,
            email,
            password,
            profile_image_path: None,
        }
    }

    /// Argon2id comparison against the stored hash
    pub fn verify_password(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.password.verify(raw, pepper)
    }

    pub fn has_email(&self, email: &Email) -> bool {
        self.email.as_ref() == Some(email)
    }
}
