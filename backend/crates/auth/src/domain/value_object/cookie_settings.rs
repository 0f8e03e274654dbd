//! Cookie Settings Value Object
//!
//! Session cookie parameters read from the `cookie` section of the
//! credential document. The key signs session tokens.

use std::fmt;

use platform::cookie::is_valid_cookie_name;
use thiserror::Error;

/// Shortest accepted signing key, in bytes
pub const MIN_COOKIE_KEY_BYTES: usize = 16;

/// Longest accepted session lifetime, in days
pub const MAX_EXPIRY_DAYS: u32 = 3650;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieSettingsError {
    #[error("cookie name {0:?} is not a valid cookie token")]
    InvalidName(String),
    #[error("cookie key must be at least {MIN_COOKIE_KEY_BYTES} bytes")]
    KeyTooShort,
    #[error("cookie expiry_days must be between 1 and {MAX_EXPIRY_DAYS}")]
    InvalidExpiry,
}

/// Validated cookie name, signing key and lifetime
#[derive(Clone, PartialEq, Eq)]
pub struct CookieSettings {
    name: String,
    key: String,
    expiry_days: u32,
}

impl CookieSettings {
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        expiry_days: u32,
    ) -> Result<Self, CookieSettingsError> {
        let name = name.into();
        let key = key.into();

        if !is_valid_cookie_name(&name) {
            return Err(CookieSettingsError::InvalidName(name));
        }
        if key.len() < MIN_COOKIE_KEY_BYTES {
            return Err(CookieSettingsError::KeyTooShort);
        }
        if !(1..=MAX_EXPIRY_DAYS).contains(&expiry_days) {
            return Err(CookieSettingsError::InvalidExpiry);
        }

        Ok(Self {
            name,
            key,
            expiry_days,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn key_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }

    pub fn expiry_days(&self) -> u32 {
        self.expiry_days
    }

    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.expiry_days))
    }
}

impl fmt::Debug for CookieSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSettings")
            .field("name", &self.name)
            .field("key", &"[REDACTED]")
            .field("expiry_days", &self.expiry_days)
            .finish()
    }
}
