//! Application Configuration
//!
//! Configuration for the Auth application layer. Cookie name, signing key
//! and lifetime are not here: they come from the credential document.

use std::path::PathBuf;

use platform::cookie::CookieConfig;

use crate::domain::value_object::cookie_settings::CookieSettings;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Largest accepted profile picture (2 MiB)
pub const DEFAULT_MAX_PROFILE_PICTURE_BYTES: usize = 2 * 1024 * 1024;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Directory for uploaded profile pictures
    pub profile_pics_dir: PathBuf,
    /// Upload size limit for profile pictures
    pub max_profile_picture_bytes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            profile_pics_dir: PathBuf::from("profile_pics"),
            max_profile_picture_bytes: DEFAULT_MAX_PROFILE_PICTURE_BYTES,
        }
    }
}

impl AuthConfig {
    /// Plain-HTTP friendly settings for local development
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session cookie attributes for the given document settings
    pub fn cookie_config(&self, settings: &CookieSettings) -> CookieConfig {
        CookieConfig {
            name: settings.name().to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(settings.lifetime().num_seconds()),
        }
    }
}
