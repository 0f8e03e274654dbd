//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::{session::AuthenticationStatus, session::Session, user_record::UserRecord};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Full name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub accept_terms: bool,
    /// Sign in right after registering
    #[serde(default)]
    pub auto_login: bool,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub username: String,
    pub display_name: String,
    /// True when a session cookie was set
    pub authenticated: bool,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub display_name: String,
    pub expires_at_ms: i64,
}

impl From<&Session> for LoginResponse {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.to_string(),
            display_name: session.display_name.to_string(),
            expires_at_ms: session.expires_at_ms(),
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub status: AuthenticationStatus,
    pub authenticated: bool,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub expires_at_ms: Option<i64>,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub has_profile_picture: bool,
}

impl From<UserRecord> for ProfileResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username.to_string(),
            display_name: record.display_name.to_string(),
            email: record.email.map(String::from),
            has_profile_picture: record.profile_image_path.is_some(),
        }
    }
}

/// Change password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}
