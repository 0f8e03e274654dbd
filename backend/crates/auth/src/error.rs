//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::storage::StorageError;
use thiserror::Error;

use crate::domain::entity::credential_store::CredentialStoreError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password (deliberately indistinguishable)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// User name already registered
    #[error("Username already exists")]
    DuplicateUser,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// One or more form fields failed validation
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Current password did not match on password change
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    /// Session cookie missing, tampered with, or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Profile picture is not a PNG or JPEG
    #[error("Profile picture must be a PNG or JPEG image")]
    UnsupportedImage,

    /// Profile picture exceeds the configured size limit
    #[error("Profile picture must be at most {max_bytes} bytes")]
    ImageTooLarge { max_bytes: usize },

    /// Credential document or profile image could not be read or written
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateUser => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Validation(_) | AuthError::CurrentPasswordIncorrect => {
                StatusCode::BAD_REQUEST
            }
            AuthError::UnsupportedImage => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AuthError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AuthError::Storage(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Validation(_) | AuthError::CurrentPasswordIncorrect => {
                ErrorKind::BadRequest
            }
            AuthError::UnsupportedImage => ErrorKind::UnsupportedMediaType,
            AuthError::ImageTooLarge { .. } => ErrorKind::PayloadTooLarge,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; the detail only goes to the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::new(self.kind(), "Validation failed")
                .with_details(errors.clone())
                .with_action("Fix the highlighted fields and try again"),
            AuthError::Storage(_) => AppError::new(self.kind(), "Storage failure"),
            AuthError::Internal(_) => AppError::new(self.kind(), "Internal server error"),
            AuthError::InvalidCredentials => AppError::new(self.kind(), self.to_string())
                .with_action("Check your username and password"),
            AuthError::SessionInvalid => {
                AppError::new(self.kind(), self.to_string()).with_action("Please log in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Auth storage error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::CurrentPasswordIncorrect => {
                tracing::warn!("Password change with wrong current password");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<CredentialStoreError> for AuthError {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::DuplicateUser(_) => AuthError::DuplicateUser,
            CredentialStoreError::NotFound(_) => AuthError::UserNotFound,
            CredentialStoreError::Hashing(e) => AuthError::Internal(e.to_string()),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
