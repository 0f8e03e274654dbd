//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - The authenticator and its use cases
//! - `infra/` - YAML credential document
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with full-form validation
//! - Sign in / sign out with a signed, time-limited session cookie
//! - Password change and profile picture upload
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Session tokens are HMAC-SHA256 signed with the key from the
//!   credential document; nothing is stored server-side
//! - Unknown users and wrong passwords are indistinguishable

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, Authenticator, SessionObserver};
pub use domain::entity::session::Session;
pub use error::{AuthError, AuthResult};
pub use infra::yaml_file::YamlCredentialFile;
pub use presentation::{AuthAppState, auth_router, require_session};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
