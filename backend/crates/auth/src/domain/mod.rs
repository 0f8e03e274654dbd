//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{AuthState, AuthenticationStatus, CredentialStore, Session, UserRecord};
pub use repository::CredentialRepository;
