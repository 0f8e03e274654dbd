//! Application Layer
//!
//! Use cases and application services. Every use case is a method on
//! [`Authenticator`], which owns the credential store.

pub mod authenticator;
pub mod change_password;
pub mod check_session;
pub mod config;
pub mod profile;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use authenticator::{Authenticator, IssuedSession, SessionObserver};
pub use change_password::ChangePasswordInput;
pub use config::AuthConfig;
pub use profile::ImageFormat;
pub use sign_in::SignInInput;
pub use sign_up::{SignUpInput, SignUpOutput};
