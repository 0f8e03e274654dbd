//! Entity Module

pub mod credential_store;
pub mod session;
pub mod user_record;

pub use credential_store::{CredentialStore, CredentialStoreError};
pub use session::{AuthState, AuthenticationStatus, Session};
pub use user_record::UserRecord;
