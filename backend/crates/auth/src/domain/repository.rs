//! Repository Traits
//!
//! Interfaces for credential persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::credential_store::CredentialStore;
use crate::error::AuthResult;

/// Persistence of the whole credential document
///
/// The document is small and always read and written as a unit.
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Load the document; missing or malformed content is an error
    async fn load(&self) -> AuthResult<CredentialStore>;

    /// Replace the persisted document
    async fn save(&self, store: &CredentialStore) -> AuthResult<()>;
}
