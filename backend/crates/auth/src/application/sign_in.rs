//! Sign In Use Case
//!
//! Authenticates a user by name and password and issues a session.

use crate::application::authenticator::{Authenticator, IssuedSession};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

impl<R> Authenticator<R>
where
    R: CredentialRepository,
{
    /// Verify credentials and issue a signed session
    ///
    /// Unknown users are checked against a dummy hash so that both failure
    /// paths do one Argon2 verification and return the same error.
    pub async fn login(&self, input: SignInInput) -> AuthResult<IssuedSession> {
        let password = RawPassword::for_verification(input.password);

        let record = match UserName::parse(&input.username) {
            Ok(username) => self.find_user(&username).await,
            Err(_) => None,
        };

        let pepper = self.config.pepper();
        let Some(record) = record else {
            let _ = UserPassword::dummy().verify(&password, pepper);
            return Err(AuthError::InvalidCredentials);
        };

        if !record.verify_password(&password, pepper) {
            return Err(AuthError::InvalidCredentials);
        }

        if record.password.needs_rehash() {
            tracing::warn!(username = %record.username, "Stored password hash uses outdated parameters");
        }

        let issued = self.issue_session(&record);

        tracing::info!(
            username = %record.username,
            session_id = %issued.session.session_id,
            "User signed in"
        );

        Ok(issued)
    }
}
