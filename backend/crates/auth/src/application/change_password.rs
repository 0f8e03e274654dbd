//! Change Password Use Case

use crate::application::authenticator::Authenticator;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl<R> Authenticator<R>
where
    R: CredentialRepository,
{
    /// Replace a user's password after checking the current one
    pub async fn change_password(
        &self,
        username: &UserName,
        input: ChangePasswordInput,
    ) -> AuthResult<()> {
        let current = RawPassword::for_verification(input.current_password);
        let new_password = RawPassword::for_verification(input.new_password);
        let confirmed = RawPassword::for_verification(input.confirm_password);

        let mut errors = Vec::new();
        if current.is_empty() {
            errors.push("Current password is required".to_string());
        }
        if new_password.is_empty() {
            errors.push("New password is required".to_string());
        }
        if confirmed.is_empty() {
            errors.push("Password confirmation is required".to_string());
        }
        if !new_password.is_empty() && !confirmed.is_empty() && !new_password.matches(&confirmed)
        {
            errors.push("New passwords do not match".to_string());
        }
        if !new_password.is_empty()
            && let Err(e) = new_password.check_policy()
        {
            errors.push(e.to_string());
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let record = self
            .find_user(username)
            .await
            .ok_or(AuthError::UserNotFound)?;

        let pepper = self.config.pepper();
        if !record.verify_password(&current, pepper) {
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        self.mutate(|store| {
            store
                .update_password(username, &new_password, pepper)
                .map_err(Into::into)
        })
        .await?;

        tracing::info!(username = %username, "Password changed");
        Ok(())
    }
}
