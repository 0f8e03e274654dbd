//! Sign Up Use Case
//!
//! Registers a new user. Every field is validated and all failures are
//! reported together, the way a form shows them.

use crate::application::authenticator::{Authenticator, IssuedSession};
use crate::domain::entity::{credential_store::CredentialStore, user_record::UserRecord};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    /// Full name
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
    /// Issue a session right away
    pub auto_login: bool,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: UserRecord,
    /// Present when `auto_login` was requested
    pub session: Option<IssuedSession>,
}

impl<R> Authenticator<R>
where
    R: CredentialRepository,
{
    /// Validate, hash and persist a new user
    pub async fn register(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let snapshot = self.snapshot().await;
        let mut errors = Vec::new();

        let display_name = DisplayName::new(&input.name)
            .map_err(|e| errors.push(e.to_string()))
            .ok();

        let username = match UserName::parse(&input.username) {
            Ok(username) if snapshot.contains(&username) => {
                errors.push("Username already exists".to_string());
                None
            }
            Ok(username) => Some(username),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let email = match Email::new(&input.email) {
            Ok(email) if snapshot.email_taken(&email) => {
                errors.push("Email address already registered".to_string());
                None
            }
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let password = RawPassword::for_verification(input.password);
        let confirmed = RawPassword::for_verification(input.confirm_password);
        if password.is_empty() {
            errors.push("Password is required".to_string());
        } else if let Err(e) = password.check_policy() {
            errors.push(e.to_string());
        }
        if !password.matches(&confirmed) {
            errors.push("Passwords do not match".to_string());
        }

        if !input.accept_terms {
            errors.push("You must agree to the Terms and Conditions".to_string());
        }

        let (Some(display_name), Some(username), Some(email), true) =
            (display_name, username, email, errors.is_empty())
        else {
            tracing::debug!(errors = errors.len(), "Registration rejected");
            return Err(AuthError::Validation(errors));
        };

        let hashed = UserPassword::from_raw(&password, self.config.pepper())?;
        let record = UserRecord::new(username, display_name, Some(email), hashed);

        let stored = record.clone();
        self.mutate(move |store| insert_new_user(store, stored))
            .await?;

        tracing::info!(username = %record.username, "User registered");

        let session = input.auto_login.then(|| self.issue_session(&record));
        if let Some(issued) = &session {
            tracing::info!(
                username = %record.username,
                session_id = %issued.session.session_id,
                "User signed in after registration"
            );
        }

        Ok(SignUpOutput {
            user: record,
            session,
        })
    }
}

/// Add a user after re-checking uniqueness against the locked store
///
/// The checks in `register` ran on a snapshot; a concurrent registration
/// may have taken the name or email since.
fn insert_new_user(store: &mut CredentialStore, record: UserRecord) -> AuthResult<()> {
    if record.email.as_ref().is_some_and(|email| store.email_taken(email)) {
        return Err(AuthError::Validation(vec![
            "Email address already registered".to_string(),
        ]));
    }
    store.add_user(record).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use crate::application::authenticator::test_support::*;
    use crate::application::sign_in::SignInInput;
    use crate::domain::value_object::user_name::UserName;

    use super::*;

    fn input(username: &str, email: &str) -> SignUpInput {
        SignUpInput {
            name: "Bob Builder".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: "Hammer42".to_string(),
            confirm_password: "Hammer42".to_string(),
            accept_terms: true,
            auto_login: false,
        }
    }

    fn validation_errors(err: AuthError) -> Vec<String> {
        match err {
            AuthError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_persists_and_allows_login() {
        let (auth, repo) = authenticator();

        let output = auth.register(input("Bob_1", "Bob@Example.com")).await.unwrap();
        assert_eq!(output.user.username.as_str(), "bob_1");
        assert_eq!(output.user.email.as_ref().unwrap().as_str(), "bob@example.com");
        assert!(output.session.is_none());

        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
        let saved = repo.saved.lock().unwrap().clone().unwrap();
        let bob = saved.get(&UserName::parse("bob_1").unwrap()).unwrap();
        assert!(bob.password.as_phc_string().starts_with("$argon2id$"));

        let issued = auth
            .login(SignInInput {
                username: "bob_1".into(),
                password: "Hammer42".into(),
            })
            .await
            .unwrap();
        assert_eq!(issued.session.display_name.as_str(), "Bob Builder");
    }

    #[tokio::test]
    async fn test_register_with_auto_login() {
        let (auth, _) = authenticator();
        let mut req = input("bob", "bob@example.com");
        req.auto_login = true;

        let output = auth.register(req).await.unwrap();
        let issued = output.session.unwrap();
        assert_eq!(issued.session.username.as_str(), "bob");
        assert!(!issued.token.is_empty());
    }

    #[tokio::test]
    async fn test_register_collects_all_errors() {
        let (auth, repo) = authenticator();

        let err = auth
            .register(SignUpInput {
                name: "  ".into(),
                username: "a!".into(),
                email: "not-an-email".into(),
                password: "short".into(),
                confirm_password: "other".into(),
                accept_terms: false,
                auto_login: true,
            })
            .await
            .unwrap_err();

        let errors = validation_errors(err);
        assert_eq!(
            errors,
            vec![
                "Full name is required",
                "Username must be at least 3 characters long",
                "Please enter a valid email address",
                "Password must be at least 6 characters long",
                "Passwords do not match",
                "You must agree to the Terms and Conditions",
            ]
        );
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_confirmation() {
        let (auth, _) = authenticator();
        let mut req = input("bob", "bob@example.com");
        req.confirm_password = "Hammer43".into();

        let errors = validation_errors(auth.register(req).await.unwrap_err());
        assert_eq!(errors, vec!["Passwords do not match"]);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username_and_email() {
        let (auth, _) = authenticator();

        let errors = validation_errors(
            auth.register(input("ALICE", "ALICE@example.com"))
                .await
                .unwrap_err(),
        );
        assert_eq!(
            errors,
            vec!["Username already exists", "Email address already registered"]
        );
    }

    #[tokio::test]
    async fn test_register_requires_password() {
        let (auth, _) = authenticator();
        let mut req = input("bob", "bob@example.com");
        req.password = String::new();
        req.confirm_password = String::new();

        let errors = validation_errors(auth.register(req).await.unwrap_err());
        assert_eq!(errors, vec!["Password is required"]);
    }

    #[tokio::test]
    async fn test_register_failed_save_is_not_visible() {
        let (auth, repo) = authenticator();
        repo.fail_saves.store(true, Ordering::SeqCst);

        let err = auth.register(input("bob", "bob@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert!(auth.find_user(&UserName::parse("bob").unwrap()).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_rechecks_uniqueness_against_locked_store() {
        let (auth, _) = authenticator();
        let mut store = auth.snapshot().await;

        // Registered between the snapshot and the lock
        let mut late = alice();
        late.username = UserName::parse("alice_2").unwrap();
        let errors = validation_errors(insert_new_user(&mut store, late).unwrap_err());
        assert_eq!(errors, vec!["Email address already registered"]);
        assert_eq!(store.len(), 1);

        let mut same_name = alice();
        same_name.email = Some(Email::new("other@example.com").unwrap());
        assert!(matches!(
            insert_new_user(&mut store, same_name),
            Err(AuthError::DuplicateUser)
        ));
    }
}
