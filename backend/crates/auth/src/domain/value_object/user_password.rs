//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Policy failures surface as
//! plain messages so registration can collect them with other field errors.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("Wonder123".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use std::fmt;
use std::sync::OnceLock;

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};

/// Well-formed Argon2id hash that matches no password
///
/// Verified against when the user does not exist, so unknown users cost the
/// same as wrong passwords.
const DUMMY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$2BtVhedWfBG0hIjUfB7VGg$QvDjca34tzBXP0RDxUeWTilJHXsoAwY5S2xE1Mz9Tdo";

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// New password for storage; enforces the password policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    /// Submitted password for a login or current-password check
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Policy check for a password wrapped with [`RawPassword::for_verification`]
    pub fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        self.0.check_policy()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constant-time comparison, used for the confirmation field
    pub fn matches(&self, other: &RawPassword) -> bool {
        self.0.matches(&other.0)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash as stored in the credential document
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper).map(Self)
    }

    /// Parse a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    /// Hash used for timing equalization on unknown users
    pub fn dummy() -> &'static UserPassword {
        static DUMMY: OnceLock<UserPassword> = OnceLock::new();
        DUMMY.get_or_init(|| {
            Self(HashedPassword::from_phc_string(DUMMY_PHC).expect("dummy PHC string is valid"))
        })
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `pepper` must match the one used when hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
