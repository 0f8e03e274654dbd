//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the auth and dashboard contexts:
//! - Unified error type ([`error::app_error::AppError`]) and result alias
//! - Error classification mapped onto HTTP status codes
//! - Typed identifiers
//!
//! Only things with the same meaning in every context belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
