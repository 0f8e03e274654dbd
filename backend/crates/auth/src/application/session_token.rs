//! Session Token
//!
//! Format: `base64url(json claims) "." base64url(hmac_sha256(key, claims_b64))`.
//! Claims carry the session id, user name and issue/expiry times in seconds
//! since the Unix epoch. Tokens are self-contained; revocation is only
//! possible by rotating the key.

use chrono::{DateTime, TimeZone, Utc};
use kernel::id::SessionId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entity::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed session token")]
    Malformed,
    #[error("session token signature mismatch")]
    BadSignature,
    #[error("session token expired")]
    Expired,
}

/// Signed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Session id
    pub sid: String,
    /// User name
    pub sub: String,
    /// Issued at (seconds)
    pub iat: i64,
    /// Expires at (seconds)
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_session(session: &Session) -> Self {
        Self {
            sid: session.session_id.to_string(),
            sub: session.username.to_string(),
            iat: session.created_at.timestamp(),
            exp: session.expires_at.timestamp(),
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.sid.parse().ok()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Sign a session into a cookie value
pub fn issue(session: &Session, key: &[u8]) -> String {
    let claims = SessionClaims::for_session(session);
    // Serializing four plain fields cannot fail
    let json = serde_json::to_vec(&claims).unwrap_or_default();
    let payload = to_base64url(&json);
    let signature = to_base64url(&hmac_sha256(key, payload.as_bytes()));
    format!("{payload}.{signature}")
}

/// Verify signature and expiry
pub fn verify(token: &str, key: &[u8], now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
    let claims = verify_signature(token, key)?;
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}

/// Verify the signature only
///
/// Used on logout, where an expired but authentic token still identifies
/// the session whose state should be dropped.
pub fn verify_signature(token: &str, key: &[u8]) -> Result<SessionClaims, TokenError> {
    let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
    let signature = from_base64url(signature).map_err(|_| TokenError::Malformed)?;

    if !verify_hmac_sha256(key, payload.as_bytes(), &signature) {
        return Err(TokenError::BadSignature);
    }

    let json = from_base64url(payload).map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&json).map_err(|_| TokenError::Malformed)
}
