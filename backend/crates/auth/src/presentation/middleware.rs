//! Auth Middleware
//!
//! Restores the session from the cookie on protected routes and hands it to
//! handlers as an `Extension<Session>`.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;

use crate::domain::repository::CredentialRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid session
///
/// Rejects with 401 problem JSON when the cookie is missing, forged,
/// expired, or names a user that no longer exists.
pub async fn require_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let cookie_name = state.auth.cookie_settings().name();
    let token = extract_cookie(req.headers(), cookie_name).ok_or(AuthError::SessionInvalid)?;

    let session = state
        .auth
        .restore(&token)
        .await
        .ok_or(AuthError::SessionInvalid)?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
