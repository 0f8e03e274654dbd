//! HTTP Handlers

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use platform::cookie::{extract_cookie, to_header_value};

use crate::application::{Authenticator, ChangePasswordInput, SignInInput, SignUpInput};
use crate::domain::entity::session::Session;
use crate::domain::repository::CredentialRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest,
    RegisterResponse, SessionStatusResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    pub auth: Arc<Authenticator<R>>,
}

// Derive would require `R: Clone`
impl<R> Clone for AuthAppState<R>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    pub fn new(auth: Arc<Authenticator<R>>) -> Self {
        Self { auth }
    }

    fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, self.auth.cookie_settings().name())
    }

    fn set_cookie(&self, token: &str) -> [(header::HeaderName, header::HeaderValue); 1] {
        let cookie = self.auth.cookie_config().build_set_cookie(token);
        [(header::SET_COOKIE, to_header_value(&cookie))]
    }

    fn clear_cookie(&self) -> [(header::HeaderName, header::HeaderValue); 1] {
        let cookie = self.auth.cookie_config().build_delete_cookie();
        [(header::SET_COOKIE, to_header_value(&cookie))]
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let input = SignUpInput {
        name: req.name,
        username: req.username,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
        accept_terms: req.accept_terms,
        auto_login: req.auto_login,
    };

    let output = state.auth.register(input).await?;

    let body = Json(RegisterResponse {
        username: output.user.username.to_string(),
        display_name: output.user.display_name.to_string(),
        authenticated: output.session.is_some(),
    });

    Ok(match output.session {
        Some(issued) => (StatusCode::CREATED, state.set_cookie(&issued.token), body).into_response(),
        None => (StatusCode::CREATED, body).into_response(),
    })
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let issued = state
        .auth
        .login(SignInInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        state.set_cookie(&issued.token),
        Json(LoginResponse::from(&issued.session)),
    ))
}

/// POST /api/auth/logout
///
/// Always succeeds and always clears the cookie.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> impl IntoResponse
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let token = state.session_token(&headers);
    state.auth.logout(token.as_deref());

    (StatusCode::NO_CONTENT, state.clear_cookie())
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let token = state.session_token(&headers);
    let auth_state = state.auth.check(token.as_deref()).await;

    let session = auth_state.session.as_ref();
    Json(SessionStatusResponse {
        status: auth_state.status,
        authenticated: auth_state.is_authenticated(),
        username: session.map(|s| s.username.to_string()),
        display_name: session.map(|s| s.display_name.to_string()),
        expires_at_ms: session.map(Session::expires_at_ms),
    })
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/auth/profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(session): Extension<Session>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let record = state.auth.profile(&session.username).await?;
    Ok(Json(ProfileResponse::from(record)))
}

/// POST /api/auth/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    Extension(session): Extension<Session>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let input = ChangePasswordInput {
        current_password: req.current_password,
        new_password: req.new_password,
        confirm_password: req.confirm_password,
    };
    state.auth.change_password(&session.username, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/auth/profile/picture
///
/// Body is the raw image; `Content-Type` must be `image/png` or `image/jpeg`.
/// Bodies cut off by the route's body limit are reported as `ImageTooLarge`.
pub async fn upload_profile_picture<R>(
    State(state): State<AuthAppState<R>>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> AuthResult<StatusCode>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AuthError::ImageTooLarge {
                max_bytes: state.auth.config().max_profile_picture_bytes,
            }
        } else {
            AuthError::Validation(vec![rejection.body_text()])
        }
    })?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    state
        .auth
        .set_profile_image(&session.username, &body, content_type)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
