//! Auth Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::domain::repository::CredentialRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router, to be nested under `/api/auth`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: CredentialRepository + Send + Sync + 'static,
{
    let picture_limit = state.auth.config().max_profile_picture_bytes;

    let protected = Router::new()
        .route("/profile", get(handlers::profile::<R>))
        .route("/password", post(handlers::change_password::<R>))
        .route(
            "/profile/picture",
            put(handlers::upload_profile_picture::<R>).layer(DefaultBodyLimit::max(picture_limit)),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session::<R>));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/status", get(handlers::session_status::<R>))
        .merge(protected)
        .with_state(state)
}
