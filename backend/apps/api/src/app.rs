//! Application Assembly
//!
//! Wires the credential store, the per-session dashboard state and the
//! favourites directory into one router.

use std::sync::Arc;
use std::time::Duration;

use auth::{AuthAppState, Authenticator, YamlCredentialFile, auth_router};
use axum::{
    Router,
    http::{self, Method, header},
};
use dashboard::{
    DashboardAppState, FavouritesService, JsonFavouritesDir, SessionStateStore, dashboard_router,
};
use tokio::task::JoinHandle;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Everything the server needs once startup succeeded
pub struct App {
    pub auth: Arc<Authenticator<YamlCredentialFile>>,
    pub states: Arc<SessionStateStore>,
    pub favourites: Arc<FavouritesService<JsonFavouritesDir>>,
}

impl App {
    /// Load the credential document and build the services
    ///
    /// A missing or malformed credential document aborts startup.
    pub async fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let file = Arc::new(YamlCredentialFile::new(&config.credentials_path));
        let states = Arc::new(SessionStateStore::new());

        let auth = Authenticator::open(file, Arc::new(config.auth_config()))
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "cannot load credentials from {}: {e}",
                    config.credentials_path.display()
                )
            })?
            .with_observer(states.clone());

        let favourites = Arc::new(FavouritesService::new(Arc::new(JsonFavouritesDir::new(
            &config.favourites_dir,
        ))));

        Ok(Self {
            auth: Arc::new(auth),
            states,
            favourites,
        })
    }

    /// API routes without the outer HTTP layers
    pub fn routes(&self) -> Router {
        let auth_state = AuthAppState::new(self.auth.clone());
        let dashboard_state = DashboardAppState {
            favourites: self.favourites.clone(),
            states: self.states.clone(),
        };

        Router::new()
            .nest("/api/auth", auth_router(auth_state.clone()))
            .nest(
                "/api/dashboard",
                dashboard_router(dashboard_state, auth_state),
            )
    }

    /// Full router with tracing and CORS
    pub fn router(&self, config: &AppConfig) -> Router {
        self.routes()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.frontend_origins))
    }

    /// Periodically drop dashboard state whose session has expired
    pub fn spawn_state_purge(&self, every: Duration) -> JoinHandle<()> {
        let states = self.states.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = states.purge_expired(chrono::Utc::now());
                if purged > 0 {
                    tracing::debug!(purged, "Expired dashboard state dropped");
                }
            }
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use auth::domain::repository::CredentialRepository;
    use auth::models::{CookieSettings, CredentialStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        let credentials_path = dir.path().join("config.yaml");
        let store = CredentialStore::new(
            CookieSettings::new("stock_dashboard", "0123456789abcdef0123", 30).unwrap(),
        );
        YamlCredentialFile::new(&credentials_path)
            .save(&store)
            .await
            .unwrap();

        AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            credentials_path,
            favourites_dir: dir.path().join("user_favourites"),
            profile_pics_dir: dir.path().join("profile_pics"),
            cookie_secure: false,
            frontend_origins: vec!["http://localhost:40922".into()],
            password_pepper: None,
        }
    }

    fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_open_fails_without_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir).await;
        config.credentials_path = dir.path().join("missing.yaml");

        assert!(App::open(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_register_then_use_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir).await;
        let app = App::open(&config).await.unwrap();
        let router = app.router(&config);

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({
                    "name": "Alice Liddell",
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": "Wonder123",
                    "confirmPassword": "Wonder123",
                    "acceptTerms": true,
                    "autoLogin": true
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .unwrap()
            .to_string();

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/dashboard/favourites",
                Some(&cookie),
                json!({ "ticker": "infy.ns" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["favourites"][0]["ticker"], "INFY.NS");

        assert!(
            dir.path()
                .join("user_favourites")
                .join("alice_favourites.json")
                .exists()
        );
    }

    #[tokio::test]
    async fn test_dashboard_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir).await;
        let app = App::open(&config).await.unwrap();

        let response = app
            .router(&config)
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard/state")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
