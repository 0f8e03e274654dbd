//! Dashboard Router

use auth::domain::repository::CredentialRepository;
use auth::{AuthAppState, require_session};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get},
};

use crate::domain::repository::FavouritesRepository;
use crate::presentation::handlers::{self, DashboardAppState};

/// Create the Dashboard router, to be nested under `/api/dashboard`
///
/// Every route requires a session.
pub fn dashboard_router<F, R>(state: DashboardAppState<F>, auth: AuthAppState<R>) -> Router
where
    F: FavouritesRepository + Send + Sync + 'static,
    R: CredentialRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/favourites",
            get(handlers::list_favourites::<F>).post(handlers::add_favourite::<F>),
        )
        .route("/favourites/{ticker}", delete(handlers::remove_favourite::<F>))
        .route(
            "/state",
            get(handlers::get_state::<F>)
                .put(handlers::update_state::<F>)
                .delete(handlers::reset_state::<F>),
        )
        .route_layer(from_fn_with_state(auth, require_session::<R>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::application::{AuthConfig, Authenticator, SignInInput, SignUpInput};
    use auth::models::{CookieSettings, CredentialStore};
    use auth::YamlCredentialFile;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::application::{FavouritesService, SessionStateStore};
    use crate::infra::json_file::JsonFavouritesDir;

    struct Harness {
        _dir: tempfile::TempDir,
        router: Router,
        auth: Arc<Authenticator<YamlCredentialFile>>,
        states: Arc<SessionStateStore>,
    }

    async fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(
            CookieSettings::new("stock_dashboard", "0123456789abcdef0123", 30).unwrap(),
        );
        let file = Arc::new(YamlCredentialFile::new(dir.path().join("credentials.yaml")));
        let states = Arc::new(SessionStateStore::new());
        let auth = Arc::new(
            Authenticator::with_store(file, Arc::new(AuthConfig::development()), store)
                .with_observer(states.clone()),
        );

        for name in ["alice", "bob"] {
            auth.register(SignUpInput {
                name: name.to_string(),
                username: name.to_string(),
                email: format!("{name}@example.com"),
                password: "Wonder123".into(),
                confirm_password: "Wonder123".into(),
                accept_terms: true,
                auto_login: false,
            })
            .await
            .unwrap();
        }

        let state = DashboardAppState {
            favourites: Arc::new(FavouritesService::new(Arc::new(JsonFavouritesDir::new(
                dir.path().join("user_favourites"),
            )))),
            states: states.clone(),
        };
        let router = dashboard_router(state, AuthAppState::new(auth.clone()));

        Harness {
            _dir: dir,
            router,
            auth,
            states,
        }
    }

    impl Harness {
        async fn cookie(&self, username: &str) -> String {
            let issued = self
                .auth
                .login(SignInInput {
                    username: username.into(),
                    password: "Wonder123".into(),
                })
                .await
                .unwrap();
            format!("stock_dashboard={}", issued.token)
        }

        async fn send(&self, method: &str, uri: &str, cookie: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::COOKIE, cookie);
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => builder.body(Body::empty()),
            }
            .unwrap();

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }
    }

    #[tokio::test]
    async fn test_requires_session() {
        let h = harness().await;
        let (status, _) = h.send("GET", "/favourites", "stock_dashboard=forged", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = h.send("GET", "/state", "", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_favourites_flow() {
        let h = harness().await;
        let alice = h.cookie("alice").await;

        let (status, body) = h.send("GET", "/favourites", &alice, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"favourites": []}));

        h.send("POST", "/favourites", &alice, Some(json!({"ticker": "aapl"}))).await;
        let (status, body) = h
            .send("POST", "/favourites", &alice, Some(json!({"ticker": "reliance.ns"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["favourites"],
            json!([
                {"ticker": "AAPL", "currencySymbol": "$"},
                {"ticker": "RELIANCE.NS", "currencySymbol": "₹"}
            ])
        );

        let (_, body) = h.send("DELETE", "/favourites/AAPL", &alice, None).await;
        assert_eq!(body["favourites"].as_array().unwrap().len(), 1);

        // Another user's list is untouched
        let bob = h.cookie("bob").await;
        let (_, body) = h.send("GET", "/favourites", &bob, None).await;
        assert_eq!(body, json!({"favourites": []}));
    }

    #[tokio::test]
    async fn test_invalid_ticker() {
        let h = harness().await;
        let alice = h.cookie("alice").await;

        let (status, body) = h
            .send("POST", "/favourites", &alice, Some(json!({"ticker": "not a ticker"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_state_flow_and_logout_cleanup() {
        let h = harness().await;
        let alice = h.cookie("alice").await;

        let (_, body) = h.send("GET", "/state", &alice, None).await;
        assert_eq!(body["period"], "1mo");

        let (status, body) = h
            .send(
                "PUT",
                "/state",
                &alice,
                Some(json!({"selectedTicker": "tcs.ns", "period": "1y", "showMovingAverages": true})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selectedTicker"], "TCS.NS");
        assert_eq!(body["period"], "1y");
        assert_eq!(h.states.len(), 1);

        // A second login is a separate session with its own state
        let other = h.cookie("alice").await;
        let (_, body) = h.send("GET", "/state", &other, None).await;
        assert_eq!(body["period"], "1mo");

        let (_, body) = h.send("DELETE", "/state", &alice, None).await;
        assert_eq!(body["period"], "1mo");

        h.send("PUT", "/state", &alice, Some(json!({"theme": "dark"}))).await;
        let token = alice.trim_start_matches("stock_dashboard=");
        h.auth.logout(Some(token));
        assert!(h.states.is_empty());
    }
}
