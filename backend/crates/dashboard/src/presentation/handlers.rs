//! HTTP Handlers

use std::sync::Arc;

use auth::Session;
use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::application::{FavouritesService, SessionStateStore};
use crate::domain::entity::dashboard_state::{DashboardState, DashboardStatePatch};
use crate::domain::repository::FavouritesRepository;
use crate::domain::value_object::ticker::Ticker;
use crate::error::DashboardResult;
use crate::presentation::dto::{AddFavouriteRequest, FavouritesResponse};

/// Shared state for dashboard handlers
pub struct DashboardAppState<F>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    pub favourites: Arc<FavouritesService<F>>,
    pub states: Arc<SessionStateStore>,
}

// Derive would require `F: Clone`
impl<F> Clone for DashboardAppState<F>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            favourites: self.favourites.clone(),
            states: self.states.clone(),
        }
    }
}

// ============================================================================
// Favourites
// ============================================================================

/// GET /api/dashboard/favourites
pub async fn list_favourites<F>(
    State(state): State<DashboardAppState<F>>,
    Extension(session): Extension<Session>,
) -> DashboardResult<Json<FavouritesResponse>>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    let list = state.favourites.load(&session.username).await?;
    Ok(Json(FavouritesResponse::from(&list)))
}

/// POST /api/dashboard/favourites
pub async fn add_favourite<F>(
    State(state): State<DashboardAppState<F>>,
    Extension(session): Extension<Session>,
    Json(req): Json<AddFavouriteRequest>,
) -> DashboardResult<Json<FavouritesResponse>>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    let ticker = Ticker::parse(&req.ticker)?;
    let list = state.favourites.add(&session.username, ticker).await?;
    Ok(Json(FavouritesResponse::from(&list)))
}

/// DELETE /api/dashboard/favourites/{ticker}
pub async fn remove_favourite<F>(
    State(state): State<DashboardAppState<F>>,
    Extension(session): Extension<Session>,
    Path(ticker): Path<String>,
) -> DashboardResult<Json<FavouritesResponse>>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    let ticker = Ticker::parse(&ticker)?;
    let list = state.favourites.remove(&session.username, &ticker).await?;
    Ok(Json(FavouritesResponse::from(&list)))
}

// ============================================================================
// Dashboard State
// ============================================================================

/// GET /api/dashboard/state
pub async fn get_state<F>(
    State(state): State<DashboardAppState<F>>,
    Extension(session): Extension<Session>,
) -> Json<DashboardState>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    Json(state.states.get(&session))
}

/// PUT /api/dashboard/state
pub async fn update_state<F>(
    State(state): State<DashboardAppState<F>>,
    Extension(session): Extension<Session>,
    Json(patch): Json<DashboardStatePatch>,
) -> Json<DashboardState>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    Json(state.states.update(&session, patch))
}

/// DELETE /api/dashboard/state
pub async fn reset_state<F>(
    State(state): State<DashboardAppState<F>>,
    Extension(session): Extension<Session>,
) -> Json<DashboardState>
where
    F: FavouritesRepository + Send + Sync + 'static,
{
    Json(state.states.reset(&session))
}
