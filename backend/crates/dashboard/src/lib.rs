//! Dashboard Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Tickers, favourites, dashboard view state
//! - `application/` - Favourites service and the session state store
//! - `infra/` - Per-user JSON favourites files
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! All routes run behind the auth crate's session middleware and receive
//! the restored [`auth::Session`] explicitly.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{DashboardConfig, FavouritesService, SessionStateStore};
pub use error::{DashboardError, DashboardResult};
pub use infra::json_file::JsonFavouritesDir;
pub use presentation::{DashboardAppState, dashboard_router};
