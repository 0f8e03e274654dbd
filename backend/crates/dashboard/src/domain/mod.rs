//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{DashboardState, DashboardStatePatch, FavouritesList};
pub use repository::FavouritesRepository;
pub use value_object::Ticker;
