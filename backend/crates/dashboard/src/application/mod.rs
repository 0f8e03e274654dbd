//! Application Layer

pub mod config;
pub mod favourites;
pub mod session_state;

pub use config::DashboardConfig;
pub use favourites::FavouritesService;
pub use session_state::SessionStateStore;
