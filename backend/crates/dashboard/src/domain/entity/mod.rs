//! Entity Module

pub mod dashboard_state;
pub mod favourites;

pub use dashboard_state::{ChartType, DashboardState, DashboardStatePatch, Period, Theme};
pub use favourites::FavouritesList;
