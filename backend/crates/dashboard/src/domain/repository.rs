//! Repository Traits

use auth::models::UserName;

use crate::domain::entity::favourites::FavouritesList;
use crate::error::DashboardResult;

/// Per-user favourites persistence
#[trait_variant::make(FavouritesRepository: Send)]
pub trait LocalFavouritesRepository {
    /// Stored list, or empty when there is none
    async fn load(&self, username: &UserName) -> DashboardResult<FavouritesList>;

    /// Replace the stored list
    async fn save(&self, username: &UserName, favourites: &FavouritesList) -> DashboardResult<()>;
}
