//! JSON Favourites Files
//!
//! One pretty-printed JSON array of ticker strings per user, stored as
//! `<dir>/<username>_favourites.json`. User names are restricted to
//! `[a-z0-9_]`, so they are safe as file name components.

use std::path::{Path, PathBuf};

use auth::models::UserName;
use platform::storage::{self, StorageError};

use crate::domain::entity::favourites::FavouritesList;
use crate::domain::repository::FavouritesRepository;
use crate::domain::value_object::ticker::Ticker;
use crate::error::DashboardResult;

#[derive(Debug, Clone)]
pub struct JsonFavouritesDir {
    dir: PathBuf,
}

impl JsonFavouritesDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, username: &UserName) -> PathBuf {
        self.dir.join(format!("{username}_favourites.json"))
    }
}

/// Parse a favourites file
///
/// Anything that is not an array of strings yields an empty list; invalid
/// symbols inside a valid array are skipped.
fn parse(path: &Path, bytes: &[u8]) -> FavouritesList {
    let raw: Vec<serde_json::Value> = match serde_json::from_slice(bytes) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "Favourites file is not a JSON array, treating as empty");
            return FavouritesList::new();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed favourites file, treating as empty");
            return FavouritesList::new();
        }
    };

    let tickers = raw.into_iter().filter_map(|item| {
        let parsed = item.as_str().map(Ticker::parse);
        match parsed {
            Some(Ok(ticker)) => Some(ticker),
            _ => {
                tracing::warn!(path = %path.display(), entry = %item, "Skipping invalid favourites entry");
                None
            }
        }
    });

    FavouritesList::from_tickers(tickers)
}

impl FavouritesRepository for JsonFavouritesDir {
    async fn load(&self, username: &UserName) -> DashboardResult<FavouritesList> {
        let path = self.path_for(username);
        match storage::read_optional(&path).await {
            Ok(Some(bytes)) => Ok(parse(&path, &bytes)),
            Ok(None) => Ok(FavouritesList::new()),
            // Only a missing file means "no favourites yet"
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, username: &UserName, favourites: &FavouritesList) -> DashboardResult<()> {
        let path = self.path_for(username);
        let json = serde_json::to_vec_pretty(favourites.tickers())
            .map_err(|e| StorageError::encode(&path, e))?;
        storage::write_atomic(&path, &json).await?;

        tracing::debug!(path = %path.display(), count = favourites.len(), "Favourites saved");
        Ok(())
    }
}
