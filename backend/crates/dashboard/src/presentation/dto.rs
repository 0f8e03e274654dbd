//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::favourites::FavouritesList;
use crate::domain::value_object::ticker::Ticker;

/// Add favourite request
#[derive(Debug, Clone, Deserialize)]
pub struct AddFavouriteRequest {
    pub ticker: String,
}

/// One favourite with its display currency
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteItem {
    pub ticker: String,
    pub currency_symbol: &'static str,
}

impl From<&Ticker> for FavouriteItem {
    fn from(ticker: &Ticker) -> Self {
        Self {
            ticker: ticker.to_string(),
            currency_symbol: ticker.currency_symbol(),
        }
    }
}

/// Favourites list response
#[derive(Debug, Clone, Serialize)]
pub struct FavouritesResponse {
    pub favourites: Vec<FavouriteItem>,
}

impl From<&FavouritesList> for FavouritesResponse {
    fn from(list: &FavouritesList) -> Self {
        Self {
            favourites: list.tickers().iter().map(FavouriteItem::from).collect(),
        }
    }
}
