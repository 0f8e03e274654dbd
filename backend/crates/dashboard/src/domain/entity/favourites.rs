//! Favourites List Entity

use crate::domain::value_object::ticker::Ticker;

/// A user's favourite tickers, in insertion order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouritesList {
    tickers: Vec<Ticker>,
}

impl FavouritesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored tickers, keeping the first occurrence of each
    pub fn from_tickers(tickers: impl IntoIterator<Item = Ticker>) -> Self {
        let mut list = Self::new();
        for ticker in tickers {
            list.add(ticker);
        }
        list
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.tickers.contains(ticker)
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Append; returns false if already present
    pub fn add(&mut self, ticker: Ticker) -> bool {
        if self.contains(&ticker) {
            return false;
        }
        self.tickers.push(ticker);
        true
    }

    /// Remove; returns false if absent
    pub fn remove(&mut self, ticker: &Ticker) -> bool {
        let before = self.tickers.len();
        self.tickers.retain(|t| t != ticker);
        self.tickers.len() != before
    }
}
