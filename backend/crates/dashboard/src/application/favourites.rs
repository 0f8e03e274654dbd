//! Favourites Use Cases
//!
//! Load, add and remove favourite tickers. Each mutation is persisted
//! before it returns; concurrent writes for the same user are not
//! coordinated and the last writer wins.

use std::sync::Arc;

use auth::models::UserName;

use crate::domain::entity::favourites::FavouritesList;
use crate::domain::repository::FavouritesRepository;
use crate::domain::value_object::ticker::Ticker;
use crate::error::DashboardResult;

pub struct FavouritesService<F>
where
    F: FavouritesRepository,
{
    repo: Arc<F>,
}

impl<F> FavouritesService<F>
where
    F: FavouritesRepository,
{
    pub fn new(repo: Arc<F>) -> Self {
        Self { repo }
    }

    pub async fn load(&self, username: &UserName) -> DashboardResult<FavouritesList> {
        self.repo.load(username).await
    }

    /// Add a ticker; no-op (and no write) if already present
    pub async fn add(&self, username: &UserName, ticker: Ticker) -> DashboardResult<FavouritesList> {
        let mut favourites = self.repo.load(username).await?;
        if favourites.add(ticker.clone()) {
            self.repo.save(username, &favourites).await?;
            tracing::info!(username = %username, ticker = %ticker, "Favourite added");
        }
        Ok(favourites)
    }

    /// Remove a ticker; no-op (and no write) if absent
    pub async fn remove(
        &self,
        username: &UserName,
        ticker: &Ticker,
    ) -> DashboardResult<FavouritesList> {
        let mut favourites = self.repo.load(username).await?;
        if favourites.remove(ticker) {
            self.repo.save(username, &favourites).await?;
            tracing::info!(username = %username, ticker = %ticker, "Favourite removed");
        }
        Ok(favourites)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct MemoryRepo {
        lists: Mutex<HashMap<UserName, FavouritesList>>,
        saves: AtomicUsize,
    }

    impl FavouritesRepository for MemoryRepo {
        async fn load(&self, username: &UserName) -> DashboardResult<FavouritesList> {
            Ok(self
                .lists
                .lock()
                .unwrap()
                .get(username)
                .cloned()
                .unwrap_or_default())
        }

        async fn save(&self, username: &UserName, favourites: &FavouritesList) -> DashboardResult<()> {
            self.lists
                .lock()
                .unwrap()
                .insert(username.clone(), favourites.clone());
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn user(name: &str) -> UserName {
        UserName::parse(name).unwrap()
    }

    fn t(s: &str) -> Ticker {
        Ticker::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let repo = Arc::new(MemoryRepo::default());
        let service = FavouritesService::new(repo.clone());
        let alice = user("alice");

        service.add(&alice, t("AAPL")).await.unwrap();
        let list = service.add(&alice, t("TCS.NS")).await.unwrap();
        assert_eq!(list.tickers(), &[t("AAPL"), t("TCS.NS")]);

        let list = service.remove(&alice, &t("AAPL")).await.unwrap();
        assert_eq!(list.tickers(), &[t("TCS.NS")]);
        assert_eq!(service.load(&alice).await.unwrap().tickers(), &[t("TCS.NS")]);
    }

    #[tokio::test]
    async fn test_noops_do_not_write() {
        let repo = Arc::new(MemoryRepo::default());
        let service = FavouritesService::new(repo.clone());
        let alice = user("alice");

        service.add(&alice, t("AAPL")).await.unwrap();
        service.add(&alice, t("AAPL")).await.unwrap();
        service.remove(&alice, &t("MSFT")).await.unwrap();

        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let repo = Arc::new(MemoryRepo::default());
        let service = FavouritesService::new(repo);

        service.add(&user("alice"), t("AAPL")).await.unwrap();
        service.add(&user("bob"), t("MSFT")).await.unwrap();

        assert_eq!(service.load(&user("alice")).await.unwrap().tickers(), &[t("AAPL")]);
        assert_eq!(service.load(&user("bob")).await.unwrap().tickers(), &[t("MSFT")]);
    }
}
