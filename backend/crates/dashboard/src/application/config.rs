//! Application Configuration

use std::path::PathBuf;
use std::time::Duration;

/// Dashboard application configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory holding `<username>_favourites.json` files
    pub favourites_dir: PathBuf,
    /// How often expired session state is dropped
    pub state_purge_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            favourites_dir: PathBuf::from("user_favourites"),
            state_purge_interval: Duration::from_secs(15 * 60),
        }
    }
}

impl DashboardConfig {
    /// Shorter purge cycle for local development
    pub fn development() -> Self {
        Self {
            state_purge_interval: Duration::from_secs(60),
            ..Default::default()
        }
    }
}
