//! Application Configuration
//!
//! Built once at startup from the environment (after `.env` is loaded).
//! Every value has a development default except the pepper, which is
//! optional.

use std::net::SocketAddr;
use std::path::PathBuf;

use auth::AuthConfig;
use dashboard::DashboardConfig;
use platform::config::{ConfigError, env_bool, env_opt, env_or, parse_value, split_list};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// YAML credential document
    pub credentials_path: PathBuf,
    pub favourites_dir: PathBuf,
    pub profile_pics_dir: PathBuf,
    pub cookie_secure: bool,
    pub frontend_origins: Vec<String>,
    pub password_pepper: Option<Vec<u8>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = parse_value("BIND_ADDR", &env_or("BIND_ADDR", DEFAULT_BIND_ADDR))?;

        Ok(Self {
            bind_addr,
            credentials_path: PathBuf::from(env_or("CREDENTIALS_PATH", "config.yaml")),
            favourites_dir: PathBuf::from(env_or("FAVOURITES_DIR", "user_favourites")),
            profile_pics_dir: PathBuf::from(env_or("PROFILE_PICS_DIR", "profile_pics")),
            // Plain HTTP is only expected in debug builds
            cookie_secure: env_bool("COOKIE_SECURE", !cfg!(debug_assertions))?,
            frontend_origins: split_list(&env_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS)),
            password_pepper: env_opt("PASSWORD_PEPPER").map(String::into_bytes),
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            cookie_secure: self.cookie_secure,
            password_pepper: self.password_pepper.clone(),
            profile_pics_dir: self.profile_pics_dir.clone(),
            ..AuthConfig::default()
        }
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        let defaults = if cfg!(debug_assertions) {
            DashboardConfig::development()
        } else {
            DashboardConfig::default()
        };
        DashboardConfig {
            favourites_dir: self.favourites_dir.clone(),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addr_parses() {
        let addr: SocketAddr = parse_value("BIND_ADDR", DEFAULT_BIND_ADDR).unwrap();
        assert_eq!(addr.port(), 31113);
        assert!(parse_value::<SocketAddr>("BIND_ADDR", "nope").is_err());
    }

    #[test]
    fn test_derived_configs() {
        let config = AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            credentials_path: "config.yaml".into(),
            favourites_dir: "/data/favs".into(),
            profile_pics_dir: "/data/pics".into(),
            cookie_secure: true,
            frontend_origins: vec![],
            password_pepper: Some(b"pepper".to_vec()),
        };

        let auth = config.auth_config();
        assert!(auth.cookie_secure);
        assert_eq!(auth.pepper(), Some(&b"pepper"[..]));
        assert_eq!(auth.profile_pics_dir, PathBuf::from("/data/pics"));

        assert_eq!(
            config.dashboard_config().favourites_dir,
            PathBuf::from("/data/favs")
        );
    }
}
