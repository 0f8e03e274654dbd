//! Environment Configuration Helpers
//!
//! Typed, fail-fast readers for process environment variables. Binaries
//! build their config structs from these at startup.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: String },

    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Read a variable, treating empty values as unset
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read a variable or fall back to `default`
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Read a required variable
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_opt(key).ok_or_else(|| ConfigError::Missing {
        key: key.to_string(),
    })
}

/// Read and parse a variable, falling back to `default` when unset
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

/// Read a boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`)
pub fn env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env_opt(key) {
        Some(raw) => parse_bool(key, &raw),
        None => Ok(default),
    }
}

pub fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

pub fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

/// Split a comma-separated list, dropping empty entries
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("COOKIE_SECURE", "TRUE"), Ok(true));
        assert_eq!(parse_bool("COOKIE_SECURE", " off "), Ok(false));
        assert!(matches!(
            parse_bool("COOKIE_SECURE", "maybe"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_parse_value() {
        let addr: SocketAddr = parse_value("BIND_ADDR", "127.0.0.1:8501").unwrap();
        assert_eq!(addr.port(), 8501);

        let err = parse_value::<SocketAddr>("BIND_ADDR", "localhost").unwrap_err();
        assert!(err.to_string().starts_with("BIND_ADDR has invalid value"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("http://a, ,http://b,"),
            vec!["http://a".to_string(), "http://b".to_string()]
        );
    }

    #[test]
    fn test_unset_variable_uses_default() {
        let key = "PLATFORM_CONFIG_TEST_SURELY_UNSET";
        assert_eq!(env_or(key, "fallback"), "fallback");
        assert_eq!(env_parse(key, 42u16), Ok(42));
        assert_eq!(env_bool(key, true), Ok(true));
        assert!(matches!(env_required(key), Err(ConfigError::Missing { .. })));
    }
}
