//! Resolver configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local runs. Every setting has a default, so
//! an empty environment gives a working configuration.

use crate::models::zone::DEFAULT_ORDER_PRICE;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Resolver configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON export of the zone table read by the CLI
    pub zones_file: PathBuf,
    /// How long a parsed polygon set stays valid
    pub cache_ttl: Duration,
    /// Upper bound on a single zone store read
    pub store_timeout: Duration,
    /// Minimum order sum quoted when a point has no available zone
    pub default_min_order: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zones_file: PathBuf::from("data/zones.json"),
            cache_ttl: Duration::from_secs(3 * 60 * 60),
            store_timeout: Duration::from_millis(5000),
            default_min_order: DEFAULT_ORDER_PRICE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let zones_file = env::var("ZONES_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.zones_file);

        let cache_ttl_secs = parse_setting(
            "ZONE_CACHE_TTL_SECS",
            env::var("ZONE_CACHE_TTL_SECS").ok(),
            defaults.cache_ttl.as_secs(),
        )?;

        let store_timeout_ms = parse_setting(
            "ZONE_STORE_TIMEOUT_MS",
            env::var("ZONE_STORE_TIMEOUT_MS").ok(),
            defaults.store_timeout.as_millis() as u64,
        )?;
        if store_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "ZONE_STORE_TIMEOUT_MS",
                value: "0".to_string(),
            });
        }

        let default_min_order = parse_setting(
            "DEFAULT_MIN_ORDER",
            env::var("DEFAULT_MIN_ORDER").ok(),
            defaults.default_min_order,
        )?;

        Ok(Self {
            zones_file,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            store_timeout: Duration::from_millis(store_timeout_ms),
            default_min_order,
        })
    }
}

fn parse_setting<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("ZONES_FILE", "tests/fixtures/legacy_zones.json");
        env::set_var("ZONE_CACHE_TTL_SECS", "60");
        env::set_var("ZONE_STORE_TIMEOUT_MS", "250");
        env::set_var("DEFAULT_MIN_ORDER", "650");

        let config = Config::from_env();

        for name in [
            "ZONES_FILE",
            "ZONE_CACHE_TTL_SECS",
            "ZONE_STORE_TIMEOUT_MS",
            "DEFAULT_MIN_ORDER",
        ] {
            env::remove_var(name);
        }

        let config = config.expect("Config should load");
        assert_eq!(config.zones_file, PathBuf::from("tests/fixtures/legacy_zones.json"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.store_timeout, Duration::from_millis(250));
        assert_eq!(config.default_min_order, 650);
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting("X", None, 5u64).unwrap(), 5);
        assert_eq!(parse_setting("X", Some(" 42 ".to_string()), 5u64).unwrap(), 42);
        assert!(matches!(
            parse_setting("X", Some("soon".to_string()), 5u64),
            Err(ConfigError::Invalid { name: "X", .. })
        ));
    }
}
