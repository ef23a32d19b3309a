use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    pub redis_pool_size: u32,
    pub redis_timeout: Duration,
    pub page_default_limit: u64,
    pub page_max_limit: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source; unset keys take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| "redis://localhost:6380".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&lookup, "PORT", 3000)?,
            redis_pool_size: parse(&lookup, "REDIS_POOL_SIZE", 16)?,
            redis_timeout: Duration::from_millis(parse(&lookup, "REDIS_TIMEOUT_MS", 5000)?),
            page_default_limit: parse(&lookup, "PAGE_DEFAULT_LIMIT", 10)?,
            page_max_limit: parse(&lookup, "PAGE_MAX_LIMIT", 100)?,
        };

        if config.redis_pool_size == 0 {
            return Err(invalid("REDIS_POOL_SIZE", "0"));
        }
        if config.page_max_limit == 0 {
            return Err(invalid("PAGE_MAX_LIMIT", "0"));
        }
        if config.page_default_limit == 0 || config.page_default_limit > config.page_max_limit {
            return Err(invalid(
                "PAGE_DEFAULT_LIMIT",
                &config.page_default_limit.to_string(),
            ));
        }
        Ok(config)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| invalid(key, &raw)),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
    }
}
