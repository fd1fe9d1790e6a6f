use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 1800;
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the engine runs with the in-memory content cache.
    pub redis_url: Option<String>,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            redis_url: std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty()),
            cache_ttl_secs: parse_env("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            cache_capacity: parse_env("CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }
}

/// Tunables the engine itself reads.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub cache_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
