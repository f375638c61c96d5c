// institute-mirror/crates/institute-mirror/src/config.rs

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_DB_PATH: &str = "data/institute-mirror.sqlite3";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            warn!("Failed to load .env file: {}. Using system environment variables.", e);
        } else {
            info!("Loaded environment variables from .env file");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("MIRROR_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let pool_size: u32 = match lookup("MIRROR_POOL_SIZE") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MIRROR_POOL_SIZE is not a number: {raw:?}"))?,
            None => DEFAULT_POOL_SIZE,
        };
        if pool_size == 0 {
            return Err(anyhow::anyhow!("MIRROR_POOL_SIZE must be at least 1"));
        }

        let busy_timeout_ms: u64 = match lookup("MIRROR_BUSY_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MIRROR_BUSY_TIMEOUT_MS is not a number: {raw:?}"))?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        Ok(Self {
            db_path,
            pool_size,
            busy_timeout_ms,
        })
    }

    pub fn print_config(&self) {
        info!("Current Configuration:");
        info!("- Database Path: {}", self.db_path.display());
        info!("- Pool Size: {}", self.pool_size);
        info!("- Busy Timeout: {}ms", self.busy_timeout_ms);
    }
}
