//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::domain::HashSettings;

use super::constants::{
    DEFAULT_ALLOWED_ORIGINS, DEFAULT_DATABASE_URL, DEFAULT_HASH_ITERATIONS,
    DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_PARALLELISM, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_STORAGE_TIMEOUT_SECONDS,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Origins allowed to call the API cross-origin
    pub allowed_origins: Vec<String>,
    /// Deadline for a single storage round-trip
    pub storage_timeout: Duration,
    /// Credential hasher work factor
    pub hash_settings: HashSettings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("allowed_origins", &self.allowed_origins)
            .field("storage_timeout", &self.storage_timeout)
            .field("hash_settings", &self.hash_settings)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGINS.to_string()],
            storage_timeout: Duration::from_secs(DEFAULT_STORAGE_TIMEOUT_SECONDS),
            hash_settings: HashSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.allowed_origins),
            storage_timeout: env::var("STORAGE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.storage_timeout),
            hash_settings: HashSettings {
                memory_kib: env::var("HASH_MEMORY_KIB")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_HASH_MEMORY_KIB),
                iterations: env::var("HASH_ITERATIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_HASH_ITERATIONS),
                parallelism: env::var("HASH_PARALLELISM")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_HASH_PARALLELISM),
            },
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
