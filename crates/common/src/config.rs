use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    /// Full connection URL; takes precedence over the individual parts
    pub url_override: Option<String>,
}

impl DatabaseConfig {
    /// Build database URL from configuration
    pub fn url(&self) -> String {
        if let Some(url) = &self.url_override {
            return url.clone();
        }

        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "catalog".to_string(),
            max_connections: 10,
            url_override: None,
        }
    }
}

/// Where records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" => Ok(StorageBackend::Postgres),
            _ => Err(ConfigError::InvalidValue {
                key: "STORAGE_BACKEND".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Where cached query results live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Redis,
}

impl FromStr for CacheBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(ConfigError::InvalidValue {
                key: "CACHE_BACKEND".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    pub ttl_seconds: u64,
    /// Entry cap for the in-memory backend
    pub max_entries: usize,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            redis_url: "redis://localhost:6379".to_string(),
            ttl_seconds: 300,
            max_entries: 10_000,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub storage: StorageBackend,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub event_cadence_ms: u64,
    pub seed_data: bool,
    pub log_level: String,
    pub enable_jaeger: bool,
    pub jaeger_endpoint: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Numbers and flags that fail to
    /// parse keep their defaults, as do zero durations and capacities;
    /// unknown backend names are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.storage,
        };
        let cache_backend = match lookup("CACHE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.cache.backend,
        };

        Ok(Self {
            port: parse_var(&lookup, "PORT").unwrap_or(defaults.port),
            storage,
            database: DatabaseConfig {
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                url_override: lookup("DATABASE_URL"),
                ..defaults.database
            },
            cache: CacheConfig {
                backend: cache_backend,
                redis_url: lookup("REDIS_URL").unwrap_or(defaults.cache.redis_url),
                ttl_seconds: parse_positive(&lookup, "CACHE_TTL_SECONDS").unwrap_or(defaults.cache.ttl_seconds),
                max_entries: parse_positive(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(defaults.cache.max_entries),
            },
            event_cadence_ms: parse_positive(&lookup, "EVENT_CADENCE_MS").unwrap_or(defaults.event_cadence_ms),
            seed_data: parse_var(&lookup, "SEED_DATA").unwrap_or(defaults.seed_data),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            enable_jaeger: parse_var(&lookup, "ENABLE_JAEGER").unwrap_or(defaults.enable_jaeger),
            jaeger_endpoint: lookup("JAEGER_ENDPOINT"),
        })
    }

    pub fn event_cadence(&self) -> Duration {
        Duration::from_millis(self.event_cadence_ms)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|value| value.parse().ok())
}

/// Like `parse_var`, but zero counts as unset
fn parse_positive<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr + Default + PartialEq,
    F: Fn(&str) -> Option<String>,
{
    parse_var(lookup, key).filter(|value: &T| *value != T::default())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            storage: StorageBackend::Memory,
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            event_cadence_ms: 1000,
            seed_data: false,
            log_level: "info".to_string(),
            enable_jaeger: false,
            jaeger_endpoint: None,
        }
    }
}
