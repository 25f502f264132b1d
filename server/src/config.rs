//! Configuration management for the server.

use shelf_engine::{generate, import, query};
use std::env;
use std::str::FromStr;

/// Default request body limit for CSV uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default ceiling on records per generate request.
pub const DEFAULT_MAX_SYNTHETIC_COUNT: usize = 1_000_000;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Records per rendered page
    pub page_size: usize,
    /// Records generated when a request names no count
    pub synthetic_count: usize,
    /// Largest count a generate request may ask for
    pub max_synthetic_count: usize,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
    /// Download name used when an export request names none
    pub export_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            page_size: query::DEFAULT_PAGE_SIZE,
            synthetic_count: generate::DEFAULT_SYNTHETIC_COUNT,
            max_synthetic_count: DEFAULT_MAX_SYNTHETIC_COUNT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            export_filename: import::DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
            None => defaults.port,
        };

        let page_size = parse_number(&lookup, "PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        let synthetic_count = parse_number(&lookup, "SYNTHETIC_COUNT", defaults.synthetic_count)?;
        let max_synthetic_count =
            parse_number(&lookup, "MAX_SYNTHETIC_COUNT", defaults.max_synthetic_count)?;
        if synthetic_count > max_synthetic_count {
            return Err(ConfigError::SyntheticCountAboveMax {
                count: synthetic_count,
                max: max_synthetic_count,
            });
        }
        let max_upload_bytes =
            parse_number(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?;

        let export_filename = lookup("EXPORT_FILENAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.export_filename);

        Ok(Self {
            host,
            port,
            page_size,
            synthetic_count,
            max_synthetic_count,
            max_upload_bytes,
            export_filename,
        })
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("PAGE_SIZE must be at least 1")]
    InvalidPageSize,

    #[error("SYNTHETIC_COUNT {count} exceeds MAX_SYNTHETIC_COUNT {max}")]
    SyntheticCountAboveMax { count: usize, max: usize },

    #[error("Invalid {key} value: {value}")]
    InvalidNumber { key: &'static str, value: String },
}
