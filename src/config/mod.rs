//! Configuration module - environment variable parsing
//!
//! Only session/ambient settings live here; gameplay values are
//! compile-time constants in `game::tuning`.

use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Arena width in pixels, fixed for the session
    pub arena_width: f32,
    /// Arena height in pixels, fixed for the session
    pub arena_height: f32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            arena_width: parse_dimension("ARENA_WIDTH", 1920.0)?,
            arena_height: parse_dimension("ARENA_HEIGHT", 1080.0)?,
        })
    }
}

fn parse_dimension(key: &'static str, default: f32) -> Result<f32, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            let value: f32 = raw.parse().map_err(|_| ConfigError::Invalid(key))?;
            if value < 600.0 {
                return Err(ConfigError::Invalid(key));
            }
            Ok(value)
        }
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
