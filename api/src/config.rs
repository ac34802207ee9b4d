//! Environment-driven server configuration.
//!
//! Everything is read once at startup; a malformed value aborts the
//! boot instead of limping along with a default where the operator
//! clearly intended otherwise.

use std::env;

use thiserror::Error;

use bb_core::services::SweeperConfig;
use bb_core::services::TokenServiceConfig;
use bb_infra::DatabaseConfig;

/// Configuration failures surfaced at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    pub database: DatabaseConfig,
    pub token: TokenServiceConfig,
    pub sweeper: SweeperConfig,
}

impl ApiConfig {
    /// Loads configuration from the environment.
    ///
    /// `JWT_SECRET` and `DATABASE_URL` are required; everything else
    /// falls back to a sensible default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_or("SERVER_PORT", 8080)?;

        let database = DatabaseConfig {
            url: required("DATABASE_URL")?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            connect_timeout: parse_or("DATABASE_CONNECT_TIMEOUT", 30)?,
        };

        let token_defaults = TokenServiceConfig::default();
        let token = TokenServiceConfig {
            jwt_secret: required("JWT_SECRET")?,
            access_token_ttl_minutes: parse_or(
                "ACCESS_TOKEN_TTL_MINUTES",
                token_defaults.access_token_ttl_minutes,
            )?,
            refresh_token_ttl_days: parse_or(
                "REFRESH_TOKEN_TTL_DAYS",
                token_defaults.refresh_token_ttl_days,
            )?,
            ..token_defaults
        };

        let sweeper_defaults = SweeperConfig::default();
        let sweeper = SweeperConfig {
            interval_seconds: parse_or(
                "SWEEP_INTERVAL_SECONDS",
                sweeper_defaults.interval_seconds,
            )?,
            enabled: parse_or("SWEEP_ENABLED", sweeper_defaults.enabled)?,
        };

        Ok(Self {
            host,
            port,
            database,
            token,
            sweeper,
        })
    }

    /// Socket address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests share process state; mutate distinct variables only.

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        env::remove_var("BB_TEST_UNSET_PORT");
        let port: u16 = parse_or("BB_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        env::set_var("BB_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16, _> = parse_or("BB_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        env::remove_var("BB_TEST_BAD_PORT");
    }

    #[test]
    fn test_required_missing_is_an_error() {
        env::remove_var("BB_TEST_MISSING_SECRET");
        assert!(required("BB_TEST_MISSING_SECRET").is_err());
    }
}
