//! Environment-driven configuration.
//!
//! All settings come from the process environment, optionally seeded from a
//! `.env` file in the working directory. Startup fails fast, naming the
//! offending variable, when a required Postgres parameter is missing or
//! malformed.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `POSTGRES_HOST` | yes | — |
//! | `POSTGRES_USER` | yes | — |
//! | `POSTGRES_PASSWORD` | yes | — |
//! | `POSTGRES_DB` | yes | — |
//! | `POSTGRES_PORT` | no | `5432` |
//! | `ROLODEX_BIND` | no | `127.0.0.1:8080` |
//! | `ROLODEX_MAX_CONNECTIONS` | no | `5` |

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A `.env` file is read first if present; real environment variables
    /// win over it.
    pub fn from_env() -> Result<Config> {
        let _ = dotenvy::dotenv();

        let postgres = PostgresConfig {
            host: require("POSTGRES_HOST")?,
            port: parse_or("POSTGRES_PORT", 5432)?,
            user: require("POSTGRES_USER")?,
            password: require("POSTGRES_PASSWORD")?,
            database: require("POSTGRES_DB")?,
            max_connections: parse_or("ROLODEX_MAX_CONNECTIONS", 5)?,
        };

        let server = ServerConfig {
            bind: optional("ROLODEX_BIND").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
        };

        Ok(Config { postgres, server })
    }
}

fn require(key: &str) -> Result<String> {
    optional(key).with_context(|| format!("missing required environment variable: {}", key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the whole env round-trip: parallel tests mutating the
    // same process environment would race.
    #[test]
    fn test_from_env_round_trip() {
        env::set_var("POSTGRES_HOST", "localhost");
        env::set_var("POSTGRES_USER", "rolodex");
        env::set_var("POSTGRES_PASSWORD", "secret");
        env::set_var("POSTGRES_DB", "contacts");
        env::remove_var("POSTGRES_PORT");
        env::remove_var("ROLODEX_BIND");
        env::remove_var("ROLODEX_MAX_CONNECTIONS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.postgres.host, "localhost");
        assert_eq!(config.postgres.port, 5432);
        assert_eq!(config.postgres.max_connections, 5);
        assert_eq!(config.server.bind, "127.0.0.1:8080");

        env::set_var("POSTGRES_PORT", "6543");
        let config = Config::from_env().unwrap();
        assert_eq!(config.postgres.port, 6543);

        env::set_var("POSTGRES_PORT", "not-a-port");
        assert!(Config::from_env().is_err());
        env::remove_var("POSTGRES_PORT");

        env::remove_var("POSTGRES_DB");
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("POSTGRES_DB"));
        env::set_var("POSTGRES_DB", "contacts");
    }
}
