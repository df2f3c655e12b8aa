//! Runtime configuration read from the environment.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `TODO_STORAGE` | no | `postgres` (or `memory`) |
//! | `TODO_BIND_ADDR` | no | `127.0.0.1:9090` |
//! | `DB_USER`, `DB_PASSWORD`, `DB_NAME` | for `postgres` | |
//! | `DB_HOST` | no | `localhost` |

use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9090";
const DEFAULT_DB_HOST: &str = "localhost";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid TODO_BIND_ADDR '{0}'")]
    InvalidBindAddr(String),

    #[error("unknown TODO_STORAGE '{0}' (expected 'postgres' or 'memory')")]
    UnknownStorage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub name: String,
    pub host: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}?sslmode=disable",
            self.user, self.password, self.host, self.name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Postgres(DatabaseConfig),
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub storage: Storage,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("TODO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind.clone()))?;

        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let storage = match lookup("TODO_STORAGE").as_deref() {
            None | Some("postgres") => Storage::Postgres(DatabaseConfig {
                user: required("DB_USER")?,
                password: required("DB_PASSWORD")?,
                name: required("DB_NAME")?,
                host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            }),
            Some("memory") => Storage::Memory,
            Some(other) => return Err(ConfigError::UnknownStorage(other.to_string())),
        };

        Ok(Self { bind_addr, storage })
    }
}
