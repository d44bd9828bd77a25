//! Server configuration.
//!
//! Connection parameters are read from the environment exactly once at
//! process start and handed to the router as explicit state; nothing in
//! the request path reads the environment.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_PATH: &str = "aero.db";

/// Process-wide configuration, constructed once in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (`AERO_PORT`).
    pub port: u16,
    /// SQLite database file (`AERO_DATABASE_PATH`).
    pub database_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl ServerConfig {
    /// Read configuration from `AERO_PORT` and `AERO_DATABASE_PATH`,
    /// falling back to defaults for anything missing or unparseable.
    pub fn from_env() -> Self {
        let port = match env::var("AERO_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unparseable AERO_PORT, using default");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };
        let database_path = env::var("AERO_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATABASE_PATH));
        Self {
            port,
            database_path,
        }
    }

    /// Configuration pointing at a specific database file, for tests and
    /// embedding.
    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }
}
