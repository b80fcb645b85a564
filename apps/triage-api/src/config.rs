//! Service configuration
//!
//! All settings come from environment variables with sensible defaults,
//! so the binary runs out of the box against a local SQLite file.

use common_db::DbConfig;

/// Runtime configuration of the web service
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Database settings
    pub db: DbConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db: DbConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the environment
    ///
    /// Recognized variables: TRIAGE_HOST, TRIAGE_PORT, TRIAGE_DB_PATH,
    /// TRIAGE_DB_MAX_CONNECTIONS. Unset or unparsable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("TRIAGE_HOST").unwrap_or(defaults.host);
        let port = std::env::var("TRIAGE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let db_path = std::env::var("TRIAGE_DB_PATH").unwrap_or(defaults.db.db_path);
        let max_connections = std::env::var("TRIAGE_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.db.max_connections);

        Self {
            host,
            port,
            db: DbConfig {
                db_path,
                max_connections,
            },
        }
    }
}
