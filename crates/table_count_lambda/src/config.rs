//! Store connection settings resolved from the environment at process start.

use serde_json::json;
use table_count_core::error::CountError;

pub const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// When set, TLS is required but the server certificate is not
    /// validated, matching the original deployment's insecure SSL mode.
    pub ssl: bool,
}

impl DbConfig {
    /// Resolve the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `CountError::ConfigurationMissing` naming the first absent
    /// required variable. Callers treat this as fatal.
    pub fn from_env() -> Result<Self, CountError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an injectable lookup so tests can
    /// supply values without mutating process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CountError> {
        let config = Self {
            host: required("PG_HOST", lookup("PG_HOST"))?,
            port: parse_port(lookup("PG_PORT"))?,
            database: required("PG_DATABASE", lookup("PG_DATABASE"))?,
            user: required("PG_USER", lookup("PG_USER"))?,
            password: required("PG_PASSWORD", lookup("PG_PASSWORD"))?,
            ssl: lookup("PG_SSL").as_deref() == Some("true"),
        };
        Ok(config)
    }

    /// Log a redacted snapshot of the resolved settings. The password is
    /// never included.
    pub fn log_snapshot(&self) {
        log_config_info(
            "config_resolved",
            json!({
                "host": self.host,
                "port": self.port,
                "database": self.database,
                "user": self.user,
                "ssl": self.ssl,
            }),
        );
    }
}

fn required(name: &str, value: Option<String>) -> Result<String, CountError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CountError::configuration_missing(name))
}

fn parse_port(value: Option<String>) -> Result<u16, CountError> {
    match value {
        None => Ok(DEFAULT_PG_PORT),
        Some(raw) if raw.is_empty() => Ok(DEFAULT_PG_PORT),
        Some(raw) => raw
            .parse()
            .map_err(|_| CountError::configuration_missing("PG_PORT")),
    }
}

fn log_config_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "db_config",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
