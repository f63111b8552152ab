//! Postgres-backed implementation of the count repository port.

use serde_json::json;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use table_count_core::error::CountError;
use table_count_core::service::CountRepository;

use crate::config::DbConfig;

const MAX_POOL_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT_SECONDS: u64 = 5;

pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CountRepository for PostgresRepository {
    async fn get_count(&self, table_name: &str) -> Result<i64, CountError> {
        let query = count_query(table_name);
        sqlx::query_scalar::<_, i64>(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_store_error)
    }
}

/// Build the count statement. Postgres cannot bind identifiers as query
/// parameters, so the table name is interpolated into the statement text
/// as-is; callers are trusted with the identifier they supply.
pub fn count_query(table_name: &str) -> String {
    format!("SELECT COUNT(*) FROM {table_name}")
}

/// Create the process-wide pool. Connections are established lazily, so
/// this never fails; connectivity problems surface on first query and in
/// the startup probe.
pub fn create_pool(config: &DbConfig) -> PgPool {
    let ssl_mode = if config.ssl {
        // TLS is required but the certificate chain is not verified,
        // matching the original deployment's `rejectUnauthorized: false`.
        PgSslMode::Require
    } else {
        PgSslMode::Prefer
    };

    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password)
        .ssl_mode(ssl_mode);

    PgPoolOptions::new()
        .max_connections(MAX_POOL_CONNECTIONS)
        .acquire_timeout(std::time::Duration::from_secs(ACQUIRE_TIMEOUT_SECONDS))
        .connect_lazy_with(options)
}

/// Acquire and release one connection, logging the outcome. Diagnostic
/// only: a failed probe does not abort startup, the original behaved the
/// same way.
pub async fn probe_pool(pool: &PgPool) {
    match pool.acquire().await {
        Ok(_connection) => log_pool_info("connection_test_succeeded", json!({})),
        Err(error) => log_pool_error(
            "connection_test_failed",
            json!({ "error": error.to_string() }),
        ),
    }
}

fn classify_store_error(error: sqlx::Error) -> CountError {
    match &error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => CountError::store_connection_failed(error.to_string()),
        _ => CountError::store_query_failed(error.to_string()),
    }
}

fn log_pool_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "db_pool",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_pool_error(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "db_pool",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
