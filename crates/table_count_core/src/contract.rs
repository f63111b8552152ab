use serde::{Deserialize, Serialize};

/// Table queried when the invocation carries no `tableName` parameter.
pub const DEFAULT_TABLE_NAME: &str = "mi_tabla";

/// Message returned for every failed invocation. All error kinds collapse
/// into this one string at the entry-point boundary; nothing about the
/// underlying failure is disclosed to the caller.
pub const GENERIC_ERROR_MESSAGE: &str = "Error al obtener el count";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn generic() -> Self {
        Self {
            error: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
