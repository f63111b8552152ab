//! Entry-point adapter: translates an API Gateway invocation into a
//! service call and the result back into a platform response.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use table_count_core::contract::{CountResponse, ErrorResponse, DEFAULT_TABLE_NAME};
use table_count_core::service::{CountRepository, CountService};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Handle one invocation. This is the single catch boundary: every failure
/// below it collapses into one generic 500 response, and no error escapes.
pub async fn handle_count_event(
    event: Value,
    service: &CountService<impl CountRepository>,
) -> ApiGatewayResponse {
    let table_name = resolve_table_name(&event);
    log_handler_info("count_requested", json!({ "table_name": table_name }));

    match service.execute(&table_name).await {
        Ok(count) => {
            log_handler_info(
                "count_resolved",
                json!({ "table_name": table_name, "count": count }),
            );
            success_response(CountResponse { count })
        }
        Err(error) => {
            log_handler_error(
                "count_failed",
                json!({ "table_name": table_name, "error": error.message() }),
            );
            failure_response()
        }
    }
}

/// Resolve the table identifier from the invocation record. Both event
/// shapes observed in production are accepted: an API Gateway
/// `queryStringParameters` map and a bare top-level `tableName` key from
/// direct invocations. Blank values count as absent; the fixed fallback
/// applies last.
fn resolve_table_name(event: &Value) -> String {
    event
        .get("queryStringParameters")
        .and_then(Value::as_object)
        .and_then(|params| params.get("tableName"))
        .and_then(Value::as_str)
        .or_else(|| event.get("tableName").and_then(Value::as_str))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_TABLE_NAME)
        .to_string()
}

fn success_response(payload: CountResponse) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 200,
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

fn failure_response() -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 500,
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(&ErrorResponse::generic())
            .expect("response payload should serialize"),
    }
}

fn log_handler_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "count_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_handler_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "count_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use table_count_core::error::CountError;

    use super::*;

    struct RecordingRepository {
        result: Result<i64, CountError>,
        requested: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingRepository {
        fn returning(count: i64) -> Self {
            Self {
                result: Ok(count),
                requested: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(error: CountError) -> Self {
            Self {
                result: Err(error),
                requested: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn requested_handle(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.requested)
        }
    }

    #[async_trait::async_trait]
    impl table_count_core::service::CountRepository for RecordingRepository {
        async fn get_count(&self, table_name: &str) -> Result<i64, CountError> {
            self.requested
                .lock()
                .expect("poisoned mutex")
                .push(table_name.to_string());
            self.result.clone()
        }
    }

    fn service_with(repository: RecordingRepository) -> CountService<RecordingRepository> {
        CountService::new(repository)
    }

    #[tokio::test]
    async fn query_parameter_drives_the_count() {
        let service = service_with(RecordingRepository::returning(42));

        let response = handle_count_event(
            json!({"queryStringParameters": {"tableName": "orders"}}),
            &service,
        )
        .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "{\"count\":42}");
    }

    #[tokio::test]
    async fn top_level_table_name_is_accepted() {
        let repository = RecordingRepository::returning(3);
        let requested = repository.requested_handle();
        let service = service_with(repository);

        handle_count_event(json!({"tableName": "riders"}), &service).await;

        assert_eq!(*requested.lock().expect("poisoned mutex"), vec!["riders"]);
    }

    #[tokio::test]
    async fn missing_parameter_falls_back_to_the_default_table() {
        let repository = RecordingRepository::returning(7);
        let requested = repository.requested_handle();
        let service = service_with(repository);

        let response = handle_count_event(json!({}), &service).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "{\"count\":7}");
        assert_eq!(
            *requested.lock().expect("poisoned mutex"),
            vec![DEFAULT_TABLE_NAME]
        );
    }

    #[tokio::test]
    async fn blank_parameter_falls_back_to_the_default_table() {
        let repository = RecordingRepository::returning(7);
        let requested = repository.requested_handle();
        let service = service_with(repository);

        handle_count_event(
            json!({"queryStringParameters": {"tableName": "   "}}),
            &service,
        )
        .await;

        assert_eq!(
            *requested.lock().expect("poisoned mutex"),
            vec![DEFAULT_TABLE_NAME]
        );
    }

    #[tokio::test]
    async fn store_failure_collapses_into_the_generic_500() {
        let service = service_with(RecordingRepository::failing(
            CountError::store_connection_failed("connection refused"),
        ));

        let response =
            handle_count_event(json!({"tableName": "orders"}), &service).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "{\"error\":\"Error al obtener el count\"}");
    }

    #[tokio::test]
    async fn query_failure_is_indistinguishable_from_connection_failure() {
        let service = service_with(RecordingRepository::failing(
            CountError::store_query_failed("relation \"nope\" does not exist"),
        ));

        let response = handle_count_event(json!({"tableName": "nope"}), &service).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "{\"error\":\"Error al obtener el count\"}");
    }

    #[tokio::test]
    async fn responses_declare_a_json_content_type() {
        let service = service_with(RecordingRepository::returning(1));

        let response = handle_count_event(json!({}), &service).await;

        assert_eq!(
            response.headers,
            json!({"Content-Type": "application/json"})
        );
    }
}
