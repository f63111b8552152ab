use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use table_count_core::service::CountService;
use table_count_lambda::adapters::postgres::{create_pool, probe_pool, PostgresRepository};
use table_count_lambda::config::DbConfig;
use table_count_lambda::handlers::count::handle_count_event;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Missing configuration is fatal; the runtime never starts without a
    // complete connection surface.
    let config = DbConfig::from_env().map_err(|error| Error::from(error.message()))?;
    config.log_snapshot();

    let pool = create_pool(&config);
    probe_pool(&pool).await;

    // One repository and service per process; concurrent invocations share
    // only the pool underneath.
    let service = Arc::new(CountService::new(PostgresRepository::new(pool)));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let service = Arc::clone(&service);
        async move {
            let response = handle_count_event(event.payload, service.as_ref()).await;
            serde_json::to_value(response).map_err(Error::from)
        }
    }))
    .await
}
