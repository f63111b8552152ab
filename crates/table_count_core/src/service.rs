use crate::error::CountError;

/// Storage port for row counting. The Postgres adapter in
/// `table_count_lambda` is the production implementation; tests substitute
/// in-memory fakes.
#[async_trait::async_trait]
pub trait CountRepository: Send + Sync {
    async fn get_count(&self, table_name: &str) -> Result<i64, CountError>;
}

/// Domain unit decoupling callers from the concrete storage technology.
/// Pure delegation: no transformation, validation, or caching.
pub struct Count<R> {
    repository: R,
}

impl<R: CountRepository> Count<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn get_count(&self, table_name: &str) -> Result<i64, CountError> {
        self.repository.get_count(table_name).await
    }
}

/// Application service for the single use case: get the row count of one
/// table. Returns the repository result unchanged.
pub struct CountService<R> {
    count: Count<R>,
}

impl<R: CountRepository> CountService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            count: Count::new(repository),
        }
    }

    pub async fn execute(&self, table_name: &str) -> Result<i64, CountError> {
        self.count.get_count(table_name).await
    }
}
