use async_trait::async_trait;
use futures_util::stream::BoxStream;
use model::{core::value::Value, records::row::RowData};

/// Runs rendered SQL against a database.
///
/// Implementations bind `params` positionally, in the order the renderer
/// produced them.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, Self::Error>;

    /// Runs a query whose first column of the first row is a count.
    async fn fetch_count(&self, sql: &str, params: &[Value]) -> Result<i64, Self::Error>;

    async fn fetch_stream(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<BoxStream<'static, Result<RowData, Self::Error>>, Self::Error>;
}
