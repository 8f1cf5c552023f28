use crate::{error::SmartQueryError, executor::QueryExecutor};
use futures_util::{StreamExt, TryStreamExt, stream::BoxStream};
use model::{core::value::Value, records::row::RowData};
use planner::query::{
    ast::select::Select,
    dialect::DialectKind,
    renderer::{render, render_inlined},
};
use tracing::debug;

/// Alias of the single column returned by [`SmartQuery::count_sql`].
pub const COUNT_ALIAS: &str = "aggregate";

/// A fully assembled query, ready to render or execute.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartQuery {
    select: Select,
    dialect: DialectKind,
}

impl SmartQuery {
    pub fn new(select: Select, dialect: DialectKind) -> Self {
        SmartQuery { select, dialect }
    }

    pub fn select(&self) -> &Select {
        &self.select
    }

    pub fn dialect(&self) -> DialectKind {
        self.dialect
    }

    pub fn to_sql(&self) -> (String, Vec<Value>) {
        render(&self.select, self.dialect.dialect())
    }

    /// `SELECT COUNT(*)` over the same joins and filters, without ordering
    /// or paging.
    pub fn count_sql(&self) -> (String, Vec<Value>) {
        render(&self.select.to_count(COUNT_ALIAS), self.dialect.dialect())
    }

    /// SQL with parameters written inline. For logs only; never execute it.
    pub fn to_debug_sql(&self) -> String {
        render_inlined(&self.select, self.dialect.dialect())
    }

    pub async fn get<E: QueryExecutor>(&self, executor: &E) -> Result<Vec<RowData>, SmartQueryError> {
        let (sql, params) = self.to_sql();
        debug!(%sql, params = params.len(), "Fetching rows");
        executor
            .fetch_all(&sql, &params)
            .await
            .map_err(SmartQueryError::execution)
    }

    pub async fn count<E: QueryExecutor>(&self, executor: &E) -> Result<i64, SmartQueryError> {
        let (sql, params) = self.count_sql();
        debug!(%sql, params = params.len(), "Counting rows");
        executor
            .fetch_count(&sql, &params)
            .await
            .map_err(SmartQueryError::execution)
    }

    /// Streams rows instead of collecting them.
    pub async fn cursor<E: QueryExecutor>(
        &self,
        executor: &E,
    ) -> Result<BoxStream<'static, Result<RowData, SmartQueryError>>, SmartQueryError> {
        let (sql, params) = self.to_sql();
        debug!(%sql, params = params.len(), "Streaming rows");
        let stream = executor
            .fetch_stream(&sql, &params)
            .await
            .map_err(SmartQueryError::execution)?;
        Ok(stream.map_err(SmartQueryError::execution).boxed())
    }
}
