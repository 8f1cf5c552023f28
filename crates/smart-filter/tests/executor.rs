use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, stream::BoxStream};
use model::{
    core::value::{FieldValue, Value},
    records::row::RowData,
    schema::{FieldConfig, ModelSchema},
};
use planner::query::dialect::DialectKind;
use smart_filter::{QueryExecutor, QueryRequest, SmartFilterConfig, SmartQueryError, smart_query};
use std::sync::Mutex;
use tracing_test::traced_test;

#[derive(Debug, thiserror::Error)]
#[error("connection reset")]
struct MockError;

/// Records every statement it receives and answers with canned rows.
#[derive(Default)]
struct MockExecutor {
    rows: Vec<RowData>,
    fail: bool,
    seen: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockExecutor {
    fn with_rows(names: &[&str]) -> Self {
        MockExecutor {
            rows: names.iter().map(|name| user(name)).collect(),
            ..Default::default()
        }
    }

    fn record(&self, sql: &str, params: &[Value]) -> Result<(), MockError> {
        self.seen
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        if self.fail { Err(MockError) } else { Ok(()) }
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    type Error = MockError;

    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, MockError> {
        self.record(sql, params)?;
        Ok(self.rows.clone())
    }

    async fn fetch_count(&self, sql: &str, params: &[Value]) -> Result<i64, MockError> {
        self.record(sql, params)?;
        Ok(self.rows.len() as i64)
    }

    async fn fetch_stream(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<BoxStream<'static, Result<RowData, MockError>>, MockError> {
        self.record(sql, params)?;
        let mut items = self.rows.iter().cloned().map(Ok).collect::<Vec<_>>();
        items.push(Err(MockError));
        Ok(futures_util::stream::iter(items).boxed())
    }
}

fn user(name: &str) -> RowData {
    RowData::new(
        "users",
        vec![FieldValue {
            name: "name".to_string(),
            value: Some(Value::String(name.to_string())),
        }],
    )
}

fn schema() -> ModelSchema {
    ModelSchema::new("users")
        .with_field("name", FieldConfig::column("name", "string").searchable())
        .with_field("age", FieldConfig::column("age", "int").searchable())
}

fn query(request: QueryRequest) -> smart_filter::SmartQuery {
    smart_query(&schema(), &request, &SmartFilterConfig::default(), DialectKind::Postgres).unwrap()
}

#[traced_test]
#[tokio::test]
async fn test_get_binds_rendered_params() {
    let executor = MockExecutor::with_rows(&["ann", "bob"]);
    let query = query(QueryRequest::new().filter("age", ">=21").paginate(1, 10));

    let rows = query.get(&executor).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get_value("NAME"), Value::String("bob".into()));

    let seen = executor.seen.lock().unwrap();
    assert_eq!(
        seen[0].0,
        r#"SELECT "users".* FROM "users" WHERE ("users"."age" >= $1) LIMIT $2 OFFSET $3"#
    );
    assert_eq!(seen[0].1, vec![Value::Int(21), Value::Int(10), Value::Int(0)]);
    assert!(logs_contain("Fetching rows"));
}

#[tokio::test]
async fn test_count_ignores_paging() {
    let executor = MockExecutor::with_rows(&["ann", "bob", "cy"]);
    let query = query(QueryRequest::new().filter("name", "^a").paginate(4, 2));

    assert_eq!(query.count(&executor).await.unwrap(), 3);

    let seen = executor.seen.lock().unwrap();
    assert_eq!(
        seen[0].0,
        r#"SELECT COUNT(*) AS "aggregate" FROM "users" WHERE (LOWER("users"."name") LIKE $1)"#
    );
    assert_eq!(seen[0].1, vec![Value::String("a%".into())]);
}

#[tokio::test]
async fn test_cursor_streams_rows_then_errors() {
    let executor = MockExecutor::with_rows(&["ann", "bob"]);
    let query = query(QueryRequest::new());

    let results = query.cursor(&executor).await.unwrap().collect::<Vec<_>>().await;
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(SmartQueryError::Execution(_))));
}

#[tokio::test]
async fn test_cursor_try_collect_stops_on_error() {
    let executor = MockExecutor::with_rows(&["ann"]);
    let err = query(QueryRequest::new())
        .cursor(&executor)
        .await
        .unwrap()
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Query execution failed: connection reset");
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_executor_failure_is_wrapped() {
    let executor = MockExecutor {
        fail: true,
        ..Default::default()
    };
    let err = query(QueryRequest::new()).get(&executor).await.unwrap_err();
    assert!(matches!(err, SmartQueryError::Execution(_)));
    assert!(query(QueryRequest::new()).cursor(&executor).await.is_err());
}
