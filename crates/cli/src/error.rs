use connectors::error::DbError;
use model::schema::SchemaError;
use smart_filter::SmartQueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Invalid model schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid engine config: {0}")]
    Config(serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("{0}")]
    Query(#[from] SmartQueryError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Only the postgres dialect can be executed, got {0:?}")]
    UnsupportedDialect(planner::query::dialect::DialectKind),
}
