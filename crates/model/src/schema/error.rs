use thiserror::Error;

/// Errors raised while loading or validating field metadata.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document is not valid JSON or has the wrong shape.
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema names no base table.
    #[error("Schema table name is empty")]
    EmptyTable,

    /// A relation field does not say which table it belongs to.
    #[error("Relation field on column '{0}' is missing 'belongs_to'")]
    MissingRelationTarget(String),
}
