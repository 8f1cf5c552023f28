use thiserror::Error;

/// All errors coming from the database layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any Postgres driver error.
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Building the TLS connector failed.
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    /// The connection string could not be parsed.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// A result column could not be turned into a `Value`.
    #[error("Failed to decode column '{column}' of type {type_name}")]
    Decode { column: String, type_name: String },
}
