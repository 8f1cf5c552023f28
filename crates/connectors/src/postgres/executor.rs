use crate::{
    error::DbError,
    postgres::{params::PgParamStore, row::DbRow},
};
use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, stream::BoxStream};
use model::{core::value::Value, records::row::RowData};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use smart_filter::QueryExecutor;
use std::sync::Arc;
use tokio_postgres::{
    Client, Config, NoTls, Socket,
    config::SslMode,
    tls::MakeTlsConnect,
};
use tracing::{debug, error, info, warn};

/// Runs smart queries over a single Postgres connection.
#[derive(Clone)]
pub struct PgExecutor {
    client: Arc<Client>,
    entity: String,
}

impl PgExecutor {
    /// Connects according to the `sslmode` in `url`. Under `prefer` a failed
    /// TLS handshake is retried over plain TCP.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let config = url
            .parse::<Config>()
            .map_err(|e| DbError::InvalidUrl(e.to_string()))?;
        let ssl_mode = config.get_ssl_mode();
        info!(?ssl_mode, hosts = config.get_hosts().len(), "Connecting to Postgres");

        let client = match ssl_mode {
            SslMode::Disable => open(&config, NoTls).await?,
            SslMode::Prefer => {
                let attempt = match tls() {
                    Ok(tls) => open(&config, tls).await,
                    Err(e) => Err(e),
                };
                match attempt {
                    Ok(client) => client,
                    Err(error) => {
                        warn!(%error, "TLS unavailable, connecting without it");
                        open(&config, NoTls).await?
                    }
                }
            }
            _ => open(&config, tls()?).await?,
        };
        Ok(PgExecutor::new(client))
    }

    pub fn new(client: Client) -> Self {
        PgExecutor {
            client: Arc::new(client),
            entity: String::new(),
        }
    }

    /// Names the entity stamped on every returned row.
    pub fn for_entity(mut self, entity: &str) -> Self {
        self.entity = entity.to_string();
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn tls() -> Result<MakeTlsConnector, DbError> {
    Ok(MakeTlsConnector::new(TlsConnector::builder().build()?))
}

/// Opens a client and drives its connection on a background task.
async fn open<T>(config: &Config, tls: T) -> Result<Client, DbError>
where
    T: MakeTlsConnect<Socket>,
    T::Stream: Send + 'static,
{
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(error) = connection.await {
            error!(%error, "Postgres connection closed");
        }
    });
    Ok(client)
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    type Error = DbError;

    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<RowData>, DbError> {
        let bindings = PgParamStore::from_values(params);
        let rows = self.client.query(sql, &bindings.as_refs()).await?;
        debug!(rows = rows.len(), "Fetched rows");
        Ok(rows
            .iter()
            .map(|row| DbRow(row).to_row_data(&self.entity))
            .collect())
    }

    async fn fetch_count(&self, sql: &str, params: &[Value]) -> Result<i64, DbError> {
        let bindings = PgParamStore::from_values(params);
        let row = self.client.query_one(sql, &bindings.as_refs()).await?;
        let column = row.columns().first().ok_or_else(|| DbError::Decode {
            column: "0".to_string(),
            type_name: "none".to_string(),
        })?;
        match DbRow(&row).get_value(0, column.type_().name()) {
            Some(Value::Int(count)) => Ok(count),
            _ => Err(DbError::Decode {
                column: column.name().to_string(),
                type_name: column.type_().name().to_string(),
            }),
        }
    }

    async fn fetch_stream(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<BoxStream<'static, Result<RowData, DbError>>, DbError> {
        let bindings = PgParamStore::from_values(params);
        let stream = self.client.query_raw(sql, bindings.as_refs()).await?;
        let entity = self.entity.clone();

        Ok(stream
            .map_ok(move |row| DbRow(&row).to_row_data(&entity))
            .map_err(DbError::from)
            .boxed())
    }
}
