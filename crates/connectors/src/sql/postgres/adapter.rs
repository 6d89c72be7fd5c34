use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter},
        error::{ConnectorError, DbError},
        row::DbRow,
        transaction::Transaction,
    },
    postgres::{
        params::PgParamStore,
        utils::{connect_client, parse_config},
    },
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use planner::query::dialect::{self, Dialect};
use tokio_postgres::{Client, Config};
use tracing::debug;

/// Postgres store. Holds only the parsed configuration: each operation
/// opens its own client and drops it when done.
#[derive(Clone)]
pub struct PgAdapter {
    config: Config,
    dialect: dialect::Postgres,
}

impl PgAdapter {
    async fn client(&self) -> Result<Client, DbError> {
        connect_client(&self.config)
            .await
            .map_err(|e| DbError::Connection(e.to_string()))
    }
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let config = parse_config(url)?;
        // Fail fast on unreachable hosts or bad credentials.
        connect_client(&config).await?;
        Ok(PgAdapter {
            config,
            dialect: dialect::Postgres,
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        let client = self.client().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError> {
        debug!("Executing query: {sql}");
        let client = self.client().await?;
        let statement = client.prepare(sql).await?;
        let bindings = PgParamStore::for_types(params, statement.params());
        let rows = client.query(&statement, &bindings.as_refs()).await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::PostgresRow(row).to_row_data(""))
            .collect())
    }

    async fn begin(&self) -> Result<Transaction, DbError> {
        let client = self.client().await?;
        Transaction::begin_pg(client).await
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }
}
