use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter},
        error::{ConnectorError, DbError},
        row::DbRow,
        transaction::Transaction,
    },
    mysql::params::MySqlParamStore,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use mysql_async::{Conn, Opts, Pool, Row, TxOpts, prelude::Queryable};
use planner::query::dialect::{self, Dialect};
use tracing::debug;

/// MySQL store backed by a connection pool. Connections are checked out per
/// operation and returned when the operation finishes.
#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool,
    dialect: dialect::MySql,
}

impl MySqlAdapter {
    async fn conn(&self) -> Result<Conn, DbError> {
        self.pool
            .get_conn()
            .await
            .map_err(|e| DbError::Connection(e.to_string()))
    }

    /// Waits for checked-out connections to come back, then closes the pool.
    pub async fn close(self) -> Result<(), DbError> {
        self.pool.disconnect().await?;
        Ok(())
    }
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url).map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;
        let pool = Pool::new(opts);
        // Fail fast on unreachable hosts or bad credentials.
        pool.get_conn().await?;
        Ok(MySqlAdapter {
            pool,
            dialect: dialect::MySql,
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.conn().await?;
        conn.ping().await?;
        Ok(())
    }

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError> {
        debug!("Executing query: {sql}");
        let mut conn = self.conn().await?;
        let bindings = MySqlParamStore::from_values(&params);
        let rows: Vec<Row> = conn.exec(sql, bindings.params()).await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::MySqlRow(row).to_row_data(""))
            .collect())
    }

    async fn begin(&self) -> Result<Transaction, DbError> {
        let tx = self.pool.start_transaction(TxOpts::default()).await?;
        Ok(Transaction::MySqlTransaction(tx))
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }
}
