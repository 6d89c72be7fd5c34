use crate::sql::{
    base::error::DbError,
    mysql::params::MySqlParamStore,
    postgres::params::PgParamStore,
};
use async_trait::async_trait;
use model::core::value::Value;
use mysql_async::prelude::Queryable;
use tracing::debug;

/// Statement execution inside one open transaction.
#[async_trait]
pub trait Session: Send + Sized {
    /// Executes one parameterized statement, returning the affected row count.
    async fn exec_params(&mut self, sql: &str, params: Vec<Value>) -> Result<u64, DbError>;

    async fn commit(self) -> Result<(), DbError>;

    async fn rollback(self) -> Result<(), DbError>;
}

/// A scoped store session with an open transaction.
///
/// Dropping it without calling [`Transaction::commit`] discards the work:
/// MySQL rolls back when the connection returns to the pool, and the
/// Postgres session closes its connection, which aborts the transaction.
pub enum Transaction {
    MySqlTransaction(mysql_async::Transaction<'static>),
    PgTransaction(tokio_postgres::Client),
}

impl Transaction {
    pub(crate) async fn begin_pg(client: tokio_postgres::Client) -> Result<Self, DbError> {
        client.batch_execute("BEGIN").await?;
        Ok(Transaction::PgTransaction(client))
    }
}

#[async_trait]
impl Session for Transaction {
    async fn exec_params(&mut self, sql: &str, params: Vec<Value>) -> Result<u64, DbError> {
        debug!(params = params.len(), "Executing statement in transaction");
        match self {
            Transaction::MySqlTransaction(tx) => {
                let bindings = MySqlParamStore::from_values(&params);
                tx.exec_drop(sql, bindings.params()).await?;
                Ok(tx.affected_rows())
            }
            Transaction::PgTransaction(client) => {
                let statement = client.prepare(sql).await?;
                let bindings = PgParamStore::for_types(params, statement.params());
                let affected = client.execute(&statement, &bindings.as_refs()).await?;
                Ok(affected)
            }
        }
    }

    async fn commit(self) -> Result<(), DbError> {
        match self {
            Transaction::MySqlTransaction(tx) => {
                tx.commit().await?;
                Ok(())
            }
            Transaction::PgTransaction(client) => {
                client.batch_execute("COMMIT").await?;
                Ok(())
            }
        }
    }

    async fn rollback(self) -> Result<(), DbError> {
        match self {
            Transaction::MySqlTransaction(tx) => {
                tx.rollback().await?;
                Ok(())
            }
            Transaction::PgTransaction(client) => {
                client.batch_execute("ROLLBACK").await?;
                Ok(())
            }
        }
    }
}
