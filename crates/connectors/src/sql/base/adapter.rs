use crate::sql::base::{
    error::{ConnectorError, DbError},
    transaction::{Session, Transaction},
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use planner::query::dialect::Dialect;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Postgres,
}

impl DatabaseKind {
    /// Picks the store kind from a connection URL scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split_once("://")?.0.to_lowercase();
        match scheme.as_str() {
            "mysql" | "mariadb" => Some(DatabaseKind::MySql),
            "postgres" | "postgresql" => Some(DatabaseKind::Postgres),
            _ => None,
        }
    }
}

/// Minimal store contract the transfer engine relies on.
///
/// Every call acquires its own connection and releases it before returning.
/// Writes go through a [`Transaction`], which rolls back when dropped
/// without an explicit commit.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    async fn connect(url: &str) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    /// Round-trips `SELECT 1`.
    async fn ping(&self) -> Result<(), DbError>;

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError>;

    /// Opens a scoped session with an active transaction.
    async fn begin(&self) -> Result<Transaction, DbError>;

    fn kind(&self) -> DatabaseKind;

    fn dialect(&self) -> &dyn Dialect;

    /// Runs all statements in one transaction: either every statement lands or none does.
    async fn execute_many(&self, statements: Vec<(String, Vec<Value>)>) -> Result<u64, DbError> {
        let tx = self.begin().await?;
        run_in_session(tx, statements).await
    }
}

/// Applies the statements in order, then commits. The first failure rolls
/// the session back and is returned as is.
pub(crate) async fn run_in_session<S: Session>(
    mut session: S,
    statements: Vec<(String, Vec<Value>)>,
) -> Result<u64, DbError> {
    let mut affected = 0;
    for (sql, params) in statements {
        match session.exec_params(&sql, params).await {
            Ok(rows) => affected += rows,
            Err(err) => {
                if let Err(rollback_err) = session.rollback().await {
                    warn!(%rollback_err, "Rollback failed; the session is dropped instead");
                }
                return Err(err);
            }
        }
    }
    session.commit().await?;
    Ok(affected)
}
