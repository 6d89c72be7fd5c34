//! A scripted adapter for exercising the SQL-backed source and destination
//! without a live store.

use crate::sql::base::{
    adapter::{DatabaseKind, SqlAdapter},
    error::{ConnectorError, DbError},
    transaction::Transaction,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use planner::query::dialect::{Dialect, MySql};
use std::{collections::VecDeque, sync::Mutex};

/// Cells per denormalized row, used to turn bound parameters back into a row count.
const ROW_WIDTH: usize = 6;

#[derive(Default)]
pub struct RecordingAdapter {
    responses: Mutex<VecDeque<Vec<RowData>>>,
    queries: Mutex<Vec<(String, Vec<Value>)>>,
    batches: Mutex<Vec<Vec<(String, Vec<Value>)>>>,
    fail_writes: Mutex<bool>,
}

impl RecordingAdapter {
    /// Queues the rows returned by the next `query_rows` call.
    pub fn respond(&self, rows: Vec<RowData>) {
        self.responses.lock().unwrap().push_back(rows);
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn queries(&self) -> Vec<(String, Vec<Value>)> {
        self.queries.lock().unwrap().clone()
    }

    /// Statement groups handed to `execute_many`, one group per call.
    pub fn batches(&self) -> Vec<Vec<(String, Vec<Value>)>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SqlAdapter for RecordingAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        Err(ConnectorError::InvalidUrl(url.to_string()))
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError> {
        self.queries.lock().unwrap().push((sql.to_string(), params));
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn begin(&self) -> Result<Transaction, DbError> {
        Err(DbError::Connection("no live session behind a recording adapter".into()))
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }

    fn dialect(&self) -> &dyn Dialect {
        &MySql
    }

    async fn execute_many(&self, statements: Vec<(String, Vec<Value>)>) -> Result<u64, DbError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(DbError::Write("Duplicate entry '1' for key 'PRIMARY'".into()));
        }
        let rows = statements
            .iter()
            .map(|(_, params)| (params.len() / ROW_WIDTH) as u64)
            .sum::<u64>();
        self.batches.lock().unwrap().push(statements);
        Ok(rows)
    }
}
