use crate::sql::base::{
    adapter::SqlAdapter, error::DbError, query::generator::QueryGenerator,
    source::watermark_value,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use model::{
    records::{row::RowData, transaction::DenormalizedRecord},
    transfer::schema::TransferSchema,
};
use std::sync::Arc;
use tracing::debug;

/// Rows per INSERT statement unless configured otherwise.
pub const DEFAULT_MAX_ROWS_PER_STATEMENT: usize = 1000;

/// Write side of a transfer: the denormalized table.
#[async_trait]
pub trait TransferDestination: Send + Sync {
    /// Latest timestamp already loaded, `None` when the table is empty.
    async fn max_timestamp(&self) -> Result<Option<NaiveDateTime>, DbError>;

    /// Inserts the whole batch atomically and returns the rows written.
    /// On error nothing from the batch is left behind.
    async fn load_batch(&self, records: &[DenormalizedRecord]) -> Result<u64, DbError>;
}

pub struct SqlTransferDestination {
    adapter: Arc<dyn SqlAdapter>,
    schema: TransferSchema,
    max_rows_per_statement: usize,
}

impl SqlTransferDestination {
    pub fn new(adapter: Arc<dyn SqlAdapter>, schema: TransferSchema) -> Self {
        Self {
            adapter,
            schema,
            max_rows_per_statement: DEFAULT_MAX_ROWS_PER_STATEMENT,
        }
    }

    pub fn with_max_rows_per_statement(mut self, max_rows: usize) -> Self {
        self.max_rows_per_statement = max_rows.max(1);
        self
    }
}

#[async_trait]
impl TransferDestination for SqlTransferDestination {
    async fn max_timestamp(&self) -> Result<Option<NaiveDateTime>, DbError> {
        let (sql, params) = QueryGenerator::new(self.adapter.dialect())
            .max_timestamp(&self.schema.destination_table, &self.schema.columns.timestamp);
        let rows = self.adapter.query_rows(&sql, params).await?;
        Ok(watermark_value(&rows))
    }

    async fn load_batch(&self, records: &[DenormalizedRecord]) -> Result<u64, DbError> {
        if records.is_empty() {
            return Ok(0);
        }

        let rows: Vec<RowData> = records.iter().map(|r| r.to_row(&self.schema)).collect();
        let statements = QueryGenerator::new(self.adapter.dialect()).insert_batches(
            &self.schema.destination_table,
            &rows,
            self.max_rows_per_statement,
        )?;
        debug!(
            rows = rows.len(),
            statements = statements.len(),
            "Loading batch in one transaction"
        );

        self.adapter.execute_many(statements).await
    }
}
