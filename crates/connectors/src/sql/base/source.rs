use crate::sql::base::{adapter::SqlAdapter, error::DbError, query::generator::QueryGenerator};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use model::{
    records::{row::RowData, transaction::DenormalizedRecord},
    transfer::{
        schema::{TransferSchema, WATERMARK_ALIAS},
        watermark::TransferMode,
        window::TimeWindow,
    },
};
use std::sync::Arc;
use tracing::debug;

/// Read side of a transfer: the fact table joined with its lookup table.
#[async_trait]
pub trait TransferSource: Send + Sync {
    /// Earliest fact timestamp, `None` when the fact table is empty.
    async fn min_timestamp(&self) -> Result<Option<NaiveDateTime>, DbError>;

    /// Joined rows whose timestamp falls inside `window` under `mode`'s bounds,
    /// ordered by timestamp then id.
    async fn fetch_window(
        &self,
        window: &TimeWindow,
        mode: TransferMode,
    ) -> Result<Vec<DenormalizedRecord>, DbError>;
}

pub struct SqlTransferSource {
    adapter: Arc<dyn SqlAdapter>,
    schema: TransferSchema,
}

impl SqlTransferSource {
    pub fn new(adapter: Arc<dyn SqlAdapter>, schema: TransferSchema) -> Self {
        Self { adapter, schema }
    }
}

#[async_trait]
impl TransferSource for SqlTransferSource {
    async fn min_timestamp(&self) -> Result<Option<NaiveDateTime>, DbError> {
        let (sql, params) = QueryGenerator::new(self.adapter.dialect())
            .min_timestamp(&self.schema.source_table, &self.schema.columns.timestamp);
        let rows = self.adapter.query_rows(&sql, params).await?;
        Ok(watermark_value(&rows))
    }

    async fn fetch_window(
        &self,
        window: &TimeWindow,
        mode: TransferMode,
    ) -> Result<Vec<DenormalizedRecord>, DbError> {
        let (sql, params) = QueryGenerator::new(self.adapter.dialect())
            .window_select(&self.schema, window, mode);
        let rows = self.adapter.query_rows(&sql, params).await?;
        debug!(rows = rows.len(), %window, "Fetched window rows");

        rows.iter()
            .map(|row| DenormalizedRecord::from_row(row, &self.schema).map_err(DbError::from))
            .collect()
    }
}

/// Reads the single `date` cell of a MIN/MAX query. NULL means the table is empty.
pub(crate) fn watermark_value(rows: &[RowData]) -> Option<NaiveDateTime> {
    rows.first()
        .and_then(|row| row.get_value(WATERMARK_ALIAS).as_naive_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::base::recording::RecordingAdapter;
    use bigdecimal::BigDecimal;
    use chrono::{NaiveDate, TimeDelta};
    use model::core::value::{FieldValue, Value};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn joined_row(id: i64, ts: NaiveDateTime, amount: Value) -> RowData {
        RowData::new(
            "",
            vec![
                FieldValue::new("id", Value::Int(id)),
                FieldValue::new("dt", Value::TimestampNaive(ts)),
                FieldValue::new("idoper", Value::Int(1)),
                FieldValue::new("move", Value::Int(-1)),
                FieldValue::new("amount", amount),
                FieldValue::new("name_oper", Value::String("A".into())),
            ],
        )
    }

    #[tokio::test]
    async fn test_fetch_window_binds_bounds_and_decodes_rows() {
        let adapter = Arc::new(RecordingAdapter::default());
        adapter.respond(vec![
            joined_row(1, at(9, 0), Value::Decimal(BigDecimal::from(10))),
            joined_row(2, at(9, 30), Value::Null),
        ]);
        let source = SqlTransferSource::new(adapter.clone(), TransferSchema::default());
        let window = TimeWindow::starting_at(at(9, 0), TimeDelta::hours(1)).unwrap();

        let records = source.fetch_window(&window, TransferMode::Resume).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, Some(BigDecimal::from(10)));
        assert_eq!(records[1].amount, None);
        assert_eq!(records[1].operation_name.as_deref(), Some("A"));

        let (sql, params) = &adapter.queries()[0];
        assert!(sql.contains("WHERE (`t`.`dt` > ? AND `t`.`dt` <= ?)"));
        assert_eq!(
            *params,
            vec![
                Value::TimestampNaive(window.start),
                Value::TimestampNaive(window.end)
            ]
        );
    }

    #[tokio::test]
    async fn test_undecodable_row_is_an_error() {
        let adapter = Arc::new(RecordingAdapter::default());
        let mut row = joined_row(1, at(9, 0), Value::Null);
        row.field_values.retain(|f| f.name != "dt");
        adapter.respond(vec![row]);
        let source = SqlTransferSource::new(adapter.clone(), TransferSchema::default());
        let window = TimeWindow::starting_at(at(9, 0), TimeDelta::hours(1)).unwrap();

        let err = source.fetch_window(&window, TransferMode::Fresh).await.unwrap_err();
        assert!(matches!(err, DbError::Decode(_)));
    }

    #[tokio::test]
    async fn test_min_timestamp_on_empty_source() {
        let adapter = Arc::new(RecordingAdapter::default());
        adapter.respond(vec![RowData::new("", vec![FieldValue::new("date", Value::Null)])]);
        let source = SqlTransferSource::new(adapter.clone(), TransferSchema::default());

        assert_eq!(source.min_timestamp().await.unwrap(), None);
        assert_eq!(adapter.queries()[0].0, "SELECT MIN(`dt`) AS `date` FROM `transactions`");
    }

    #[test]
    fn test_watermark_value_null_is_none() {
        let rows = vec![RowData::new("", vec![FieldValue {
            name: "date".into(),
            value: None,
            data_type: model::core::data_type::DataType::Timestamp,
        }])];
        assert_eq!(watermark_value(&rows), None);
        assert_eq!(watermark_value(&[]), None);
    }

    #[test]
    fn test_watermark_value_reads_date_alias() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let rows = vec![RowData::new("", vec![FieldValue::new("date", Value::TimestampNaive(ts))])];
        assert_eq!(watermark_value(&rows), Some(ts));
    }
}
