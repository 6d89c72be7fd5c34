//! In-memory stores that apply the same window and join rules as the SQL ones.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use connectors::sql::base::{
    destination::TransferDestination, error::DbError, source::TransferSource,
};
use model::{
    records::transaction::{DenormalizedRecord, OperationType, TransactionRecord},
    transfer::{watermark::TransferMode, window::TimeWindow},
};
use std::sync::Mutex;

/// 2024-03-01 at `h:m`.
pub fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(h, m, 0))
        .unwrap()
}

#[derive(Default)]
pub struct MemorySource {
    facts: Mutex<Vec<TransactionRecord>>,
    operations: Mutex<Vec<OperationType>>,
    fail_fetch_on: Mutex<Option<usize>>,
    fetch_calls: Mutex<usize>,
    min_calls: Mutex<usize>,
}

impl MemorySource {
    /// Rows at 09:00, 09:30 and 10:15 referencing types 1, 1 and 2 ("A", "A", "B").
    pub fn scenario() -> Self {
        let source = MemorySource::default();
        source.add_operation(1, "A");
        source.add_operation(2, "B");
        source.push(Self::fact(1, at(9, 0), 1));
        source.push(Self::fact(2, at(9, 30), 1));
        source.push(Self::fact(3, at(10, 15), 2));
        source
    }

    pub fn fact(id: i64, timestamp: NaiveDateTime, operation_ref: i64) -> TransactionRecord {
        TransactionRecord {
            id,
            timestamp,
            operation_ref: Some(operation_ref),
            movement: Some(1),
            amount: Some(BigDecimal::from(id * 10)),
        }
    }

    pub fn record(id: i64, timestamp: NaiveDateTime, operation_ref: i64, name: &str) -> DenormalizedRecord {
        let op = OperationType {
            id: operation_ref,
            name: name.to_string(),
        };
        DenormalizedRecord::join(&Self::fact(id, timestamp, operation_ref), &op).unwrap()
    }

    pub fn push(&self, fact: TransactionRecord) {
        self.facts.lock().unwrap().push(fact);
    }

    pub fn add_operation(&self, id: i64, name: &str) {
        self.operations.lock().unwrap().push(OperationType {
            id,
            name: name.to_string(),
        });
    }

    /// Makes the n-th window fetch (1-based) fail with a connection error.
    pub fn fail_fetch_on(&self, call: usize) {
        *self.fail_fetch_on.lock().unwrap() = Some(call);
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }

    pub fn min_calls(&self) -> usize {
        *self.min_calls.lock().unwrap()
    }
}

#[async_trait]
impl TransferSource for MemorySource {
    async fn min_timestamp(&self) -> Result<Option<NaiveDateTime>, DbError> {
        *self.min_calls.lock().unwrap() += 1;
        Ok(self.facts.lock().unwrap().iter().map(|f| f.timestamp).min())
    }

    async fn fetch_window(
        &self,
        window: &TimeWindow,
        mode: TransferMode,
    ) -> Result<Vec<DenormalizedRecord>, DbError> {
        let call = {
            let mut calls = self.fetch_calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if *self.fail_fetch_on.lock().unwrap() == Some(call) {
            return Err(DbError::Connection("connection reset by peer".into()));
        }

        let operations = self.operations.lock().unwrap();
        let mut rows: Vec<DenormalizedRecord> = self
            .facts
            .lock()
            .unwrap()
            .iter()
            .filter(|f| window.admits(mode, f.timestamp))
            .filter_map(|f| {
                operations
                    .iter()
                    .find_map(|op| DenormalizedRecord::join(f, op))
            })
            .collect();
        rows.sort_by_key(|r| (r.timestamp, r.id));
        Ok(rows)
    }
}

/// Destination with primary-key semantics on `id` and all-or-nothing loads.
#[derive(Default)]
pub struct MemoryDestination {
    rows: Mutex<Vec<DenormalizedRecord>>,
    fail_load_on: Mutex<Option<usize>>,
    load_calls: Mutex<usize>,
}

impl MemoryDestination {
    pub fn insert_raw(&self, record: DenormalizedRecord) {
        self.rows.lock().unwrap().push(record);
    }

    /// Makes the n-th batch load (1-based) fail after validating the batch.
    pub fn fail_load_on(&self, call: usize) {
        *self.fail_load_on.lock().unwrap() = Some(call);
    }

    pub fn rows(&self) -> Vec<DenormalizedRecord> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|r| r.id);
        rows
    }

    pub fn ids(&self) -> Vec<i64> {
        self.rows().iter().map(|r| r.id).collect()
    }

    pub fn load_calls(&self) -> usize {
        *self.load_calls.lock().unwrap()
    }
}

#[async_trait]
impl TransferDestination for MemoryDestination {
    async fn max_timestamp(&self) -> Result<Option<NaiveDateTime>, DbError> {
        Ok(self.rows.lock().unwrap().iter().map(|r| r.timestamp).max())
    }

    async fn load_batch(&self, records: &[DenormalizedRecord]) -> Result<u64, DbError> {
        let call = {
            let mut calls = self.load_calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if *self.fail_load_on.lock().unwrap() == Some(call) {
            return Err(DbError::Write("disk full".into()));
        }

        let mut rows = self.rows.lock().unwrap();
        let mut staged = rows.clone();
        for record in records {
            if staged.iter().any(|r| r.id == record.id) {
                return Err(DbError::Write(format!(
                    "Duplicate entry '{}' for key 'PRIMARY'",
                    record.id
                )));
            }
            staged.push(record.clone());
        }
        *rows = staged;
        Ok(records.len() as u64)
    }
}
