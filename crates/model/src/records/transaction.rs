//! Typed entities moved by the synchronizer.
//!
//! Source rows are a fact table (`TransactionRecord`) plus a small lookup
//! dimension (`OperationType`). The destination holds the joined projection
//! (`DenormalizedRecord`) with the operation name inlined.

use crate::{
    core::value::{FieldValue, Value},
    records::row::RowData,
    transfer::schema::TransferSchema,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Missing field `{0}`")]
    MissingField(String),

    #[error("Field `{field}` expected {expected}, found {found}")]
    InvalidField {
        field: String,
        expected: &'static str,
        found: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub operation_ref: Option<i64>,
    /// Signed direction of the movement (e.g. `1` in, `-1` out).
    pub movement: Option<i64>,
    pub amount: Option<BigDecimal>,
}

/// `id` and `timestamp` drive the transfer and are always present; the other
/// cells are copied through as they are, NULL included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenormalizedRecord {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub operation_ref: Option<i64>,
    pub movement: Option<i64>,
    pub amount: Option<BigDecimal>,
    pub operation_name: Option<String>,
}

impl DenormalizedRecord {
    /// Inner-join semantics: no record unless the reference matches.
    pub fn join(tx: &TransactionRecord, op: &OperationType) -> Option<Self> {
        (tx.operation_ref == Some(op.id)).then(|| DenormalizedRecord {
            id: tx.id,
            timestamp: tx.timestamp,
            operation_ref: tx.operation_ref,
            movement: tx.movement,
            amount: tx.amount.clone(),
            operation_name: Some(op.name.clone()),
        })
    }

    /// Decodes a joined row using the configured column names.
    pub fn from_row(row: &RowData, schema: &TransferSchema) -> Result<Self, RecordError> {
        let cols = &schema.columns;
        Ok(DenormalizedRecord {
            id: int_field(row, &cols.id)?,
            timestamp: timestamp_field(row, &cols.timestamp)?,
            operation_ref: optional(row, &cols.operation_ref)?
                .map(|v| as_int(&cols.operation_ref, v))
                .transpose()?,
            movement: optional(row, &cols.movement)?
                .map(|v| as_int(&cols.movement, v))
                .transpose()?,
            amount: optional(row, &cols.amount)?
                .map(|v| as_decimal(&cols.amount, v))
                .transpose()?,
            operation_name: optional(row, &cols.name_alias)?
                .map(|v| as_string(&cols.name_alias, v))
                .transpose()?,
        })
    }

    /// Static column mapping for the destination table, in insert order.
    pub fn to_row(&self, schema: &TransferSchema) -> RowData {
        let cols = &schema.columns;
        RowData::new(
            &schema.destination_table,
            vec![
                FieldValue::new(&cols.id, Value::Int(self.id)),
                FieldValue::new(&cols.timestamp, Value::TimestampNaive(self.timestamp)),
                FieldValue::new(&cols.operation_ref, nullable(self.operation_ref.map(Value::Int))),
                FieldValue::new(&cols.movement, nullable(self.movement.map(Value::Int))),
                FieldValue::new(&cols.amount, nullable(self.amount.clone().map(Value::Decimal))),
                FieldValue::new(
                    &cols.name_alias,
                    nullable(self.operation_name.clone().map(Value::String)),
                ),
            ],
        )
    }
}

fn required(row: &RowData, field: &str) -> Result<Value, RecordError> {
    match row.get_value(field) {
        Value::Null => Err(RecordError::MissingField(field.to_string())),
        value => Ok(value),
    }
}

/// The column must exist; a NULL cell reads as `None`.
fn optional(row: &RowData, field: &str) -> Result<Option<Value>, RecordError> {
    match row.get(field) {
        None => Err(RecordError::MissingField(field.to_string())),
        Some(f) => Ok(f.value.clone().filter(|v| *v != Value::Null)),
    }
}

fn nullable(value: Option<Value>) -> Value {
    value.unwrap_or(Value::Null)
}

fn invalid(field: &str, expected: &'static str, found: &Value) -> RecordError {
    RecordError::InvalidField {
        field: field.to_string(),
        expected,
        found: format!("{:?}", found.data_type()),
    }
}

fn int_field(row: &RowData, field: &str) -> Result<i64, RecordError> {
    as_int(field, required(row, field)?)
}

fn as_int(field: &str, value: Value) -> Result<i64, RecordError> {
    value
        .as_i64()
        .ok_or_else(|| invalid(field, "integer", &value))
}

fn as_decimal(field: &str, value: Value) -> Result<BigDecimal, RecordError> {
    value
        .as_decimal()
        .ok_or_else(|| invalid(field, "decimal", &value))
}

fn timestamp_field(row: &RowData, field: &str) -> Result<NaiveDateTime, RecordError> {
    let value = required(row, field)?;
    value
        .as_naive_timestamp()
        .ok_or_else(|| invalid(field, "timestamp", &value))
}

fn as_string(field: &str, value: Value) -> Result<String, RecordError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(invalid(field, "string", &other)),
    }
}
