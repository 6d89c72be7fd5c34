use crate::sql::mysql::data_type::mysql_col_type;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use core::fmt;
use model::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use mysql_async::{Row as MySqlRow, prelude::FromValue};
use rust_decimal::Decimal as RustDecimal;
use std::{fmt::Formatter, str::FromStr};
use tokio_postgres::{Row as PgRow, types::FromSqlOwned};
use tracing::warn;

/// Borrowed driver row, decoded column by column into a [`RowData`].
///
/// Every getter is NULL-aware: a NULL cell and an unreadable cell both come
/// back as `None`, and the caller decides whether that is acceptable.
pub enum DbRow<'a> {
    MySqlRow(&'a MySqlRow),
    PostgresRow(&'a PgRow),
}

impl DbRow<'_> {
    pub fn to_row_data(&self, table: &str) -> RowData {
        let field_values = self
            .columns()
            .into_iter()
            .enumerate()
            .map(|(idx, (name, data_type))| FieldValue {
                value: self.get_value(&data_type, idx),
                name,
                data_type,
            })
            .collect();

        RowData::new(table, field_values)
    }

    /// Column names with the model type each one decodes as.
    pub fn columns(&self) -> Vec<(String, DataType)> {
        match self {
            DbRow::MySqlRow(row) => row
                .columns_ref()
                .iter()
                .map(|col| {
                    (
                        col.name_str().into_owned(),
                        mysql_col_type(col.column_type(), col.flags()),
                    )
                })
                .collect(),
            DbRow::PostgresRow(row) => row
                .columns()
                .iter()
                .map(|col| {
                    let type_name = col.type_().name();
                    let data_type = DataType::from_postgres_type(type_name).unwrap_or_else(|_| {
                        warn!("Unknown column type: {type_name}");
                        DataType::String
                    });
                    (col.name().to_string(), data_type)
                })
                .collect(),
        }
    }

    pub fn get_value(&self, data_type: &DataType, idx: usize) -> Option<Value> {
        match data_type {
            DataType::Short => self.try_get_i16(idx).map(|v| Value::Int(v as i64)),
            DataType::Int => self.try_get_i32(idx).map(|v| Value::Int(v as i64)),
            DataType::Long => self.try_get_i64(idx).map(Value::Int),
            DataType::IntUnsigned => self.try_get_u64(idx).map(Value::Uint),
            DataType::Float => self.try_get_f32(idx).map(|v| Value::Float(v as f64)),
            DataType::Double => self.try_get_f64(idx).map(Value::Float),
            DataType::Decimal => self.try_get_bigdecimal(idx).map(Value::Decimal),
            DataType::Boolean => self.try_get_bool(idx).map(Value::Boolean),
            DataType::Date => self.try_get_date(idx).map(Value::Date),
            DataType::Timestamp => self.try_get_naive_timestamp(idx).map(Value::TimestampNaive),
            DataType::TimestampTz => self.try_get_timestamp(idx).map(Value::Timestamp),
            DataType::String | DataType::VarChar | DataType::Char => {
                self.try_get_string(idx).map(Value::String)
            }
            DataType::Null => None,
        }
    }

    fn try_get<M, P>(&self, idx: usize) -> Option<M>
    where
        M: FromValue,
        P: FromSqlOwned,
        M: From<P>,
    {
        match self {
            DbRow::MySqlRow(row) => row
                .get_opt::<Option<M>, _>(idx)
                .and_then(|res| res.ok())
                .flatten(),
            DbRow::PostgresRow(row) => row.try_get::<_, Option<P>>(idx).ok().flatten().map(M::from),
        }
    }

    /// MySQL widens every integer column to i64; Postgres is strict about width.
    pub fn try_get_i16(&self, idx: usize) -> Option<i16> {
        match self {
            DbRow::MySqlRow(_) => self.try_get_i64(idx).and_then(|v| i16::try_from(v).ok()),
            DbRow::PostgresRow(_) => self.try_get::<i16, i16>(idx),
        }
    }

    pub fn try_get_i32(&self, idx: usize) -> Option<i32> {
        match self {
            DbRow::MySqlRow(_) => self.try_get_i64(idx).and_then(|v| i32::try_from(v).ok()),
            DbRow::PostgresRow(_) => self.try_get::<i32, i32>(idx),
        }
    }

    pub fn try_get_i64(&self, idx: usize) -> Option<i64> {
        self.try_get::<i64, i64>(idx)
    }

    pub fn try_get_u64(&self, idx: usize) -> Option<u64> {
        match self {
            DbRow::MySqlRow(row) => row
                .get_opt::<Option<u64>, _>(idx)
                .and_then(|res| res.ok())
                .flatten(),
            DbRow::PostgresRow(_) => self.try_get_i64(idx).and_then(|v| u64::try_from(v).ok()),
        }
    }

    pub fn try_get_f32(&self, idx: usize) -> Option<f32> {
        match self {
            DbRow::MySqlRow(_) => self.try_get_f64(idx).map(|v| v as f32),
            DbRow::PostgresRow(_) => self.try_get::<f32, f32>(idx),
        }
    }

    pub fn try_get_f64(&self, idx: usize) -> Option<f64> {
        self.try_get::<f64, f64>(idx)
    }

    pub fn try_get_bigdecimal(&self, idx: usize) -> Option<BigDecimal> {
        match self {
            DbRow::MySqlRow(row) => row
                .get_opt::<Option<BigDecimal>, _>(idx)
                .and_then(|res| res.ok())
                .flatten(),
            DbRow::PostgresRow(row) => row
                .try_get::<_, Option<RustDecimal>>(idx)
                .ok()
                .flatten()
                .and_then(|d| BigDecimal::from_str(&d.to_string()).ok()),
        }
    }

    pub fn try_get_string(&self, idx: usize) -> Option<String> {
        self.try_get::<String, String>(idx)
    }

    pub fn try_get_bool(&self, idx: usize) -> Option<bool> {
        self.try_get::<bool, bool>(idx)
    }

    pub fn try_get_date(&self, idx: usize) -> Option<NaiveDate> {
        self.try_get::<NaiveDate, NaiveDate>(idx)
    }

    pub fn try_get_naive_timestamp(&self, idx: usize) -> Option<NaiveDateTime> {
        self.try_get::<NaiveDateTime, NaiveDateTime>(idx)
    }

    pub fn try_get_timestamp(&self, idx: usize) -> Option<DateTime<Utc>> {
        match self {
            DbRow::MySqlRow(_) => self.try_get_naive_timestamp(idx).map(|naive| naive.and_utc()),
            DbRow::PostgresRow(row) => row
                .try_get::<_, Option<DateTime<Utc>>>(idx)
                .ok()
                .flatten(),
        }
    }
}

impl fmt::Debug for DbRow<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DbRow::MySqlRow(row) => write!(f, "{row:?}"),
            DbRow::PostgresRow(row) => write!(f, "{row:?}"),
        }
    }
}
