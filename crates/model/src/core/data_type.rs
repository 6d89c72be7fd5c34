use serde::{Deserialize, Serialize};
use std::fmt;

/// Column types the synchronizer knows how to decode.
///
/// Anything outside this set is decoded as [`DataType::String`] by the row
/// readers, which keeps unknown driver types readable without failing a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    Short,
    Int,
    Long,
    IntUnsigned,
    Float,
    Double,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    TimestampTz,
    VarChar,
    Char,
    String,
    Null,
}

impl DataType {
    pub fn from_mysql_type(type_name: &str) -> Result<Self, String> {
        match Self::normalize_type_name(type_name).as_str() {
            "tinyint" | "smallint" | "year" => Ok(DataType::Short),
            "mediumint" | "int" | "integer" => Ok(DataType::Int),
            "bigint" => Ok(DataType::Long),
            "int unsigned" | "bigint unsigned" => Ok(DataType::IntUnsigned),
            "float" => Ok(DataType::Float),
            "double" | "real" => Ok(DataType::Double),
            "decimal" | "newdecimal" | "numeric" => Ok(DataType::Decimal),
            "bool" | "boolean" | "bit" => Ok(DataType::Boolean),
            "date" => Ok(DataType::Date),
            "datetime" | "timestamp" => Ok(DataType::Timestamp),
            "varchar" | "var_string" => Ok(DataType::VarChar),
            "char" | "string" => Ok(DataType::Char),
            "text" | "tinytext" | "mediumtext" | "longtext" | "enum" => Ok(DataType::String),
            "null" => Ok(DataType::Null),
            _ => Err(format!("Unknown MySQL column type: {type_name}")),
        }
    }

    pub fn from_postgres_type(type_name: &str) -> Result<Self, String> {
        match Self::normalize_type_name(type_name).as_str() {
            "int2" | "smallint" => Ok(DataType::Short),
            "int4" | "integer" | "int" => Ok(DataType::Int),
            "int8" | "bigint" => Ok(DataType::Long),
            "float4" | "real" => Ok(DataType::Float),
            "float8" | "double precision" => Ok(DataType::Double),
            "numeric" | "decimal" => Ok(DataType::Decimal),
            "bool" | "boolean" => Ok(DataType::Boolean),
            "date" => Ok(DataType::Date),
            "timestamp" | "timestamp without time zone" => Ok(DataType::Timestamp),
            "timestamptz" | "timestamp with time zone" => Ok(DataType::TimestampTz),
            "varchar" | "character varying" => Ok(DataType::VarChar),
            "bpchar" | "char" | "character" => Ok(DataType::Char),
            "text" | "name" => Ok(DataType::String),
            _ => Err(format!("Unknown Postgres column type: {type_name}")),
        }
    }

    /// Lowercases and strips a length/precision suffix, e.g. `DECIMAL(10,2)` -> `decimal`.
    fn normalize_type_name(type_name: &str) -> String {
        let lowered = type_name.trim().to_lowercase();
        match lowered.find('(') {
            Some(idx) => {
                let (head, tail) = lowered.split_at(idx);
                let suffix = tail
                    .find(')')
                    .map(|end| tail[end + 1..].trim())
                    .unwrap_or_default();
                if suffix.is_empty() {
                    head.trim().to_string()
                } else {
                    format!("{} {}", head.trim(), suffix)
                }
            }
            None => lowered,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Short | DataType::Int | DataType::Long | DataType::IntUnsigned
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
