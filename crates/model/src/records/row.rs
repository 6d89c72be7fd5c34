use crate::core::value::{FieldValue, Value};
use serde::{Deserialize, Serialize};

/// A row addressable by column name, as returned by the store drivers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.field_values.iter().map(|f| f.name.as_str()).collect()
    }

    /// True when both rows carry the same columns in the same order.
    pub fn same_shape(&self, other: &RowData) -> bool {
        self.field_values.len() == other.field_values.len()
            && self
                .field_values
                .iter()
                .zip(other.field_values.iter())
                .all(|(a, b)| a.name.eq_ignore_ascii_case(&b.name))
    }

    /// Values in column order, `NULL` for missing ones.
    pub fn values(&self) -> Vec<Value> {
        self.field_values
            .iter()
            .map(|f| f.value.clone().unwrap_or(Value::Null))
            .collect()
    }
}
