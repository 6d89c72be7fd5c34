use serde::{Deserialize, Serialize};

/// Alias of the fact table in generated queries.
pub const SOURCE_ALIAS: &str = "t";
/// Alias of the lookup table in generated queries.
pub const LOOKUP_ALIAS: &str = "ot";
/// Alias of the aggregate column returned by watermark queries.
pub const WATERMARK_ALIAS: &str = "date";

/// Column names shared by the source tables and the destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub id: String,
    pub timestamp: String,
    pub operation_ref: String,
    pub movement: String,
    pub amount: String,
    /// Key column of the lookup table.
    pub lookup_id: String,
    /// Display-name column of the lookup table.
    pub lookup_name: String,
    /// Name the lookup display name takes in the destination table.
    pub name_alias: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            id: "id".into(),
            timestamp: "dt".into(),
            operation_ref: "idoper".into(),
            movement: "move".into(),
            amount: "amount".into(),
            lookup_id: "id".into(),
            lookup_name: "name".into(),
            name_alias: "name_oper".into(),
        }
    }
}

/// Tables and columns a transfer runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSchema {
    pub source_table: String,
    pub lookup_table: String,
    pub destination_table: String,
    pub columns: ColumnNames,
}

impl Default for TransferSchema {
    fn default() -> Self {
        TransferSchema {
            source_table: "transactions".into(),
            lookup_table: "operation_types".into(),
            destination_table: "transactions_denormalized".into(),
            columns: ColumnNames::default(),
        }
    }
}

impl TransferSchema {
    /// Fact-table columns projected by the window query, in destination order.
    pub fn source_columns(&self) -> [&str; 5] {
        let c = &self.columns;
        [
            c.id.as_str(),
            c.timestamp.as_str(),
            c.operation_ref.as_str(),
            c.movement.as_str(),
            c.amount.as_str(),
        ]
    }

    pub fn destination_columns(&self) -> [&str; 6] {
        let c = &self.columns;
        [
            c.id.as_str(),
            c.timestamp.as_str(),
            c.operation_ref.as_str(),
            c.movement.as_str(),
            c.amount.as_str(),
            c.name_alias.as_str(),
        ]
    }

    /// Every identifier that ends up in generated SQL.
    pub fn identifiers(&self) -> Vec<&str> {
        let c = &self.columns;
        vec![
            self.source_table.as_str(),
            self.lookup_table.as_str(),
            self.destination_table.as_str(),
            c.id.as_str(),
            c.timestamp.as_str(),
            c.operation_ref.as_str(),
            c.movement.as_str(),
            c.amount.as_str(),
            c.lookup_id.as_str(),
            c.lookup_name.as_str(),
            c.name_alias.as_str(),
        ]
    }
}
