use crate::config::ConfigError;
use connectors::sql::base::error::DbError;
use model::transfer::window::WindowError;
use thiserror::Error;

/// Why a transfer run stopped early. Every variant is fatal to the run;
/// an empty source is reported through the outcome, not here.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Store connection failed: {0}")]
    StoreConnection(DbError),

    #[error("Store query failed: {0}")]
    StoreQuery(DbError),

    #[error("Store write failed: {0}")]
    StoreWrite(DbError),

    #[error("Batch is not uniform: row {row} has columns {found:?}, expected {expected:?}")]
    SchemaShape {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Window(#[from] WindowError),
}

impl TransferError {
    /// Classifies a failure of a read (watermark or window fetch).
    pub fn on_read(err: DbError) -> Self {
        Self::classify(err, TransferError::StoreQuery)
    }

    /// Classifies a failure of a batch load.
    pub fn on_write(err: DbError) -> Self {
        Self::classify(err, TransferError::StoreWrite)
    }

    fn classify(err: DbError, otherwise: fn(DbError) -> TransferError) -> Self {
        match err {
            DbError::SchemaShape {
                row,
                expected,
                found,
            } => TransferError::SchemaShape {
                row,
                expected,
                found,
            },
            err if err.is_connection() => TransferError::StoreConnection(err),
            err => otherwise(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_win_over_stage() {
        let err = TransferError::on_write(DbError::Connection("refused".into()));
        assert!(matches!(err, TransferError::StoreConnection(_)));
    }

    #[test]
    fn test_stage_decides_query_or_write() {
        assert!(matches!(
            TransferError::on_read(DbError::Unknown("boom".into())),
            TransferError::StoreQuery(_)
        ));
        assert!(matches!(
            TransferError::on_write(DbError::Write("duplicate key".into())),
            TransferError::StoreWrite(_)
        ));
    }

    #[test]
    fn test_shape_error_is_lifted() {
        let err = TransferError::on_write(DbError::SchemaShape {
            row: 3,
            expected: vec!["id".into()],
            found: vec!["uid".into()],
        });
        match err {
            TransferError::SchemaShape { row, .. } => assert_eq!(row, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
