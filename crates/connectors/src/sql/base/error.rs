use model::records::transaction::RecordError;
use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// The store could not be reached or dropped the connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any MySQL driver error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// Any Postgres driver error.
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Writing rows to the database failed at the application level.
    #[error("Write error: {0}")]
    Write(String),

    /// Rows of one batch do not share the same column layout.
    #[error("Row {row} has columns {found:?}, expected {expected:?}")]
    SchemaShape {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A fetched row could not be mapped onto a typed record.
    #[error("Decode error: {0}")]
    Decode(#[from] RecordError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DbError {
    /// Whether the failure is about reaching the store rather than the statement itself.
    pub fn is_connection(&self) -> bool {
        match self {
            DbError::Connection(_) => true,
            DbError::MySql(err) => matches!(err, mysql_async::Error::Io(_)),
            DbError::Postgres(err) => err.is_closed(),
            _ => false,
        }
    }
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("MySQL connector creation failed: {0}")]
    MySql(#[from] mysql_async::Error),

    #[error("Postgres connector creation failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),
}

impl From<ConnectorError> for DbError {
    fn from(err: ConnectorError) -> Self {
        DbError::Connection(err.to_string())
    }
}
