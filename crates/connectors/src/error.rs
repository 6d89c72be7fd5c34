use crate::sql::base::error::ConnectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The connection string names a store we have no adapter for.
    #[error("Unsupported connection scheme: {0}")]
    UnsupportedScheme(String),

    /// Failed to initialize a data connector/adapter.
    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Failed to close adapter: {0}")]
    Close(String),
}
