use connectors::{error::AdapterError, sql::base::error::DbError};
use engine_core::{config::ConfigError, error::TransferError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid environment: {0}")]
    Env(String),

    #[error("Missing {flag}: pass it on the command line or set {var}")]
    MissingUrl {
        flag: &'static str,
        var: &'static str,
    },

    #[error("Invalid transfer configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to connect: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Store error: {0}")]
    Db(#[from] DbError),

    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
