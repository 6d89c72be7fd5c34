use chrono::TimeDelta;
use connectors::sql::base::destination::DEFAULT_MAX_ROWS_PER_STATEMENT;
use model::transfer::schema::TransferSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_WINDOW_SECS: i64 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("window_secs must be a positive number of seconds within range, got {0}")]
    InvalidWindow(i64),

    #[error("max_windows must be greater than zero when set")]
    InvalidMaxWindows,

    #[error("insert_chunk_rows must be greater than zero")]
    InvalidChunkSize,

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Everything a transfer run needs besides the two stores.
///
/// Table and column names sit at the top level of the JSON document next
/// to the loop settings; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    #[serde(flatten)]
    pub schema: TransferSchema,
    pub window_secs: i64,
    pub max_windows: Option<u64>,
    pub insert_chunk_rows: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        TransferConfig {
            schema: TransferSchema::default(),
            window_secs: DEFAULT_WINDOW_SECS,
            max_windows: None,
            insert_chunk_rows: DEFAULT_MAX_ROWS_PER_STATEMENT,
        }
    }
}

impl TransferConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading transfer config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: TransferConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window_width()?;
        if self.max_windows == Some(0) {
            return Err(ConfigError::InvalidMaxWindows);
        }
        if self.insert_chunk_rows == 0 {
            return Err(ConfigError::InvalidChunkSize);
        }
        match self
            .schema
            .identifiers()
            .into_iter()
            .find(|name| !is_valid_identifier(name))
        {
            Some(bad) => Err(ConfigError::InvalidIdentifier(bad.to_string())),
            None => Ok(()),
        }
    }

    /// Rejects widths that are not positive or do not fit a `TimeDelta`.
    pub fn window_width(&self) -> Result<TimeDelta, ConfigError> {
        if self.window_secs <= 0 {
            return Err(ConfigError::InvalidWindow(self.window_secs));
        }
        TimeDelta::try_seconds(self.window_secs)
            .ok_or(ConfigError::InvalidWindow(self.window_secs))
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
