use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How window bounds are interpreted for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Destination is empty; start at the earliest source row, `[start, end)`.
    Fresh,
    /// Continue after the latest destination row, `(start, end]`.
    Resume,
}

impl TransferMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::Fresh => "fresh",
            TransferMode::Resume => "resume",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transfer progress derived from store contents; never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub mode: TransferMode,
    pub start: NaiveDateTime,
}

impl Watermark {
    pub fn fresh(start: NaiveDateTime) -> Self {
        Watermark {
            mode: TransferMode::Fresh,
            start,
        }
    }

    pub fn resume(start: NaiveDateTime) -> Self {
        Watermark {
            mode: TransferMode::Resume,
            start,
        }
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.mode, self.start)
    }
}
