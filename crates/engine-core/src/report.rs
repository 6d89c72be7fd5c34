use chrono::NaiveDateTime;
use model::transfer::watermark::TransferMode;
use serde::Serialize;

/// How a run ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransferOutcome {
    /// Neither store had a watermark; no window was fetched and nothing was written.
    NothingToTransfer,
    Completed(TransferReport),
}

impl TransferOutcome {
    pub fn report(&self) -> Option<&TransferReport> {
        match self {
            TransferOutcome::NothingToTransfer => None,
            TransferOutcome::Completed(report) => Some(report),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub mode: TransferMode,
    pub start: NaiveDateTime,
    /// Non-empty windows that were loaded.
    pub windows_loaded: u64,
    pub rows_loaded: u64,
    /// End of the first empty window, or of the last loaded one when truncated.
    pub last_window_end: NaiveDateTime,
    pub elapsed_ms: u64,
    /// The run stopped on `max_windows` rather than on an empty window.
    pub truncated: bool,
}
