use crate::{records::transaction::DenormalizedRecord, transfer::window::TimeWindow};

/// Rows extracted from one time window, ready to be loaded.
#[derive(Debug, Clone)]
pub struct Batch {
    pub window: TimeWindow,
    pub rows: Vec<DenormalizedRecord>,
}

impl Batch {
    pub fn new(window: TimeWindow, rows: Vec<DenormalizedRecord>) -> Self {
        Batch { window, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
