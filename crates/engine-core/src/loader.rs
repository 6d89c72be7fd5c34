use crate::error::TransferError;
use connectors::sql::base::destination::TransferDestination;
use model::records::batch::Batch;
use tracing::{debug, warn};

/// Writes a fetched batch into the destination in one atomic load.
pub struct BatchLoader<'a> {
    destination: &'a dyn TransferDestination,
}

impl<'a> BatchLoader<'a> {
    pub fn new(destination: &'a dyn TransferDestination) -> Self {
        Self { destination }
    }

    /// Returns the number of rows written. An empty batch writes nothing.
    pub async fn load(&self, batch: &Batch) -> Result<u64, TransferError> {
        if batch.is_empty() {
            return Ok(0);
        }
        let written = self
            .destination
            .load_batch(&batch.rows)
            .await
            .map_err(TransferError::on_write)
            .inspect_err(|e| {
                if let TransferError::SchemaShape { row, .. } = e {
                    warn!(window = %batch.window, row, "Batch rows disagree on column layout");
                }
            })?;
        debug!(window = %batch.window, rows = written, "Loaded batch");
        Ok(written)
    }
}
