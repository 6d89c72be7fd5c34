use crate::error::TransferError;
use connectors::sql::base::source::TransferSource;
use model::{
    records::batch::Batch,
    transfer::{watermark::TransferMode, window::TimeWindow},
};
use tracing::debug;

/// Fetches one window of joined source rows.
pub struct BatchExtractor<'a> {
    source: &'a dyn TransferSource,
}

impl<'a> BatchExtractor<'a> {
    pub fn new(source: &'a dyn TransferSource) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, window: TimeWindow, mode: TransferMode) -> Result<Batch, TransferError> {
        let rows = self
            .source
            .fetch_window(&window, mode)
            .await
            .map_err(TransferError::on_read)?;
        debug!(%window, %mode, rows = rows.len(), "Extracted window");
        Ok(Batch::new(window, rows))
    }
}
