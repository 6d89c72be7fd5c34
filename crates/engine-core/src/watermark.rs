use crate::error::TransferError;
use connectors::sql::base::{destination::TransferDestination, source::TransferSource};
use model::transfer::watermark::Watermark;
use tracing::info;

/// Decides where a run starts.
///
/// The destination watermark wins whenever it exists: the run resumes from
/// the latest loaded timestamp. Only an empty destination falls back to the
/// earliest source timestamp. `None` means there is nothing to transfer.
pub async fn resolve_watermark(
    source: &dyn TransferSource,
    destination: &dyn TransferDestination,
) -> Result<Option<Watermark>, TransferError> {
    let last_loaded = destination
        .max_timestamp()
        .await
        .map_err(TransferError::on_read)?;

    if let Some(date) = last_loaded {
        info!("Last entry found in destination table on {date}. Resume transfer");
        return Ok(Some(Watermark::resume(date)));
    }

    let first_available = source
        .min_timestamp()
        .await
        .map_err(TransferError::on_read)?;

    match first_available {
        Some(date) => {
            info!("No entry found in destination table. Begins a new transfer");
            Ok(Some(Watermark::fresh(date)))
        }
        None => {
            info!("Nothing to transfer. The source table is empty");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDestination, MemorySource, at};
    use model::transfer::watermark::TransferMode;
    use tracing_test::traced_test;

    #[traced_test]
    #[tokio::test]
    async fn test_resume_when_destination_has_rows() {
        let source = MemorySource::scenario();
        let destination = MemoryDestination::default();
        destination.insert_raw(MemorySource::record(1, at(9, 0), 1, "A"));
        destination.insert_raw(MemorySource::record(2, at(9, 30), 1, "A"));

        let watermark = resolve_watermark(&source, &destination).await.unwrap().unwrap();
        assert_eq!(watermark.mode, TransferMode::Resume);
        assert_eq!(watermark.start, at(9, 30));
        assert!(logs_contain("Last entry found in destination table on 2024-03-01 09:30:00. Resume transfer"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_fresh_when_destination_empty() {
        let source = MemorySource::scenario();
        let destination = MemoryDestination::default();

        let watermark = resolve_watermark(&source, &destination).await.unwrap().unwrap();
        assert_eq!(watermark.mode, TransferMode::Fresh);
        assert_eq!(watermark.start, at(9, 0));
        assert!(logs_contain("No entry found in destination table. Begins a new transfer"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_nothing_when_both_empty() {
        let source = MemorySource::default();
        let destination = MemoryDestination::default();

        assert!(resolve_watermark(&source, &destination).await.unwrap().is_none());
        assert!(logs_contain("Nothing to transfer. The source table is empty"));
    }

    #[tokio::test]
    async fn test_resume_even_if_source_empty() {
        let source = MemorySource::default();
        let destination = MemoryDestination::default();
        destination.insert_raw(MemorySource::record(1, at(8, 0), 1, "A"));

        let watermark = resolve_watermark(&source, &destination).await.unwrap().unwrap();
        assert_eq!(watermark, Watermark::resume(at(8, 0)));
        assert_eq!(source.min_calls(), 0);
    }
}
