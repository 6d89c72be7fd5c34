use crate::{
    config::TransferConfig,
    error::TransferError,
    extractor::BatchExtractor,
    loader::BatchLoader,
    metrics::Metrics,
    report::{TransferOutcome, TransferReport},
    watermark::resolve_watermark,
};
use chrono::NaiveDateTime;
use connectors::sql::base::{destination::TransferDestination, source::TransferSource};
use model::transfer::{watermark::Watermark, window::TimeWindow};
use std::{fmt, time::Instant};
use tracing::{debug, error, info};

/// Where the orchestrator is in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferState {
    Resolving,
    Looping {
        origin: Watermark,
        window: TimeWindow,
    },
    /// Stopped at an empty window, or at `max_windows` when `truncated`.
    Done {
        origin: Watermark,
        last_window_end: NaiveDateTime,
        truncated: bool,
    },
    EmptySource,
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferState::Resolving => write!(f, "RESOLVING"),
            TransferState::Looping { origin, window } => {
                write!(f, "LOOPING({}, {window})", origin.mode)
            }
            TransferState::Done { .. } => write!(f, "DONE"),
            TransferState::EmptySource => write!(f, "EMPTY_SOURCE"),
        }
    }
}

/// Drives resolve -> fetch -> load -> advance until a window comes back empty.
///
/// Every step awaits the previous one; a failure at any step ends the run.
pub struct TransferOrchestrator<'a> {
    source: &'a dyn TransferSource,
    destination: &'a dyn TransferDestination,
    config: &'a TransferConfig,
    metrics: Metrics,
}

impl<'a> TransferOrchestrator<'a> {
    pub fn new(
        source: &'a dyn TransferSource,
        destination: &'a dyn TransferDestination,
        config: &'a TransferConfig,
    ) -> Self {
        Self {
            source,
            destination,
            config,
            metrics: Metrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub async fn run(&self) -> Result<TransferOutcome, TransferError> {
        let result = self.drive().await;
        if let Err(err) = &result {
            self.metrics.increment_failures(1);
            error!(%err, "Transfer aborted");
        }
        result
    }

    async fn drive(&self) -> Result<TransferOutcome, TransferError> {
        self.config.validate()?;

        let started = Instant::now();
        let extractor = BatchExtractor::new(self.source);
        let loader = BatchLoader::new(self.destination);

        let mut windows_loaded = 0u64;
        let mut rows_loaded = 0u64;
        let mut state = TransferState::Resolving;

        loop {
            debug!(%state, "Transfer state");
            state = match state {
                TransferState::Resolving => {
                    match resolve_watermark(self.source, self.destination).await? {
                        None => TransferState::EmptySource,
                        Some(origin) => TransferState::Looping {
                            origin,
                            window: TimeWindow::starting_at(
                                origin.start,
                                self.config.window_width()?,
                            )?,
                        },
                    }
                }
                TransferState::Looping { origin, window } => {
                    if self
                        .config
                        .max_windows
                        .is_some_and(|max| windows_loaded >= max)
                    {
                        info!("Reached max_windows={windows_loaded}, stopping before {window}");
                        TransferState::Done {
                            origin,
                            last_window_end: window.start,
                            truncated: true,
                        }
                    } else {
                        let batch = extractor.fetch(window, origin.mode).await?;
                        self.metrics.increment_windows(1);

                        if batch.is_empty() {
                            TransferState::Done {
                                origin,
                                last_window_end: window.end,
                                truncated: false,
                            }
                        } else {
                            let written = loader.load(&batch).await?;
                            windows_loaded += 1;
                            rows_loaded += written;
                            self.metrics.increment_batches(1);
                            self.metrics.increment_records(written);
                            info!("Window {window} loaded: {written} rows");

                            TransferState::Looping {
                                origin,
                                window: window.next()?,
                            }
                        }
                    }
                }
                TransferState::EmptySource => return Ok(TransferOutcome::NothingToTransfer),
                TransferState::Done {
                    origin,
                    last_window_end,
                    truncated,
                } => {
                    info!(
                        "Transfer completed: {rows_loaded} rows in {windows_loaded} windows, stopped at {last_window_end}"
                    );
                    return Ok(TransferOutcome::Completed(TransferReport {
                        mode: origin.mode,
                        start: origin.start,
                        windows_loaded,
                        rows_loaded,
                        last_window_end,
                        elapsed_ms: started.elapsed().as_millis() as u64,
                        truncated,
                    }));
                }
            };
        }
    }
}

/// Runs one transfer with default metrics.
pub async fn run_transfer(
    source: &dyn TransferSource,
    destination: &dyn TransferDestination,
    config: &TransferConfig,
) -> Result<TransferOutcome, TransferError> {
    TransferOrchestrator::new(source, destination, config)
        .run()
        .await
}
