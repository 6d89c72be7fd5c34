use crate::{
    commands::{Commands, SettingsArgs, StoreArgs},
    env::{DEST_URL_VAR, EnvManager, SOURCE_URL_VAR},
    error::CliError,
};
use clap::Parser;
use connectors::{
    adapter::Adapter,
    error::AdapterError,
    sql::base::{destination::SqlTransferDestination, source::SqlTransferSource},
};
use engine_core::{
    config::TransferConfig, metrics::Metrics, orchestrator::TransferOrchestrator,
    watermark::resolve_watermark,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "txsync",
    version = "0.1.0",
    about = "Incremental windowed transfer of transactions into a denormalized table"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Both ends of a transfer, connected.
struct Stores {
    source: Adapter,
    destination: Adapter,
}

impl Stores {
    /// Closes both ends, even when the first close fails.
    async fn close(self) -> Result<(), AdapterError> {
        let source = self.source.close().await;
        let destination = self.destination.close().await;
        source.and(destination)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            stores,
            settings,
            json,
        } => {
            let config = load_config(&settings)?;
            let stores = connect(stores).await?;

            let reader =
                SqlTransferSource::new(stores.source.clone().into_shared(), config.schema.clone());
            let writer = SqlTransferDestination::new(
                stores.destination.clone().into_shared(),
                config.schema.clone(),
            )
            .with_max_rows_per_statement(config.insert_chunk_rows);

            let metrics = Metrics::new();
            let result = TransferOrchestrator::new(&reader, &writer, &config)
                .with_metrics(metrics.clone())
                .run()
                .await;

            let outcome = conn::settle(result, stores.close().await)?;
            output::print_outcome(&outcome, &metrics.snapshot(), json)?;
        }
        Commands::Watermark {
            stores,
            settings,
            json,
        } => {
            let config = load_config(&settings)?;
            let stores = connect(stores).await?;

            let reader =
                SqlTransferSource::new(stores.source.clone().into_shared(), config.schema.clone());
            let writer =
                SqlTransferDestination::new(stores.destination.clone().into_shared(), config.schema);
            let watermark = resolve_watermark(&reader, &writer).await;

            let watermark = conn::settle(watermark, stores.close().await)?;
            output::print_watermark(watermark.as_ref(), json)?;
        }
        Commands::TestConn { url } => {
            let kind = conn::ping(&url).await?;
            println!("{kind:?} connection OK");
        }
    }

    Ok(())
}

fn load_config(settings: &SettingsArgs) -> Result<TransferConfig, CliError> {
    let mut config = match &settings.config {
        Some(path) => TransferConfig::from_file(path)?,
        None => TransferConfig::default(),
    };
    if let Some(window_secs) = settings.window_secs {
        config.window_secs = window_secs;
    }
    if let Some(max_windows) = settings.max_windows {
        config.max_windows = Some(max_windows);
    }
    config.validate()?;
    Ok(config)
}

async fn connect(args: StoreArgs) -> Result<Stores, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = &args.env_file {
        env.load_from_file(path)?;
    }
    let source_url = env.resolve_url(args.source, "--source", SOURCE_URL_VAR)?;
    let dest_url = env.resolve_url(args.dest, "--dest", DEST_URL_VAR)?;

    info!(
        "Connecting source {} and destination {}",
        conn::redact(&source_url),
        conn::redact(&dest_url)
    );
    Ok(Stores {
        source: Adapter::from_url(&source_url).await?,
        destination: Adapter::from_url(&dest_url).await?,
    })
}
