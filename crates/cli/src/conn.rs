use crate::error::CliError;
use connectors::{adapter::Adapter, error::AdapterError, sql::base::adapter::DatabaseKind};
use tracing::{error, info, warn};

/// Connects to the store behind `url` and round-trips `SELECT 1`.
pub async fn ping(url: &str) -> Result<DatabaseKind, CliError> {
    let target = redact(url);
    info!("Pinging {target}");

    let adapter = Adapter::from_url(url).await.map_err(|e| {
        error!("Connection to {target} failed: {e}");
        CliError::Adapter(e)
    })?;

    let kind = adapter.get_sql().kind();
    if let Err(e) = adapter.get_sql().ping().await {
        error!("Ping query on {target} failed: {e}");
        return Err(CliError::Db(e));
    }

    info!("{kind:?} ping to {target} succeeded");
    adapter.close().await?;
    Ok(kind)
}

/// Combines a command's result with the outcome of closing its stores.
///
/// The command's own error wins; a close failure only surfaces when the
/// command itself succeeded.
pub fn settle<T, E>(result: Result<T, E>, closed: Result<(), AdapterError>) -> Result<T, CliError>
where
    CliError: From<E>,
{
    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(err), Ok(())) => Err(err.into()),
        (Err(err), Err(close_err)) => {
            warn!("Failed to close store connections: {close_err}");
            Err(err.into())
        }
    }
}

/// Strips the password from a connection URL for display.
pub fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}
