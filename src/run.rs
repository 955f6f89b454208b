//! Command execution.
//!
//! API commands issue one request and print the JSON result; `serve`
//! hosts the vote receiver until a shutdown signal arrives.

use std::io;
use std::net::SocketAddr;

use serde_json::{Value, json};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use topgg::api::{ApiError, BotsQuery, Client, StatsPayload};
use topgg::config::{Command, ValidatedConfig, WebhookSettings};
use topgg::transport::HttpClient;
use topgg::webhook::{Exchange, HandlerError, Listener, WebhookPayload, router};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The API call failed.
    #[error("Top.gg API error: {0}")]
    Api(#[from] ApiError),

    /// The command needs a token but none was configured.
    #[error("No API token configured")]
    MissingToken,

    /// Failed to bind the receiver socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The receiver stopped with an I/O error.
    #[error("Webhook server error: {0}")]
    Serve(#[source] io::Error),

    /// Failed to render the result.
    #[error("Failed to render result: {0}")]
    Output(#[from] serde_json::Error),
}

/// Executes the configured command.
///
/// # Errors
///
/// Returns an error if the API call fails, or if the receiver cannot be
/// bound or stops unexpectedly.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires network
/// access and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    match &config.command {
        Command::Init { .. } => Ok(()),
        Command::Serve { .. } => serve(&config.webhook).await,
        command => {
            let token = config.token.as_deref().ok_or(RunError::MissingToken)?;
            let client = Client::new(token, config.client_options())?;
            let result = run_api_command(&client, command, &config.query).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

/// Runs one API command and returns its result as JSON.
async fn run_api_command<H: HttpClient>(
    client: &Client<H>,
    command: &Command,
    query: &BotsQuery,
) -> Result<Value, RunError> {
    let result = match command {
        Command::Stats => serde_json::to_value(client.get_stats().await?)?,
        Command::PostStats {
            server_count,
            shard_count,
            shard_id,
        } => {
            let payload = stats_payload(server_count, *shard_count, *shard_id);
            serde_json::to_value(client.post_stats(payload).await?)?
        }
        Command::Bot { id } => client.get_bot(id).await?,
        Command::User { id } => client.get_user(id).await?,
        Command::Bots { .. } => client.get_bots(query).await?,
        Command::Votes { page } => client.get_votes(*page).await?,
        Command::Voted { user_id } => json!({ "voted": client.has_voted(user_id).await? }),
        Command::Weekend => json!({ "is_weekend": client.is_weekend().await? }),
        Command::Init { .. } | Command::Serve { .. } => Value::Null,
    };

    Ok(result)
}

/// Builds the stats payload; a single count is a total, several are per shard.
fn stats_payload(server_count: &[i64], shard_count: Option<u64>, shard_id: Option<u64>) -> StatsPayload {
    let mut payload = match server_count {
        [total] => StatsPayload::new(*total),
        counts => StatsPayload::new(counts.to_vec()),
    };
    if let Some(shard_count) = shard_count {
        payload = payload.with_shard_count(shard_count);
    }
    if let Some(shard_id) = shard_id {
        payload = payload.with_shard_id(shard_id);
    }
    payload
}

/// Listener logging each verified vote.
fn vote_listener(
    settings: &WebhookSettings,
) -> Listener<impl Fn(WebhookPayload, &mut Exchange) -> Result<(), HandlerError> + Send + Sync + 'static>
{
    Listener::new(settings.verifier(), |vote: WebhookPayload, _: &mut Exchange| {
        tracing::info!(
            bot = %vote.bot,
            user = %vote.user,
            kind = %vote.kind,
            weekend = vote.is_weekend.unwrap_or(false),
            test = vote.is_test(),
            "Vote received"
        );
        Ok(())
    })
}

/// Hosts the vote receiver until Ctrl+C.
///
/// Excluded from coverage - requires a bound socket and signal handling.
#[cfg(not(tarpaulin_include))]
async fn serve(settings: &WebhookSettings) -> Result<(), RunError> {
    let app = router(&settings.path, vote_listener(settings));

    let listener = TcpListener::bind(settings.listen)
        .await
        .map_err(|source| RunError::Bind {
            addr: settings.listen,
            source,
        })?;

    tracing::info!(
        "Listening for votes on http://{}{}",
        settings.listen,
        settings.path
    );
    if settings.authorization.is_none() {
        tracing::warn!("No webhook authorization configured, accepting unauthenticated requests");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(RunError::Serve)?;

    tracing::info!("Shutdown signal received, stopped");
    Ok(())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
