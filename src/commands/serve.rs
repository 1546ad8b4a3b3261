//! Serve command - Starts the HTTP server.

use std::future::Future;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Connect and apply pending migrations
    let db = Database::connect(config.database_url.as_str())
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let app_state = AppState::from_database(Arc::new(db));
    let app = create_router(app_state);

    let config = Config {
        server_host: args.host.unwrap_or(config.server_host),
        server_port: args.port.unwrap_or(config.server_port),
        ..config
    };
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves once `signal` fires; never resolves if the listener failed.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving; the process can still be stopped externally
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal, draining connections...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn shutdown_waits_on_signal() {
        let result = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_shutdown(async { Ok(()) }),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn failed_signal_listener_keeps_serving() {
        let failing = async { Err(std::io::Error::other("no signal handler")) };

        let result =
            tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(failing)).await;

        assert!(result.is_err(), "server must not stop when the listener fails");
    }
}
