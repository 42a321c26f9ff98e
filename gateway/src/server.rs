//! Server wiring
//!
//! Binds an intake service to a listen address and runs it with graceful
//! shutdown on Ctrl+C / SIGTERM.

use crate::error::Result;
use crate::proto::trace_ingest_server::{TraceIngest, TraceIngestServer};
use std::net::SocketAddr;
use tokio::signal;
use tonic::transport::Server;
use tracing::info;

/// Serve an intake service until the process is told to stop.
///
/// # Example
///
/// ```ignore
/// use jalki_gateway::{LoggingHandler, TraceIngestService};
/// use std::sync::Arc;
///
/// let service = TraceIngestService::new(Arc::new(LoggingHandler::new()));
/// jalki_gateway::server::serve(service, "0.0.0.0:50051".parse()?).await?;
/// ```
pub async fn serve<S>(service: S, addr: SocketAddr) -> Result<()>
where
    S: TraceIngest,
{
    info!(%addr, "gRPC server listening");

    Server::builder()
        .add_service(TraceIngestServer::new(service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
