//! Minimal ingest server: logs every dispatched message.
//!
//! ```sh
//! cargo run --example ingest_server
//! ```
//!
//! Then stream spans at localhost:50051 with any `jalki.v1.TraceIngest`
//! client.

use jalki_gateway::{config, Config, LoggingHandler, Metrics, TraceIngestService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    config::init_tracing(&cfg);
    Metrics::init()?;

    let service = TraceIngestService::new(Arc::new(LoggingHandler::new()));
    jalki_gateway::server::serve(service, cfg.grpc_addr).await?;

    Ok(())
}
