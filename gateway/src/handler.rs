//! Built-in dispatch handlers
//!
//! The processing side of the gateway is a capability trait; these are
//! the stock implementations. Deployments plug in their own handler for
//! real storage or aggregation.

use async_trait::async_trait;
use jalki_core::{DispatchError, DispatchHandler, DispatchRequest};
use tokio::sync::mpsc;
use tracing::info;

/// Handler that logs each request and drops it.
///
/// Useful as a pipeline stand-in during bring-up.
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    /// Create a new logging handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DispatchHandler for LoggingHandler {
    fn name(&self) -> &'static str {
        "logging"
    }

    async fn handle(&self, request: DispatchRequest) -> Result<(), DispatchError> {
        info!(
            id = %request.id(),
            kind = %request.header().kind(),
            body_len = request.body().len(),
            "dispatched message"
        );
        Ok(())
    }
}

/// Handler that hands requests to a processing pipeline over a bounded
/// channel.
///
/// Backpressure applies at the channel: a full pipeline makes `handle`
/// wait, which in turn holds up only the originating stream. A closed
/// pipeline surfaces as a handler failure on the message that hit it.
pub struct PipelineHandler {
    tx: mpsc::Sender<DispatchRequest>,
}

impl PipelineHandler {
    /// Handler with a fresh bounded channel; returns the receiving end
    /// for the pipeline to consume.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<DispatchRequest>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Handler over an existing sender.
    pub fn from_sender(tx: mpsc::Sender<DispatchRequest>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl DispatchHandler for PipelineHandler {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    async fn handle(&self, request: DispatchRequest) -> Result<(), DispatchError> {
        self.tx
            .send(request)
            .await
            .map_err(|e| DispatchError::Handler(e.to_string()))
    }
}
