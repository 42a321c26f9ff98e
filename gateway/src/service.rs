//! The stream intake channels
//!
//! Two independent client-streaming endpoints, one per payload variant,
//! sharing one intake loop. Each open stream is its own unit of
//! concurrent work; within a stream payloads are handled strictly in
//! arrival order - payload *n* is framed, dispatched, and its outcome
//! recorded before payload *n+1* is read. Across streams, dispatch calls
//! run concurrently and a slow handler holds up only its own stream.
//!
//! # Completion
//!
//! A stream that closes cleanly with no per-message failure gets exactly
//! one empty acknowledgement. When a per-message dispatch fails, the
//! first classified status is latched: intake keeps consuming and
//! dispatching the remaining payloads, and the latched status replaces
//! the ack as the stream's terminal response. A transport error while
//! reading abandons the stream immediately.

use crate::dispatch::{DefaultRequestFactory, DispatchGateway};
use crate::error::classify_dispatch;
use crate::metrics::{failure_class, Metrics};
use crate::proto;
use crate::proto::trace_ingest_server::{TraceIngest, TraceIngestServer};
use jalki_core::{metadata_keys, DispatchHandler, Envelope, Payload, RequestFactory};
use std::sync::Arc;
use tonic::{Request, Response, Status, Streaming};
use tracing::{debug, warn};

/// Request header carrying the sending agent's identifier.
pub const AGENT_ID_HEADER: &str = "jalki-agent-id";

/// gRPC intake service exposing `SendSpan` and `SendSpanChunk`.
///
/// A pure ingress adapter: all processing lives behind the
/// [`DispatchGateway`]. The service itself holds no per-stream state;
/// everything a stream needs lives in its own RPC future and is dropped
/// when the stream ends.
pub struct TraceIngestService<F = DefaultRequestFactory> {
    gateway: DispatchGateway<F>,
}

impl TraceIngestService<DefaultRequestFactory> {
    /// Service with the default request factory in front of `handler`.
    pub fn new(handler: Arc<dyn DispatchHandler>) -> Self {
        Self {
            gateway: DispatchGateway::new(handler),
        }
    }
}

impl<F: RequestFactory + 'static> TraceIngestService<F> {
    /// Service over a pre-built gateway (custom request factory).
    pub fn with_gateway(gateway: DispatchGateway<F>) -> Self {
        Self { gateway }
    }

    /// Wrap into the generated tonic server type.
    pub fn into_server(self) -> TraceIngestServer<Self> {
        TraceIngestServer::new(self)
    }

    /// Consume one stream: envelope, dispatch, and per-message outcome
    /// for every payload, then the stream-level completion.
    async fn intake<P: Payload>(
        &self,
        request: Request<Streaming<P>>,
        rpc: &'static str,
    ) -> Result<Response<()>, Status> {
        let kind = P::KIND;
        if let Some(m) = Metrics::handle() {
            m.streams_active.inc();
        }

        let result = self.run_stream(request, rpc).await;

        if let Some(m) = Metrics::handle() {
            m.streams_active.dec();
            let outcome = match &result {
                Ok(_) => "ok",
                Err(_) => "failed",
            };
            m.streams_completed
                .with_label_values(&[kind.as_str(), outcome])
                .inc();
        }
        result
    }

    async fn run_stream<P: Payload>(
        &self,
        request: Request<Streaming<P>>,
        rpc: &'static str,
    ) -> Result<Response<()>, Status> {
        let kind = P::KIND;
        let remote = request.remote_addr().map(|addr| addr.to_string());
        let agent = request
            .metadata()
            .get(AGENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let mut stream = request.into_inner();

        let mut accepted: u64 = 0;
        let mut first_failure: Option<Status> = None;

        loop {
            match stream.message().await {
                Ok(Some(payload)) => {
                    accepted += 1;
                    debug!(rpc, payload = ?payload, "received payload");
                    if let Some(m) = Metrics::handle() {
                        m.payloads_received.with_label_values(&[kind.as_str()]).inc();
                    }

                    let mut envelope =
                        Envelope::new(payload).with_metadata(metadata_keys::ENDPOINT, rpc);
                    if let Some(addr) = &remote {
                        envelope =
                            envelope.with_metadata(metadata_keys::REMOTE_ADDR, addr.clone());
                    }
                    if let Some(agent) = &agent {
                        envelope = envelope.with_metadata(metadata_keys::AGENT_ID, agent.clone());
                    }

                    if let Err(err) = self.gateway.dispatch(envelope).await {
                        // Full detail for operators; the remote side only
                        // sees the classified status.
                        warn!(rpc, kind = %kind, error = %err, "dispatch failed");
                        if let Some(m) = Metrics::handle() {
                            m.dispatch_failures
                                .with_label_values(&[kind.as_str(), failure_class(&err)])
                                .inc();
                        }
                        first_failure.get_or_insert_with(|| classify_dispatch(&err));
                    }
                }
                Ok(None) => break,
                Err(status) => {
                    warn!(rpc, kind = %kind, error = %status, "stream transport error");
                    return Err(status);
                }
            }
        }

        debug!(rpc, kind = %kind, accepted, "stream completed");
        match first_failure {
            Some(status) => Err(status),
            None => Ok(Response::new(())),
        }
    }
}

#[tonic::async_trait]
impl<F> TraceIngest for TraceIngestService<F>
where
    F: RequestFactory + 'static,
{
    async fn send_span(
        &self,
        request: Request<Streaming<proto::Span>>,
    ) -> Result<Response<()>, Status> {
        self.intake(request, "SendSpan").await
    }

    async fn send_span_chunk(
        &self,
        request: Request<Streaming<proto::SpanChunk>>,
    ) -> Result<Response<()>, Status> {
        self.intake(request, "SendSpanChunk").await
    }
}
