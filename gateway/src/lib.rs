//! JALKI - Trace Ingestion Gateway
//!
//! The ingestion edge of a distributed-tracing collector. Remote agents
//! stream complete spans and span fragments over gRPC; each inbound
//! payload is framed into a versioned envelope and handed to a pluggable
//! dispatch pipeline.
//!
//! # Architecture
//!
//! ```text
//! agent streams ──► TraceIngest ──► Envelope ──► DispatchGateway ──► DispatchHandler
//!                   (SendSpan,      (header +    (request factory,   (pluggable)
//!                    SendSpanChunk)  metadata)    error classifier)
//! ```
//!
//! Intake and processing are isolated from each other: a per-message
//! dispatch failure is classified into a status for that one message and
//! the stream lives on. A transport failure on one stream never touches
//! other streams.

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod server;
pub mod service;

// Proto types generated from jalki/v1/trace.proto
pub mod proto {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::derive_partial_eq_without_eq)]

    include!("proto/jalki.v1.rs");

    pub use trace_ingest_client::TraceIngestClient;
    pub use trace_ingest_server::{TraceIngest, TraceIngestServer};

    use jalki_core::{Payload, PayloadKind};

    impl Payload for Span {
        const KIND: PayloadKind = PayloadKind::Span;
    }

    impl Payload for SpanChunk {
        const KIND: PayloadKind = PayloadKind::SpanChunk;
    }
}

pub use config::{Config, LogFormat};
pub use dispatch::{DefaultRequestFactory, DispatchGateway};
pub use error::{GatewayError, Result};
pub use handler::{LoggingHandler, PipelineHandler};
pub use metrics::Metrics;
pub use service::TraceIngestService;

// Re-export core types so gateway users need a single import path.
pub use jalki_core::{
    metadata_keys, DispatchError, DispatchHandler, DispatchRequest, Envelope, Header, Payload,
    PayloadKind, RejectCode, RequestFactory,
};
