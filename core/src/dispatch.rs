//! Dispatch request and the capability traits around it
//!
//! [`DispatchRequest`] is the transport-agnostic form a processing handler
//! consumes. A [`RequestFactory`] builds one from an envelope and a
//! [`DispatchHandler`] processes it. Both are capability traits so any
//! implementation can plug in without touching the intake code.

use crate::envelope::{metadata_ref, Envelope, Metadata, Payload};
use crate::error::DispatchError;
use crate::header::Header;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// The transport-agnostic dispatch unit.
///
/// Carries the wire header and metadata of the originating envelope plus
/// the encoded payload bytes. Ownership passes to the handler for the
/// duration of its call; the request is never reused afterwards.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    id: ulid::Ulid,
    header: Header,
    metadata: Metadata,
    body: Bytes,
    received_at: i64,
}

impl DispatchRequest {
    /// Build a request from envelope parts and an encoded body.
    ///
    /// Stamps a fresh id and the current receive time.
    pub fn new(header: Header, metadata: Metadata, body: Bytes) -> Self {
        Self {
            id: ulid::Ulid::new(),
            header,
            metadata,
            body,
            received_at: chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0),
        }
    }

    /// Unique id for log correlation.
    pub fn id(&self) -> ulid::Ulid {
        self.id
    }

    /// Wire header of the originating envelope.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Metadata carried over from the envelope (empty map when none).
    pub fn metadata(&self) -> &HashMap<String, String> {
        metadata_ref(&self.metadata)
    }

    /// Encoded payload bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Receive time, unix nanoseconds.
    pub fn received_at(&self) -> i64 {
        self.received_at
    }
}

/// Builds a [`DispatchRequest`] from an envelope.
///
/// May fail when the envelope is structurally invalid for the factory's
/// contract. The failure is classified at the gateway boundary and never
/// raised past it.
pub trait RequestFactory: Send + Sync {
    /// Convert the envelope into its dispatchable form.
    fn build<P: Payload>(&self, envelope: Envelope<P>) -> Result<DispatchRequest, DispatchError>;
}

/// Processes dispatched requests.
///
/// Implementations are opaque to the intake core: they may block, hit
/// downstream systems, and fail for internal reasons. A failure is
/// reported back on the originating stream, scoped to that one message.
///
/// # Example
///
/// ```ignore
/// use jalki_core::{DispatchError, DispatchHandler, DispatchRequest};
///
/// struct StoreHandler;
///
/// #[async_trait::async_trait]
/// impl DispatchHandler for StoreHandler {
///     fn name(&self) -> &'static str {
///         "store"
///     }
///
///     async fn handle(&self, request: DispatchRequest) -> Result<(), DispatchError> {
///         // decode request.body() and persist it
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait DispatchHandler: Send + Sync {
    /// Unique name for this handler (for logging and metrics).
    fn name(&self) -> &'static str;

    /// Process one request.
    async fn handle(&self, request: DispatchRequest) -> Result<(), DispatchError>;
}
