//! The dispatch gateway
//!
//! Converts an envelope into a [`DispatchRequest`] and forwards it to the
//! processing handler. Every failure comes back as an explicit
//! [`DispatchError`] return - the "never escapes the stream" contract is
//! enforced by the signature, not by convention.

use bytes::Bytes;
use jalki_core::{
    DispatchError, DispatchHandler, DispatchRequest, Envelope, Payload, RequestFactory,
};
use std::sync::Arc;

/// Default limit on the encoded payload size (4 MiB, the transport's
/// default message cap).
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Default request factory.
///
/// Encodes the payload and enforces a maximum encoded body size; an
/// oversized payload is a structural conversion failure.
#[derive(Debug, Clone)]
pub struct DefaultRequestFactory {
    max_body_bytes: usize,
}

impl DefaultRequestFactory {
    /// Factory with the default body size limit.
    pub fn new() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the maximum encoded body size.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

impl Default for DefaultRequestFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestFactory for DefaultRequestFactory {
    fn build<P: Payload>(&self, envelope: Envelope<P>) -> Result<DispatchRequest, DispatchError> {
        let (header, metadata, payload) = envelope.into_parts();
        let body = payload.encode_to_vec();
        if body.len() > self.max_body_bytes {
            return Err(DispatchError::Conversion(format!(
                "encoded payload is {} bytes, limit is {}",
                body.len(),
                self.max_body_bytes
            )));
        }
        Ok(DispatchRequest::new(header, metadata, Bytes::from(body)))
    }
}

/// Connects intake to processing: request factory in front, pluggable
/// handler behind.
pub struct DispatchGateway<F = DefaultRequestFactory> {
    factory: F,
    handler: Arc<dyn DispatchHandler>,
}

impl DispatchGateway<DefaultRequestFactory> {
    /// Gateway with the default request factory.
    pub fn new(handler: Arc<dyn DispatchHandler>) -> Self {
        Self {
            factory: DefaultRequestFactory::new(),
            handler,
        }
    }
}

impl<F: RequestFactory> DispatchGateway<F> {
    /// Gateway with a custom request factory.
    pub fn with_factory(factory: F, handler: Arc<dyn DispatchHandler>) -> Self {
        Self { factory, handler }
    }

    /// Name of the handler behind this gateway.
    pub fn handler_name(&self) -> &'static str {
        self.handler.name()
    }

    /// Convert and forward one envelope.
    ///
    /// Exactly one dispatch attempt per envelope; the call resolves only
    /// after the handler has finished with the message.
    pub async fn dispatch<P: Payload>(&self, envelope: Envelope<P>) -> Result<(), DispatchError> {
        let request = self.factory.build(envelope)?;
        self.handler.handle(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::proto::Span;
    use async_trait::async_trait;
    use jalki_core::{PayloadKind, RejectCode};
    use parking_lot::Mutex;
    use prost::Message;

    fn make_span(operation: &str) -> Span {
        Span {
            trace_id: "t-1".into(),
            span_id: "s-1".into(),
            parent_span_id: String::new(),
            service: "checkout".into(),
            operation: operation.into(),
            start_unix_ns: 1_700_000_000_000_000_000,
            duration_ns: 42_000,
            tags: Default::default(),
            agent_id: "agent-1".into(),
        }
    }

    struct RecordingHandler {
        requests: Mutex<Vec<DispatchRequest>>,
        fail_with: Option<DispatchError>,
    }

    impl RecordingHandler {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                fail_with: None,
            })
        }

        fn failing(err: DispatchError) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                fail_with: Some(err),
            })
        }
    }

    #[async_trait]
    impl DispatchHandler for RecordingHandler {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn handle(&self, request: DispatchRequest) -> Result<(), DispatchError> {
            self.requests.lock().push(request);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_factory_encodes_payload() {
        let factory = DefaultRequestFactory::new();
        let span = make_span("checkout.pay");
        let request = factory.build(Envelope::new(span.clone())).unwrap();

        assert_eq!(request.header().kind(), PayloadKind::Span);
        let decoded = Span::decode(request.body().clone()).unwrap();
        assert_eq!(decoded, span);
    }

    #[test]
    fn test_factory_carries_metadata_through() {
        let factory = DefaultRequestFactory::new();
        let envelope = Envelope::new(make_span("op")).with_metadata("jalki.endpoint", "SendSpan");
        let request = factory.build(envelope).unwrap();

        assert_eq!(
            request.metadata().get("jalki.endpoint"),
            Some(&"SendSpan".to_string())
        );
    }

    #[test]
    fn test_factory_rejects_oversized_body() {
        let factory = DefaultRequestFactory::new().max_body_bytes(16);
        let mut span = make_span("op");
        span.operation = "x".repeat(1024);

        let err = factory.build(Envelope::new(span)).unwrap_err();
        assert!(matches!(err, DispatchError::Conversion(_)));
        assert!(!err.is_explicit());
    }

    #[tokio::test]
    async fn test_dispatch_forwards_to_handler() {
        let handler = RecordingHandler::ok();
        let gateway = DispatchGateway::new(handler.clone());

        gateway.dispatch(Envelope::new(make_span("op"))).await.unwrap();

        let requests = handler.requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header().type_code(), 40);
    }

    #[tokio::test]
    async fn test_dispatch_returns_handler_error() {
        let handler =
            RecordingHandler::failing(DispatchError::Handler("downstream timeout".into()));
        let gateway = DispatchGateway::new(handler.clone());

        let err = gateway
            .dispatch(Envelope::new(make_span("op")))
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::Handler("downstream timeout".into()));
        // The handler was still invoked once.
        assert_eq!(handler.requests.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_skips_handler_on_conversion_failure() {
        let handler = RecordingHandler::ok();
        let factory = DefaultRequestFactory::new().max_body_bytes(1);
        let gateway = DispatchGateway::with_factory(factory, handler.clone());

        let err = gateway
            .dispatch(Envelope::new(make_span("op")))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Conversion(_)));
        assert!(handler.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_passes_explicit_rejection_unchanged() {
        let rejection = DispatchError::rejected(RejectCode::InvalidArgument, "missing trace id");
        let handler = RecordingHandler::failing(rejection.clone());
        let gateway = DispatchGateway::new(handler);

        let err = gateway
            .dispatch(Envelope::new(make_span("op")))
            .await
            .unwrap_err();
        assert_eq!(err, rejection);
        assert!(err.is_explicit());
    }
}
