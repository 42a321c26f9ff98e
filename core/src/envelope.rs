//! The message envelope
//!
//! The [`Envelope`] is the framed unit that flows from intake to dispatch:
//! a wire [`Header`] derived from the payload's declared variant, a
//! metadata block for out-of-band context, and the payload itself.
//! Exactly one envelope is built per inbound payload, and it is never
//! reused or mutated once dispatch begins.
//!
//! # Lazy metadata
//!
//! Most messages carry no metadata, so the map is lazily allocated -
//! `None` until the first entry is attached, and readers get a shared
//! empty map when nothing was set.

use crate::header::{Header, PayloadKind};
use std::collections::HashMap;

/// Type alias for metadata storage - lazy allocation
pub type Metadata = Option<Box<HashMap<String, String>>>;

/// Helper to get metadata or empty map
#[inline]
pub(crate) fn metadata_ref(m: &Metadata) -> &HashMap<String, String> {
    static EMPTY: std::sync::OnceLock<HashMap<String, String>> = std::sync::OnceLock::new();
    m.as_ref()
        .map(|b| b.as_ref())
        .unwrap_or_else(|| EMPTY.get_or_init(HashMap::new))
}

/// A wire payload variant.
///
/// Binds a payload type to its [`PayloadKind`] at compile time: the wire
/// triple in the envelope header comes from this declaration, never from
/// payload contents, so a corrupt payload cannot forge a different type
/// code.
pub trait Payload: prost::Message + Default {
    /// The variant this payload type carries on the wire.
    const KIND: PayloadKind;
}

/// The framed unit passed from intake to dispatch.
///
/// # Example
///
/// ```ignore
/// use jalki_core::{metadata_keys, Envelope};
///
/// let envelope = Envelope::new(span).with_metadata(metadata_keys::AGENT_ID, "agent-7");
/// assert_eq!(envelope.header().type_code(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct Envelope<P> {
    header: Header,
    metadata: Metadata,
    payload: P,
}

impl<P: Payload> Envelope<P> {
    /// Frame a payload.
    ///
    /// Pure and infallible for well-typed input; the header triple comes
    /// from `P::KIND` through the wire registry.
    pub fn new(payload: P) -> Self {
        Self {
            header: Header::for_kind(P::KIND),
            metadata: None,
            payload,
        }
    }
}

impl<P> Envelope<P> {
    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(|| Box::new(HashMap::new()))
            .insert(key.into(), value.into());
        self
    }

    /// The wire header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Metadata reference (empty map when nothing was attached).
    pub fn metadata(&self) -> &HashMap<String, String> {
        metadata_ref(&self.metadata)
    }

    /// The framed payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Split into header, metadata, and payload.
    pub fn into_parts(self) -> (Header, Metadata, P) {
        (self.header, self.metadata, self.payload)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, ::prost::Message)]
    struct TestSpan {
        #[prost(string, tag = "1")]
        trace_id: ::prost::alloc::string::String,
    }

    impl Payload for TestSpan {
        const KIND: PayloadKind = PayloadKind::Span;
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    struct TestChunk {
        #[prost(uint32, tag = "1")]
        sequence: u32,
    }

    impl Payload for TestChunk {
        const KIND: PayloadKind = PayloadKind::SpanChunk;
    }

    #[test]
    fn test_header_bound_to_variant() {
        let span = Envelope::new(TestSpan {
            trace_id: "t-1".into(),
        });
        assert_eq!(span.header().type_code(), 40);
        assert_eq!(span.header().kind(), PayloadKind::Span);

        let chunk = Envelope::new(TestChunk { sequence: 3 });
        assert_eq!(chunk.header().type_code(), 70);
        assert_eq!(chunk.header().kind(), PayloadKind::SpanChunk);
    }

    #[test]
    fn test_header_never_derived_from_contents() {
        // Two wildly different payload values of the same type always
        // carry the same wire triple.
        let a = Envelope::new(TestSpan {
            trace_id: String::new(),
        });
        let b = Envelope::new(TestSpan {
            trace_id: "x".repeat(10_000),
        });
        assert_eq!(a.header(), b.header());
    }

    #[test]
    fn test_metadata_lazy_and_empty_by_default() {
        let envelope = Envelope::new(TestSpan {
            trace_id: "t-1".into(),
        });
        assert!(envelope.metadata().is_empty());

        let (_, metadata, _) = envelope.into_parts();
        assert!(metadata.is_none());
    }

    #[test]
    fn test_with_metadata() {
        let envelope = Envelope::new(TestSpan {
            trace_id: "t-1".into(),
        })
        .with_metadata("jalki.agent.id", "agent-7")
        .with_metadata("tenant", "acme");

        assert_eq!(
            envelope.metadata().get("jalki.agent.id"),
            Some(&"agent-7".to_string())
        );
        assert_eq!(envelope.metadata().get("tenant"), Some(&"acme".to_string()));
    }

    #[test]
    fn test_into_parts() {
        let envelope = Envelope::new(TestSpan {
            trace_id: "t-9".into(),
        })
        .with_metadata("key", "value");

        let (header, metadata, payload) = envelope.into_parts();
        assert_eq!(header.kind(), PayloadKind::Span);
        assert_eq!(
            metadata.unwrap().get("key"),
            Some(&"value".to_string())
        );
        assert_eq!(payload.trace_id, "t-9");
    }
}
