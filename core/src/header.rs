//! Wire header and the payload-variant registry
//!
//! Every message handed to dispatch carries a fixed four-byte header: a
//! signature byte identifying the framing scheme, a wire format version,
//! and a type code identifying the payload variant. The triple comes from
//! a const registry keyed by [`PayloadKind`] - adding a future variant is
//! one new table row, the intake code never changes.
//!
//! # Wire form
//!
//! ```text
//! ┌───────────┬─────────┬──────────────────────┐
//! │ signature │ version │ type code (u16, BE)  │
//! │  1 byte   │ 1 byte  │       2 bytes        │
//! └───────────┴─────────┴──────────────────────┘
//! ```
//!
//! The layout is bit-stable: implementations on both sides of the wire
//! must produce identical bytes for the same variant.

use bytes::{Buf, BufMut};
use std::fmt;
use thiserror::Error;

/// Fixed signature byte identifying the framing scheme.
pub const SIGNATURE: u8 = 0xEF;

/// Current wire format version.
pub const VERSION_V2: u8 = 0x20;

/// Length of the encoded header in bytes.
pub const WIRE_LEN: usize = 4;

/// Payload variant discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// A complete trace span record.
    Span,
    /// A partial span record, sent when span data arrives incrementally.
    SpanChunk,
}

impl PayloadKind {
    /// Stable lowercase name, used for log fields and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::Span => "span",
            PayloadKind::SpanChunk => "span-chunk",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the wire registry.
struct WireSpec {
    kind: PayloadKind,
    version: u8,
    type_code: u16,
}

/// The wire registry: payload variant -> (version, type code).
///
/// A future payload variant gets a new row here and nothing else changes.
const WIRE_TABLE: &[WireSpec] = &[
    WireSpec {
        kind: PayloadKind::Span,
        version: VERSION_V2,
        type_code: 40,
    },
    WireSpec {
        kind: PayloadKind::SpanChunk,
        version: VERSION_V2,
        type_code: 70,
    },
];

fn wire_spec(kind: PayloadKind) -> &'static WireSpec {
    for spec in WIRE_TABLE {
        if spec.kind == kind {
            return spec;
        }
    }
    // The registry is total over PayloadKind; tests keep it that way.
    unreachable!("no wire registry row for {kind:?}")
}

/// Look up the payload variant for a wire type code.
pub fn kind_for_code(type_code: u16) -> Option<PayloadKind> {
    WIRE_TABLE
        .iter()
        .find(|spec| spec.type_code == type_code)
        .map(|spec| spec.kind)
}

/// Message framing header: signature, version, payload type code.
///
/// Built once per message from the payload's declared variant, never from
/// payload contents. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    signature: u8,
    version: u8,
    type_code: u16,
}

impl Header {
    /// Build the header for a payload variant from the wire registry.
    pub fn for_kind(kind: PayloadKind) -> Self {
        let spec = wire_spec(kind);
        Self {
            signature: SIGNATURE,
            version: spec.version,
            type_code: spec.type_code,
        }
    }

    /// The framing signature byte.
    pub fn signature(&self) -> u8 {
        self.signature
    }

    /// The wire format version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The payload type code.
    pub fn type_code(&self) -> u16 {
        self.type_code
    }

    /// The payload variant this header identifies.
    pub fn kind(&self) -> PayloadKind {
        match kind_for_code(self.type_code) {
            Some(kind) => kind,
            // Headers only come from the registry (for_kind/decode).
            None => unreachable!("header carries unregistered type code {}", self.type_code),
        }
    }

    /// Encode to the bit-stable wire form.
    pub fn encode(&self) -> [u8; WIRE_LEN] {
        let mut buf = [0u8; WIRE_LEN];
        let mut cursor = &mut buf[..];
        cursor.put_u8(self.signature);
        cursor.put_u8(self.version);
        cursor.put_u16(self.type_code);
        buf
    }

    /// Decode from the wire form, validating signature, version, and
    /// type code.
    pub fn decode(mut buf: &[u8]) -> Result<Self, HeaderError> {
        if buf.remaining() < WIRE_LEN {
            return Err(HeaderError::Truncated { len: buf.remaining() });
        }
        let signature = buf.get_u8();
        if signature != SIGNATURE {
            return Err(HeaderError::BadSignature(signature));
        }
        let version = buf.get_u8();
        let type_code = buf.get_u16();
        let kind = kind_for_code(type_code).ok_or(HeaderError::UnknownType(type_code))?;
        if version != wire_spec(kind).version {
            return Err(HeaderError::UnknownVersion(version));
        }
        Ok(Self {
            signature,
            version,
            type_code,
        })
    }
}

/// Error decoding a wire header.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// Buffer shorter than the fixed header length.
    #[error("truncated header: {len} bytes, need {WIRE_LEN}")]
    Truncated {
        /// Bytes actually available.
        len: usize,
    },

    /// Signature byte does not identify this framing scheme.
    #[error("bad signature byte: {0:#04x}")]
    BadSignature(u8),

    /// Wire format version not understood.
    #[error("unsupported wire version: {0:#04x}")]
    UnknownVersion(u8),

    /// Type code with no registered payload variant.
    #[error("unknown payload type code: {0}")]
    UnknownType(u16),
}
