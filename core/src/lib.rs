//! jalki-core - Core types for the JALKI trace ingestion gateway
//!
//! This crate provides the foundational types shared between the JALKI
//! gateway and external processing handlers:
//!
//! - [`Envelope`] - the framed unit passed from intake to dispatch
//! - [`Header`] / the wire registry - payload variant to wire triple
//! - [`DispatchRequest`] - the transport-agnostic form handlers consume
//! - [`DispatchHandler`] / [`RequestFactory`] traits - the pluggable seam
//!   between intake and processing
//! - [`DispatchError`] - error type for dispatch operations
//! - [`metadata_keys`] - reserved metadata key constants
//!
//! # Why this crate exists
//!
//! Processing handlers plug into the gateway behind the [`DispatchHandler`]
//! trait. Without `jalki-core`, a handler crate would depend on
//! `jalki-gateway`, and a gateway wanting to ship that handler as a built-in
//! would depend back on it. Extracting the shared types here breaks the
//! cycle:
//!
//! ```text
//! jalki-core ◄── jalki-gateway
//!     ▲
//!     └────────── handler crates
//! ```
//!
//! The crate is transport-free on purpose: nothing here knows about gRPC.
//! Deliberate wire statuses are expressed through [`RejectCode`] and mapped
//! onto the transport at the gateway boundary.

#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(missing_docs)]

/// Dispatch request and the capability traits around it
pub mod dispatch;
/// The message envelope
pub mod envelope;
mod error;
/// Wire header and the payload-variant registry
pub mod header;
/// Reserved metadata key constants for JALKI envelopes
pub mod metadata_keys;

pub use dispatch::{DispatchHandler, DispatchRequest, RequestFactory};
pub use envelope::{Envelope, Metadata, Payload};
pub use error::{DispatchError, RejectCode};
pub use header::{Header, HeaderError, PayloadKind};
