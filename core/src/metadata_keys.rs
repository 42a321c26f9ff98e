//! Reserved metadata key constants for JALKI envelopes
//!
//! Intake attaches transport context to each envelope under these keys so
//! downstream handlers can read it without coupling to the transport.

/// Sending agent's identifier, taken from the `jalki-agent-id` request
/// header when present.
pub const AGENT_ID: &str = "jalki.agent.id";

/// Remote peer address of the stream that carried the message.
pub const REMOTE_ADDR: &str = "jalki.remote.addr";

/// Intake endpoint that accepted the message ("SendSpan"/"SendSpanChunk").
pub const ENDPOINT: &str = "jalki.endpoint";
