//! Error types for dispatch

use thiserror::Error;

/// Transport status category for deliberate rejections.
///
/// jalki-core carries no transport types. A handler or factory that wants
/// a specific wire status picks a category here; the gateway maps it 1:1
/// onto the transport's status code and forwards the message unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectCode {
    /// The message is malformed or fails structural validation.
    InvalidArgument,
    /// The system is not in a state to take this message.
    FailedPrecondition,
    /// Quota or capacity exhausted.
    ResourceExhausted,
    /// A required downstream collaborator is unavailable.
    Unavailable,
    /// Internal failure the handler chose to surface explicitly.
    Internal,
}

/// Error raised while dispatching one message.
///
/// Every variant stays inside the dispatch boundary: the intake loop
/// classifies it into a status for that one message and the stream lives
/// on. Only [`DispatchError::Rejected`] reaches the remote caller with
/// its own description; the other variants are masked to a generic
/// status and logged for operators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The envelope could not be converted into a dispatch request.
    #[error("request conversion failed: {0}")]
    Conversion(String),

    /// The processing handler failed.
    #[error("handler failed: {0}")]
    Handler(String),

    /// A deliberate rejection carrying an explicit transport status.
    #[error("rejected: {message}")]
    Rejected {
        /// Status category to report.
        code: RejectCode,
        /// Description sent to the remote caller verbatim.
        message: String,
    },
}

impl DispatchError {
    /// Deliberate rejection with an explicit status category.
    pub fn rejected(code: RejectCode, message: impl Into<String>) -> Self {
        DispatchError::Rejected {
            code,
            message: message.into(),
        }
    }

    /// True when this failure carries an explicit transport status.
    pub fn is_explicit(&self) -> bool {
        matches!(self, DispatchError::Rejected { .. })
    }
}
