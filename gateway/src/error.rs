//! Error types for the gateway
//!
//! jalki-core errors are transport-free; this module owns the mapping
//! onto `tonic::Status` at the gRPC boundary.

use jalki_core::{DispatchError, RejectCode};
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// gRPC transport error
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// gRPC status error
    #[error("gRPC error: {0}")]
    Grpc(#[from] tonic::Status),

    /// Metrics registration error
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GatewayError> for tonic::Status {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Config(msg) => tonic::Status::invalid_argument(msg),
            GatewayError::Transport(e) => tonic::Status::unavailable(e.to_string()),
            GatewayError::Grpc(status) => status,
            GatewayError::Metrics(msg) => tonic::Status::internal(format!("metrics: {msg}")),
            GatewayError::Io(e) => tonic::Status::internal(e.to_string()),
        }
    }
}

/// Map a [`RejectCode`] onto the transport's status code.
fn status_code(code: RejectCode) -> tonic::Code {
    match code {
        RejectCode::InvalidArgument => tonic::Code::InvalidArgument,
        RejectCode::FailedPrecondition => tonic::Code::FailedPrecondition,
        RejectCode::ResourceExhausted => tonic::Code::ResourceExhausted,
        RejectCode::Unavailable => tonic::Code::Unavailable,
        RejectCode::Internal => tonic::Code::Internal,
    }
}

/// Description reported for non-explicit dispatch failures.
const GENERIC_FAILURE: &str = "bad request";

/// Map a per-message dispatch failure onto the status reported for that
/// message.
///
/// Explicit rejections pass through with code and description unchanged,
/// preserving intentional signaling from inner layers. Everything else
/// collapses to a generic internal status: handler and conversion detail
/// is logged for operators but never marshalled onto the wire.
pub fn classify_dispatch(err: &DispatchError) -> tonic::Status {
    match err {
        DispatchError::Rejected { code, message } => {
            tonic::Status::new(status_code(*code), message.clone())
        }
        DispatchError::Conversion(_) | DispatchError::Handler(_) => {
            tonic::Status::internal(GENERIC_FAILURE)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_to_status() {
        let status: tonic::Status = GatewayError::Config("bad addr".into()).into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);

        let status: tonic::Status =
            GatewayError::Grpc(tonic::Status::unavailable("shutting down")).into();
        assert_eq!(status.code(), tonic::Code::Unavailable);
        assert_eq!(status.message(), "shutting down");
    }

    #[test]
    fn test_classify_masks_handler_detail() {
        let err = DispatchError::Handler("connection pool exhausted at 10.0.0.3".into());
        let status = classify_dispatch(&err);

        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "bad request");
        assert!(!status.message().contains("10.0.0.3"));
    }

    #[test]
    fn test_classify_masks_conversion_detail() {
        let err = DispatchError::Conversion("encoded payload is 9000000 bytes".into());
        let status = classify_dispatch(&err);

        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "bad request");
    }

    #[test]
    fn test_classify_passes_explicit_status_through() {
        let err = DispatchError::rejected(RejectCode::InvalidArgument, "missing trace id");
        let status = classify_dispatch(&err);

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        assert_eq!(status.message(), "missing trace id");
    }

    #[test]
    fn test_reject_code_mapping_is_one_to_one() {
        let cases = [
            (RejectCode::InvalidArgument, tonic::Code::InvalidArgument),
            (RejectCode::FailedPrecondition, tonic::Code::FailedPrecondition),
            (RejectCode::ResourceExhausted, tonic::Code::ResourceExhausted),
            (RejectCode::Unavailable, tonic::Code::Unavailable),
            (RejectCode::Internal, tonic::Code::Internal),
        ];
        for (reject, code) in cases {
            let status = classify_dispatch(&DispatchError::rejected(reject, "x"));
            assert_eq!(status.code(), code);
        }
    }
}
