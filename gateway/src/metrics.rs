//! Prometheus metrics for JALKI

use crate::error::{GatewayError, Result};
use jalki_core::DispatchError;
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};
use std::sync::OnceLock;

/// Global metrics instance
static METRICS: OnceLock<Metrics> = OnceLock::new();

/// All JALKI metrics
pub struct Metrics {
    /// Payloads received on intake streams (by payload kind)
    pub payloads_received: CounterVec,

    /// Per-message dispatch failures (by payload kind, failure class)
    pub dispatch_failures: CounterVec,

    /// Streams completed (by payload kind, outcome)
    pub streams_completed: CounterVec,

    /// Streams currently open
    pub streams_active: Gauge,
}

impl Metrics {
    /// Register all metrics and install the global instance.
    ///
    /// A second call in the same process returns a metrics error.
    pub fn init() -> Result<()> {
        let metrics = Metrics {
            payloads_received: register_counter_vec!(
                "jalki_payloads_received_total",
                "Payloads received on intake streams",
                &["kind"]
            )
            .map_err(|e| GatewayError::Metrics(e.to_string()))?,
            dispatch_failures: register_counter_vec!(
                "jalki_dispatch_failures_total",
                "Per-message dispatch failures",
                &["kind", "class"]
            )
            .map_err(|e| GatewayError::Metrics(e.to_string()))?,
            streams_completed: register_counter_vec!(
                "jalki_streams_completed_total",
                "Intake streams completed",
                &["kind", "outcome"]
            )
            .map_err(|e| GatewayError::Metrics(e.to_string()))?,
            streams_active: register_gauge!(
                "jalki_streams_active",
                "Intake streams currently open"
            )
            .map_err(|e| GatewayError::Metrics(e.to_string()))?,
        };

        METRICS
            .set(metrics)
            .map_err(|_| GatewayError::Metrics("metrics already initialized".to_string()))
    }

    /// The installed instance, if [`Metrics::init`] has run.
    pub fn handle() -> Option<&'static Metrics> {
        METRICS.get()
    }
}

/// Stable label value for a dispatch failure class.
pub(crate) fn failure_class(err: &DispatchError) -> &'static str {
    match err {
        DispatchError::Conversion(_) => "conversion",
        DispatchError::Handler(_) => "handler",
        DispatchError::Rejected { .. } => "rejected",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use jalki_core::RejectCode;

    #[test]
    fn test_failure_class_labels() {
        assert_eq!(
            failure_class(&DispatchError::Conversion("x".into())),
            "conversion"
        );
        assert_eq!(failure_class(&DispatchError::Handler("x".into())), "handler");
        assert_eq!(
            failure_class(&DispatchError::rejected(RejectCode::Internal, "x")),
            "rejected"
        );
    }

    #[test]
    fn test_init_then_handle() {
        // init() may race with other tests in this binary; either this
        // call installs the instance or a previous one already did.
        let _ = Metrics::init();
        assert!(Metrics::handle().is_some());

        // A second init must not panic, just report the duplicate.
        assert!(Metrics::init().is_err());
    }
}
