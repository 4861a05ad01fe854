//! Logging macros for external calls and routing decisions.

/// Log an external service call
#[macro_export]
macro_rules! log_external_call {
    ($service:expr, $operation:expr) => {
        tracing::debug!(target: "external", service = $service, operation = $operation, "calling external service");
    };
    ($service:expr, $operation:expr, $duration_ms:expr, $status:expr) => {
        tracing::debug!(target: "external", service = $service, operation = $operation, duration_ms = $duration_ms, status = $status, "external call completed");
    };
}

/// Log a fallback from one retrieval tool to the next
#[macro_export]
macro_rules! log_fallback {
    ($from:expr, $to:expr, $reason:expr) => {
        tracing::info!(target: "routing", from = %$from, to = %$to, reason = $reason, "falling back");
    };
}
