//! Reporting of failures that are logged instead of returned

use tracing::error;

/// Sink for errors a service handles internally
pub trait ErrorReporter: Send + Sync {
    fn report(&self, operation: &str, error: &(dyn std::error::Error + 'static));
}

/// Default reporter: one structured `error!` event per failure
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, operation: &str, error: &(dyn std::error::Error + 'static)) {
        error!(operation, error = %error, "Operation failed");
    }
}
