//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::services::reporter::{ErrorReporter, TracingReporter};
use crate::store::DocumentStore;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`s, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Document store backing every repository
    pub store: Arc<dyn DocumentStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Receives failures that are swallowed instead of returned
    pub reporter: Arc<dyn ErrorReporter>,
}

impl AppState {
    /// Create a new application state that reports through `tracing`
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replace the error reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Get a reference to the document store
    #[inline]
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn reporter(&self) -> &dyn ErrorReporter {
        self.reporter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn test_state_clone_shares_store() {
        let state = AppState::new(Arc::new(InMemoryStore::new()), AppConfig::default());
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.store, &cloned.store));
        assert!(cloned.store().health_check().await.is_ok());
    }
}
