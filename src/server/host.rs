//! Server host for transport-agnostic API exposure
//!
//! The host carries everything an exposure needs to serve the API and is
//! the single source of truth for the application state.

use crate::config::AppConfig;
use crate::core::service::RecordService;
use crate::records::handlers::AppState;
use std::sync::Arc;

/// Host context containing all application state
pub struct ServerHost {
    /// Record service shared by every handler
    pub records: Arc<dyn RecordService>,

    /// Process configuration
    pub config: Arc<AppConfig>,
}

impl ServerHost {
    pub fn new(records: Arc<dyn RecordService>, config: AppConfig) -> Self {
        Self {
            records,
            config: Arc::new(config),
        }
    }

    /// Handler state for the record routes
    pub fn app_state(&self) -> AppState {
        AppState::new(self.records.clone())
    }
}
