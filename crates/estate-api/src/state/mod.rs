//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration, and upload storage.

use std::sync::Arc;

use estate_common::{AppConfig, JwtService};
use estate_service::ServiceContext;

use crate::storage::UploadStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Destination for uploaded images
    uploads: Arc<UploadStore>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let uploads = UploadStore::from_config(&config.storage);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            uploads: Arc::new(uploads),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the upload storage
    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("uploads", &self.uploads)
            .finish()
    }
}
