//! State handed to every handler: the service context plus the loaded
//! configuration, both behind `Arc` so cloning per request is cheap.

use std::sync::Arc;

use social_common::{AppConfig, JwtService};
use social_core::MediaPolicy;
use social_service::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Verifies bearer tokens in the auth extractor
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    /// Upload limits applied to multipart bodies
    pub fn media_policy(&self) -> &MediaPolicy {
        self.service_context.media_policy()
    }

    /// Name of the session cookie
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }

    /// Whether the session cookie carries the `Secure` attribute
    pub fn cookie_secure(&self) -> bool {
        self.config.session.cookie_secure
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
