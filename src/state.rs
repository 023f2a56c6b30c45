//! Shared application state injected into every handler.

use std::sync::Arc;

use chrono::Duration;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::CodeGenerator;

/// Dependencies handed to handlers through axum's `State` extractor.
///
/// Built once at startup and cloned per request; the clones share the
/// same repository and code generator.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Retention window reported by the health endpoint.
    pub link_ttl: Duration,
}

impl AppState {
    /// Wires the service graph from its storage and code-generation dependencies.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        link_ttl: Duration,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository, code_generator)),
            link_ttl,
        }
    }
}
