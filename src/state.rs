//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }

    /// Builds the state around a store.
    pub fn with_repository(repository: Arc<dyn LinkRepository>) -> Self {
        Self::new(Arc::new(LinkService::new(repository)))
    }
}
