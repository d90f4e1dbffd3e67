use std::sync::Arc;

use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store. Default: RedisResumeStore; in-memory in tests.
    pub store: Arc<dyn ResumeStore>,
}
