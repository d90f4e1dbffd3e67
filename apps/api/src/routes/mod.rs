pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Feedback normalization and analysis prompts
        .route("/api/v1/feedback/normalize", post(analysis::handle_normalize))
        .route(
            "/api/v1/analysis/instructions",
            post(analysis::handle_instructions),
        )
        // Resume library
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes)
                .post(resumes::handle_create_resume)
                .delete(resumes::handle_wipe_resumes),
        )
        .route("/api/v1/resumes/summary", get(resumes::handle_summary))
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume).delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/feedback",
            put(resumes::handle_attach_feedback),
        )
        .route(
            "/api/v1/resumes/:id/enhanced",
            put(resumes::handle_attach_enhanced),
        )
        .with_state(state)
}
