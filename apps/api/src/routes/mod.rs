pub mod generate;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_upload_resume;
use crate::builder::handlers::handle_chat;
use crate::cover_letter::handlers::handle_cover_letter;
use crate::session::handlers::{
    handle_get_session, handle_list_versions, handle_save_version, handle_set_streaming,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Gateways
        .route("/api/generate", post(generate::handle_generate))
        .route(
            "/api/upload-resume",
            post(handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/cover-letter", post(handle_cover_letter))
        // Conversation
        .route("/api/chat", post(handle_chat))
        .route("/api/session", get(handle_get_session))
        .route(
            "/api/session/versions",
            get(handle_list_versions).post(handle_save_version),
        )
        .route("/api/session/streaming", post(handle_set_streaming))
        .with_state(state)
}
