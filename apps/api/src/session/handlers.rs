use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::message::Message;
use crate::models::resume::{BuilderState, ResumeVersion};
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: BuilderState,
    #[serde(flatten)]
    pub session: Session,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingToggle {
    pub is_streaming: bool,
}

/// GET /api/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session.lock().await;
    Json(SessionSnapshot {
        state: session.context().state(),
        session: session.clone(),
    })
}

/// GET /api/session/versions
pub async fn handle_list_versions(State(state): State<AppState>) -> Json<Vec<ResumeVersion>> {
    let session = state.session.lock().await;
    Json(session.versions().to_vec())
}

/// POST /api/session/versions
///
/// Snapshots the live résumé sections.
pub async fn handle_save_version(
    State(state): State<AppState>,
) -> (StatusCode, Json<ResumeVersion>) {
    let mut session = state.session.lock().await;
    let version = session.save_version().clone();
    (StatusCode::CREATED, Json(version))
}

/// POST /api/session/streaming
///
/// Sets the streaming flag of the latest message once the client finishes rendering it.
pub async fn handle_set_streaming(
    State(state): State<AppState>,
    Json(toggle): Json<StreamingToggle>,
) -> Result<Json<Message>, AppError> {
    let mut session = state.session.lock().await;
    let message = session
        .set_streaming(toggle.is_streaming)
        .cloned()
        .ok_or_else(|| AppError::Validation("There are no messages yet".to_string()))?;
    Ok(Json(message))
}
