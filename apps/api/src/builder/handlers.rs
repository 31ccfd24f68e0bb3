use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::builder::classifier::Intent;
use crate::builder::ResumeBuilder;
use crate::errors::AppError;
use crate::models::resume::{BuilderState, ResumeContext, ResumeSection};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub intent: Intent,
    pub state: BuilderState,
    pub context: ResumeContext,
    pub sections: Vec<ResumeSection>,
    pub is_complete: bool,
}

/// POST /api/chat
///
/// Runs one builder turn. A message sent while another chat turn is in flight
/// gets 409; other session routes only wait for the lock.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let _permit = state.begin_chat()?;
    let mut session = state.session.lock().await;

    let builder = ResumeBuilder::new(state.generator.clone());
    let turn = builder.handle_message(&mut session, &request.message).await;

    let context = session.context().clone();
    Ok(Json(ChatResponse {
        reply: turn.reply,
        intent: turn.intent,
        state: context.state(),
        is_complete: context.is_complete,
        context,
        sections: session.sections().to_vec(),
    }))
}
