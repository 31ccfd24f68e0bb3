use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::models::AnalysisResult;
use crate::cover_letter::{compose_cover_letter, LetterTarget};
use crate::errors::AppError;
use crate::state::AppState;

pub const MISSING_ANALYSIS: &str = "Resume analysis is missing. Please upload your resume first.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub job_description: Option<String>,
    /// Overrides the analysis kept from the last upload.
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// POST /api/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let generator = state.generator()?;

    if request.company.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::Validation(
            "company and role cannot be empty".to_string(),
        ));
    }

    let analysis = match request.analysis {
        Some(analysis) => analysis,
        None => state
            .session
            .lock()
            .await
            .analysis()
            .cloned()
            .ok_or_else(|| AppError::Validation(MISSING_ANALYSIS.to_string()))?,
    };

    let target = LetterTarget {
        company: request.company.trim(),
        role: request.role.trim(),
        job_description: request.job_description.as_deref(),
    };
    let cover_letter = compose_cover_letter(generator.as_ref(), &analysis, &target).await?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}
