use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::analyze_resume;
use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;
use crate::pdf::{extract_pdf, ExtractedPdf};
use crate::state::AppState;

/// Multipart field carrying the PDF.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub raw_text: String,
    pub pdf_data: ExtractedPdf,
}

/// POST /api/upload-resume
///
/// Extracts the uploaded PDF, runs the analysis prompt and keeps the result in
/// the session for the cover letter composer. A model failure still answers 200
/// with the degraded record.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let generator = state.generator()?;

    let data = read_resume_field(&mut multipart).await?;
    info!("Received resume upload ({} bytes)", data.len());

    let pdf = extract_pdf(data).await?;
    let analysis = analyze_resume(generator.as_ref(), &pdf).await;

    state.session.lock().await.set_analysis(analysis.clone());

    Ok(Json(UploadResponse {
        analysis,
        raw_text: pdf.raw_text.clone(),
        pdf_data: pdf,
    }))
}

async fn read_resume_field(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
        if data.is_empty() {
            break;
        }
        return Ok(data);
    }
    Err(AppError::Validation("No file uploaded".to_string()))
}
