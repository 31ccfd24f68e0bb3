//! Resume Analysis: extracted PDF → fixed analysis prompt → `AnalysisResult`.
//!
//! Failures of the model call or of its JSON never surface as errors: the
//! caller receives `AnalysisResult::degraded` with the error text as summary.

pub mod handlers;
pub mod models;
pub mod prompts;

use tracing::{info, warn};

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{parse_json_reply, LlmError, TextGenerator};
use crate::pdf::ExtractedPdf;

/// Embeds the page structure and raw text into the analysis prompt.
pub fn build_analysis_prompt(pdf: &ExtractedPdf) -> String {
    let pdf_json = serde_json::to_string_pretty(pdf).unwrap_or_default();
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{pdf_json}", &pdf_json)
        .replace("{raw_text}", &pdf.raw_text)
}

/// Parses a model reply, degrading instead of failing. The degraded summary is
/// the JSON parser's own message.
pub fn parse_analysis_reply(reply: &str) -> AnalysisResult {
    match parse_json_reply::<AnalysisResult>(reply) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("Analysis reply was not valid JSON: {e}");
            let message = match e {
                LlmError::Parse(inner) => inner.to_string(),
                other => other.to_string(),
            };
            AnalysisResult::degraded(message)
        }
    }
}

pub async fn analyze_resume(generator: &dyn TextGenerator, pdf: &ExtractedPdf) -> AnalysisResult {
    let prompt = build_analysis_prompt(pdf);

    let analysis = match generator.generate(&prompt).await {
        Ok(reply) => parse_analysis_reply(&reply),
        Err(e) => {
            warn!("Analysis generation failed: {e}");
            AnalysisResult::degraded(e.to_string())
        }
    };

    info!(
        "Resume analysed: {} skills, {} highlights",
        analysis.skills.len(),
        analysis.highlights.len()
    );
    analysis
}
