//! Cover Letter Composer: analysis record + target role → prompt → letter text.
//!
//! The model's reply is returned verbatim.

pub mod handlers;
pub mod prompts;

use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::cover_letter::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, WITHOUT_JOB_DESCRIPTION, WITH_JOB_DESCRIPTION,
};
use crate::llm_client::{LlmError, TextGenerator};

/// What the user is applying for.
#[derive(Debug, Clone)]
pub struct LetterTarget<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub job_description: Option<&'a str>,
}

pub fn build_cover_letter_prompt(analysis: &AnalysisResult, target: &LetterTarget<'_>) -> String {
    let skills = analysis
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let job_description = match target.job_description.map(str::trim) {
        Some(jd) if !jd.is_empty() => WITH_JOB_DESCRIPTION.replace("{job_description}", jd),
        _ => WITHOUT_JOB_DESCRIPTION.to_string(),
    };

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{summary}", &analysis.summary)
        .replace("{value_proposition}", &analysis.value_proposition)
        .replace("{highlights}", &analysis.highlights.join(", "))
        .replace("{skills}", &skills)
        .replace("{role}", target.role)
        .replace("{company}", target.company)
        .replace("{job_description}", &job_description)
}

pub async fn compose_cover_letter(
    generator: &dyn TextGenerator,
    analysis: &AnalysisResult,
    target: &LetterTarget<'_>,
) -> Result<String, LlmError> {
    let prompt = build_cover_letter_prompt(analysis, target);
    let letter = generator.generate(&prompt).await?;
    info!(
        "Cover letter generated for {} at {} ({} chars)",
        target.role,
        target.company,
        letter.len()
    );
    Ok(letter)
}
