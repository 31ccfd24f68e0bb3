// Résumé analysis prompt.
// Replace `{pdf_json}` and `{raw_text}` before sending.

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are a world-class career coach and resume analyst.
Given the following resume data, produce a structured analysis:
- A concise summary of what this resume is for (role, industry, seniority).
- A one-sentence value proposition for the candidate.
- 3-5 key highlights or achievements.
- The top 8-10 technical and soft skills, each with a strength percentage (0-100) and a short reason grounded in the resume.
- The resume split into its segments (title and content of each).
- Every work experience entry and every education entry.
- An assessment of the formatting with a score (0-100) and concrete feedback.
- Industry keywords the resume is missing for its target role.
- Specific, actionable improvement suggestions.

Return your answer as a JSON object with exactly this structure:
{
  "summary": "string",
  "valueProposition": "string",
  "highlights": ["string"],
  "skills": [{"name": "string", "percentage": 0, "reason": "string"}],
  "segments": [{"title": "string", "content": "string"}],
  "experience": [{"title": "string", "company": "string", "duration": "string", "highlights": ["string"]}],
  "education": [{"degree": "string", "institution": "string", "year": "string"}],
  "formatting": {"score": 0, "feedback": ["string"]},
  "missingKeywords": ["string"],
  "improvementSuggestions": ["string"]
}

{json_only}

Resume JSON:
{pdf_json}

Raw extracted text:
"""{raw_text}"""
"#;
