// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds only the pieces used by more than one of them.

/// Formatting instructions appended to every free-form résumé generation prompt.
pub const MARKDOWN_SECTION_FORMAT: &str = "Format the response in markdown with:
- Clear section headings (##)
- Bullet points for achievements
- Keywords relevant to the industry
- Quantifiable results where possible
- Professional tone and language";

/// Instruction that keeps structured replies parseable.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with a single valid JSON object only. \
Do not include any text outside the JSON object. \
Do not include explanations or apologies.";
