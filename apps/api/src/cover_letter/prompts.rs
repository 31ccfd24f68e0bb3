// Cover letter prompt. Replace every `{placeholder}` before sending.

pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are a professional career assistant.
Given this candidate's resume summary: {summary}
Value proposition: {value_proposition}
Highlights: {highlights}
Skills: {skills}
Write a concise, tailored cover letter for the role "{role}" at "{company}". Make it professional, enthusiastic, and relevant to the job.
{job_description}"#;

/// Used when the user supplied a job description. Replace `{job_description}`.
pub const WITH_JOB_DESCRIPTION: &str = r#"Align the letter with the following job description: mirror its key requirements and keywords, and connect them to the candidate's highlights and skills.
Job description:
"""{job_description}""""#;

pub const WITHOUT_JOB_DESCRIPTION: &str = "No job description was provided. Write a general letter for this role that leads with the candidate's strongest highlights and skills.";
