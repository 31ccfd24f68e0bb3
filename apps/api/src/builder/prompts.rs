// Canned replies and instruction text for the conversational résumé builder.

use crate::models::resume::ResumeField;

pub const GREETING_REPLY: &str = "Hello! 👋 I'm your AI resume assistant. I can help you:

* Create a professional resume from scratch
* Update existing resume sections
* Answer questions about resume writing
* Provide career advice and tips
* Review and improve your content

Would you like to create a new resume or have specific questions?";

pub const FORMAT_ADVICE: &str = "Here are some resume formatting best practices:

* Keep it to 1-2 pages
* Use clear headings and consistent formatting
* Include white space for readability
* Use bullet points for achievements
* Choose a professional font";

pub const SKILLS_ADVICE: &str = "When listing skills, remember to:

* Match skills to the job description
* Include both hard and soft skills
* Group skills by category
* Highlight proficiency levels
* Provide concrete examples";

pub const KEYWORDS_ADVICE: &str = "To optimize your resume for ATS:

* Use industry-standard terms
* Include relevant technical skills
* Match keywords from job posting
* Use full terms before abbreviations
* Avoid graphics and custom fonts";

/// Shown to the user when the fallback generation call fails.
pub const GENERATION_FAILED_REPLY: &str =
    "Error: Failed to generate resume content. Please try again.";

const REFINE_OFFER: &str = "Would you like me to refine any section?";

/// What the user should include when answering for a field.
pub fn field_prompt(field: ResumeField) -> &'static str {
    match field {
        ResumeField::Experience => {
            "Please include:
* Your role and company
* Duration of employment
* Key responsibilities
* Notable achievements"
        }
        ResumeField::Education => {
            "Please include:
* Degree and major
* Institution name
* Graduation year
* Relevant coursework"
        }
        ResumeField::Skills => {
            "Please include:
* Technical skills
* Soft skills
* Tools and technologies
* Certifications"
        }
        ResumeField::Achievements => {
            "Please include:
* Quantifiable results
* Awards and recognition
* Projects completed
* Impact made"
        }
        ResumeField::Objective => {
            "Please include:
* Target position
* Career goals
* Value proposition
* Industry focus"
        }
    }
}

/// Reply for an inline request that carried all five fields.
pub fn created_reply(resume: &str) -> String {
    format!("Great! I've created a complete resume based on your information:\n\n{resume}\n\n{REFINE_OFFER}")
}

/// Reply for an inline request with fields still missing. `missing` is never empty.
pub fn partial_reply(found: &[ResumeField], missing: &[ResumeField]) -> String {
    let found_list = found
        .iter()
        .map(|f| format!("✓ {f}"))
        .collect::<Vec<_>>()
        .join("\n");
    let missing_list = missing
        .iter()
        .map(|f| format!("- {f}:\n{}", field_prompt(*f)))
        .collect::<Vec<_>>()
        .join("\n\n");
    let first = missing.first().map(|f| f.as_str()).unwrap_or_default();

    format!(
        "I'll help you create a professional resume. Here's what I've got so far:\n\n{found_list}\n\n\
I still need information about:\n{missing_list}\n\n\
Let's start with your {first}. Please provide the details."
    )
}

/// Reply asking for the next field in sequential collection.
pub fn next_field_reply(field: ResumeField) -> String {
    format!("Great! Now, let's work on your {field}:\n{}", field_prompt(field))
}

/// Reply once the last missing field has been answered.
pub fn collected_reply(resume: &str) -> String {
    format!("Perfect! I've collected all the information. Here's your complete resume:\n\n{resume}\n\n{REFINE_OFFER}")
}

/// Prompt forwarded to the model when no rule handled the message.
pub fn generation_prompt(input: &str, section: Option<ResumeField>, format: &str) -> String {
    let request = match section {
        Some(field) => format!("Create a professional {field} section for: {input}"),
        None => format!("Create a professional resume section for: {input}"),
    };
    format!("{request}\n{format}")
}
