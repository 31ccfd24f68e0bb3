//! Intent classification for chat messages.
//!
//! Rules run in a fixed precedence: greeting → résumé creation → question →
//! field answer. The first rule that matches decides; anything left over is
//! free-form generation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::builder::prompts::{FORMAT_ADVICE, KEYWORDS_ADVICE, SKILLS_ADVICE};
use crate::models::resume::{ResumeContext, ResumeField};

lazy_static! {
    static ref GREETING: Regex =
        Regex::new(r"^(hi|hello|hey|greetings)").expect("greeting pattern is valid");
}

/// Topics the builder answers with canned advice, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionTopic {
    Format,
    Skills,
    Keywords,
}

impl QuestionTopic {
    pub const ALL: [QuestionTopic; 3] = [
        QuestionTopic::Format,
        QuestionTopic::Skills,
        QuestionTopic::Keywords,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            QuestionTopic::Format => "format",
            QuestionTopic::Skills => "skills",
            QuestionTopic::Keywords => "keywords",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            QuestionTopic::Format => FORMAT_ADVICE,
            QuestionTopic::Skills => SKILLS_ADVICE,
            QuestionTopic::Keywords => KEYWORDS_ADVICE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum Intent {
    Greeting,
    CreateResume,
    Question(QuestionTopic),
    /// The message answers the field currently being collected.
    FieldAnswer(ResumeField),
    /// No rule matched; forward to the model. Carries the first field named in the text.
    Generate(Option<ResumeField>),
}

type Rule = fn(&str, &ResumeContext) -> Option<Intent>;

const RULES: [Rule; 4] = [greeting, resume_creation, question, field_answer];

pub fn classify(input: &str, context: &ResumeContext) -> Intent {
    RULES
        .iter()
        .find_map(|rule| rule(input, context))
        .unwrap_or_else(|| Intent::Generate(detect_field(input)))
}

fn greeting(input: &str, _: &ResumeContext) -> Option<Intent> {
    GREETING
        .is_match(&input.to_lowercase())
        .then_some(Intent::Greeting)
}

fn resume_creation(input: &str, _: &ResumeContext) -> Option<Intent> {
    let lower = input.to_lowercase();
    (lower.contains("create") && lower.contains("resume")).then_some(Intent::CreateResume)
}

fn question(input: &str, _: &ResumeContext) -> Option<Intent> {
    if !input.contains('?') {
        return None;
    }
    let lower = input.to_lowercase();
    QuestionTopic::ALL
        .into_iter()
        .find(|topic| lower.contains(topic.keyword()))
        .map(Intent::Question)
}

fn field_answer(_: &str, context: &ResumeContext) -> Option<Intent> {
    context.awaiting_field().map(Intent::FieldAnswer)
}

/// First field (in interview order) whose name appears anywhere in the text.
pub fn detect_field(input: &str) -> Option<ResumeField> {
    let lower = input.to_lowercase();
    ResumeField::ALL
        .into_iter()
        .find(|field| lower.contains(field.as_str()))
}
