use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five résumé categories. Declaration order is the interview order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeField {
    Experience,
    Education,
    Skills,
    Achievements,
    Objective,
}

impl ResumeField {
    pub const ALL: [ResumeField; 5] = [
        ResumeField::Experience,
        ResumeField::Education,
        ResumeField::Skills,
        ResumeField::Achievements,
        ResumeField::Objective,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResumeField::Experience => "experience",
            ResumeField::Education => "education",
            ResumeField::Skills => "skills",
            ResumeField::Achievements => "achievements",
            ResumeField::Objective => "objective",
        }
    }
}

impl fmt::Display for ResumeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collected résumé lines keyed by field, iterated in interview order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeData(BTreeMap<ResumeField, Vec<String>>);

impl ResumeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self, field: ResumeField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: ResumeField) -> bool {
        !self.lines(field).is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = ResumeField> + '_ {
        self.0
            .iter()
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(field, _)| *field)
    }

    /// Replaces the lines of one field.
    pub fn set(&mut self, field: ResumeField, lines: Vec<String>) {
        self.0.insert(field, lines);
    }

    /// Appends one more line to a field, keeping earlier lines in order.
    pub fn append(&mut self, field: ResumeField, line: impl Into<String>) {
        self.0.entry(field).or_default().push(line.into());
    }

    /// Last-write-wins per field: every field present in `other` replaces ours wholesale.
    pub fn merge(&mut self, other: ResumeData) {
        for (field, lines) in other.0 {
            self.0.insert(field, lines);
        }
    }

    pub fn is_complete(&self) -> bool {
        ResumeField::ALL.iter().all(|f| self.has(*f))
    }
}

/// Kinds of materialized section kept for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Experience,
    Education,
    Skills,
    Summary,
    Complete,
}

impl SectionType {
    /// `achievements` and `objective` both land in the summary section.
    pub fn for_field(field: ResumeField) -> Self {
        match field {
            ResumeField::Experience => SectionType::Experience,
            ResumeField::Education => SectionType::Education,
            ResumeField::Skills => SectionType::Skills,
            ResumeField::Achievements | ResumeField::Objective => SectionType::Summary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSection {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub content: String,
}

impl ResumeSection {
    pub fn new(section_type: SectionType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            section_type,
            content: content.into(),
        }
    }
}

/// A saved snapshot of the live sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeVersion {
    pub id: Uuid,
    pub sections: Vec<ResumeSection>,
    pub saved_at: DateTime<Utc>,
}

/// What the last handled message was about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    #[default]
    None,
    Greeting,
    Question,
    Resume,
}

/// Conversation state driven by the résumé builder.
///
/// Invariants: `missing_fields` is an ordered subsequence of `ResumeField::ALL`;
/// `current_section`, when set, equals its head; `is_complete` holds only when
/// nothing is missing and every field has at least one line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeContext {
    #[serde(rename = "type")]
    pub kind: ContextKind,
    pub missing_fields: Vec<ResumeField>,
    pub current_section: Option<ResumeField>,
    pub collected_data: ResumeData,
    pub is_complete: bool,
}

/// Coarse state of the builder, derived from a `ResumeContext`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum BuilderState {
    Idle,
    Greeting,
    Question,
    #[serde(rename_all = "camelCase")]
    ResumeCollecting {
        missing_fields: Vec<ResumeField>,
        current_section: Option<ResumeField>,
    },
    ResumeComplete,
}

impl ResumeContext {
    pub fn state(&self) -> BuilderState {
        match self.kind {
            ContextKind::None => BuilderState::Idle,
            ContextKind::Greeting => BuilderState::Greeting,
            ContextKind::Question => BuilderState::Question,
            ContextKind::Resume if self.is_complete => BuilderState::ResumeComplete,
            ContextKind::Resume => BuilderState::ResumeCollecting {
                missing_fields: self.missing_fields.clone(),
                current_section: self.current_section,
            },
        }
    }

    /// True while the builder is waiting for an answer to a specific field.
    pub fn awaiting_field(&self) -> Option<ResumeField> {
        match self.kind {
            ContextKind::Resume => self.current_section,
            _ => None,
        }
    }
}
