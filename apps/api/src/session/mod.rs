//! The single conversation session: transcript, builder context, live résumé
//! sections, saved versions and the latest analysis record.
//!
//! All mutation goes through the methods below. The server keeps exactly one
//! `Session` behind an async mutex; whoever holds the lock owns the turn.

pub mod handlers;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::models::message::{Message, Role};
use crate::models::resume::{
    ResumeContext, ResumeData, ResumeField, ResumeSection, ResumeVersion, SectionType,
};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    messages: Vec<Message>,
    context: ResumeContext,
    sections: Vec<ResumeSection>,
    versions: Vec<ResumeVersion>,
    analysis: Option<AnalysisResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn context(&self) -> &ResumeContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ResumeContext {
        &mut self.context
    }

    pub fn sections(&self) -> &[ResumeSection] {
        &self.sections
    }

    pub fn versions(&self) -> &[ResumeVersion] {
        &self.versions
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Appends a message to the transcript.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.messages.push(Message::new(role, content));
        &self.messages[self.messages.len() - 1]
    }

    /// Toggles the streaming flag of the most recent message, if any.
    pub fn set_streaming(&mut self, is_streaming: bool) -> Option<&Message> {
        let last = self.messages.last_mut()?;
        last.is_streaming = is_streaming;
        Some(&*last)
    }

    /// Inserts a section, replacing any live section of the same type in place.
    pub fn upsert_section(&mut self, section_type: SectionType, content: impl Into<String>) {
        let section = ResumeSection::new(section_type, content);
        match self
            .sections
            .iter_mut()
            .find(|s| s.section_type == section_type)
        {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
    }

    /// Merges freshly extracted fields into the collected data (last write wins per field).
    pub fn merge_collected_fields(&mut self, fields: ResumeData) {
        self.context.collected_data.merge(fields);
    }

    /// Appends one answer line to a field of the collected data.
    pub fn append_collected_line(&mut self, field: ResumeField, line: impl Into<String>) {
        self.context.collected_data.append(field, line);
    }

    /// Snapshots the live sections as a new version.
    pub fn save_version(&mut self) -> &ResumeVersion {
        self.versions.push(ResumeVersion {
            id: Uuid::new_v4(),
            sections: self.sections.clone(),
            saved_at: Utc::now(),
        });
        &self.versions[self.versions.len() - 1]
    }

    /// Stores the analysis of the latest upload, discarding the previous one.
    pub fn set_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }
}
