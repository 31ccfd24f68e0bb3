//! Conversational Resume Builder.
//!
//! Each user message is classified (see `classifier`) and dispatched to exactly
//! one handler. Handlers mutate the session through its API only; the turn is
//! always recorded as a user message followed by one assistant reply.

pub mod classifier;
pub mod extraction;
pub mod handlers;
pub mod prompts;
pub mod synthesis;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::builder::classifier::{classify, Intent, QuestionTopic};
use crate::builder::extraction::extract_fields;
use crate::builder::prompts::{
    collected_reply, created_reply, generation_prompt, next_field_reply, partial_reply,
    GENERATION_FAILED_REPLY, GREETING_REPLY,
};
use crate::builder::synthesis::render_resume;
use crate::llm_client::prompts::MARKDOWN_SECTION_FORMAT;
use crate::llm_client::TextGenerator;
use crate::models::message::Role;
use crate::models::resume::{ContextKind, ResumeField, SectionType};
use crate::session::Session;

/// Outcome of one handled message.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub intent: Intent,
    pub reply: String,
}

#[derive(Clone)]
pub struct ResumeBuilder {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ResumeBuilder {
    /// Without a generator, free-form messages get the generation failure reply.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub async fn handle_message(&self, session: &mut Session, input: &str) -> Turn {
        session.add_message(Role::User, input);

        let intent = classify(input, session.context());
        info!(
            messages = session.messages().len(),
            "Chat message classified as {intent:?}"
        );

        let reply = match intent {
            Intent::Greeting => greet(session),
            Intent::CreateResume => create_resume(session, input),
            Intent::Question(topic) => answer_question(session, topic),
            Intent::FieldAnswer(field) => collect_answer(session, field, input),
            Intent::Generate(detected) => self.generate_section(session, input, detected).await,
        };

        session.add_message(Role::Assistant, reply.clone());
        Turn { intent, reply }
    }

    async fn generate_section(
        &self,
        session: &mut Session,
        input: &str,
        detected: Option<ResumeField>,
    ) -> String {
        let Some(generator) = &self.generator else {
            warn!("Chat generation requested but no generator is configured");
            return GENERATION_FAILED_REPLY.to_string();
        };

        // Only `Some` if a field is awaited, which the field-answer rule normally claims first.
        let section = session.context().awaiting_field();
        let prompt = generation_prompt(input, section, MARKDOWN_SECTION_FORMAT);

        match generator.generate(&prompt).await {
            Ok(text) => {
                if let Some(field) = detected {
                    session.upsert_section(SectionType::for_field(field), text.clone());
                }
                text
            }
            Err(e) => {
                warn!("Chat generation failed: {e}");
                GENERATION_FAILED_REPLY.to_string()
            }
        }
    }
}

fn greet(session: &mut Session) -> String {
    session.context_mut().kind = ContextKind::Greeting;
    GREETING_REPLY.to_string()
}

fn answer_question(session: &mut Session, topic: QuestionTopic) -> String {
    session.context_mut().kind = ContextKind::Question;
    topic.advice().to_string()
}

/// Inline collection: every labelled field in the message is taken at once.
fn create_resume(session: &mut Session, input: &str) -> String {
    let extraction = extract_fields(input);
    let found = extraction.found_fields();

    if extraction.missing.is_empty() {
        let reply = created_reply(&render_resume(&extraction.found));
        session.merge_collected_fields(extraction.found);

        let ctx = session.context_mut();
        ctx.kind = ContextKind::Resume;
        ctx.missing_fields.clear();
        ctx.current_section = None;
        ctx.is_complete = true;

        session.upsert_section(SectionType::Complete, reply.clone());
        info!("Resume completed from a single message");
        return reply;
    }

    let reply = partial_reply(&found, &extraction.missing);
    session.merge_collected_fields(extraction.found);

    let ctx = session.context_mut();
    ctx.kind = ContextKind::Resume;
    ctx.current_section = extraction.missing.first().copied();
    ctx.missing_fields = extraction.missing;
    ctx.is_complete = false;

    info!(
        "Resume collection started: {} found, {} missing",
        found.len(),
        ctx.missing_fields.len()
    );
    reply
}

/// Sequential collection: the whole message becomes one more line of `field`.
fn collect_answer(session: &mut Session, field: ResumeField, input: &str) -> String {
    session.append_collected_line(field, input);

    let ctx = session.context_mut();
    if ctx.missing_fields.len() <= 1 {
        if !ctx.collected_data.is_complete() {
            warn!("Resume completed with empty fields");
        }
        let resume = render_resume(&ctx.collected_data);
        ctx.missing_fields.clear();
        ctx.current_section = None;
        ctx.is_complete = true;

        session.upsert_section(SectionType::Complete, resume.clone());
        info!("Resume completed after collecting {field}");
        return collected_reply(&resume);
    }

    ctx.missing_fields.remove(0);
    let next = ctx.missing_fields[0];
    ctx.current_section = Some(next);
    next_field_reply(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubGenerator;
    use crate::models::resume::BuilderState;

    const FULL_INPUT: &str = "create resume experience: worked at Acme education: BTech CS \
                              skills: Go, Rust achievements: shipped X objective: backend role";

    fn builder_with(generator: StubGenerator) -> (ResumeBuilder, Arc<StubGenerator>) {
        let generator = Arc::new(generator);
        let builder = ResumeBuilder::new(Some(generator.clone() as Arc<dyn TextGenerator>));
        (builder, generator)
    }

    fn offline_builder() -> ResumeBuilder {
        ResumeBuilder::new(None)
    }

    fn complete_sections(session: &Session) -> usize {
        session
            .sections()
            .iter()
            .filter(|s| s.section_type == SectionType::Complete)
            .count()
    }

    #[tokio::test]
    async fn test_greeting_replies_and_leaves_collected_data_alone() {
        let builder = offline_builder();
        let mut session = Session::new();
        builder
            .handle_message(&mut session, "create resume experience: worked at Acme")
            .await;
        let before = session.context().collected_data.clone();

        let turn = builder.handle_message(&mut session, "Hello there").await;

        assert_eq!(turn.intent, Intent::Greeting);
        assert_eq!(turn.reply, GREETING_REPLY);
        assert_eq!(session.context().kind, ContextKind::Greeting);
        assert_eq!(session.context().collected_data, before);
    }

    #[tokio::test]
    async fn test_inline_create_with_all_fields_completes() {
        let builder = offline_builder();
        let mut session = Session::new();

        let turn = builder.handle_message(&mut session, FULL_INPUT).await;

        for heading in [
            "Professional Summary",
            "Professional Experience",
            "Education",
            "Skills & Expertise",
            "Key Achievements",
        ] {
            assert!(turn.reply.contains(heading), "missing heading {heading}");
        }
        let ctx = session.context();
        assert!(ctx.is_complete);
        assert!(ctx.missing_fields.is_empty());
        assert_eq!(ctx.current_section, None);
        assert_eq!(ctx.state(), BuilderState::ResumeComplete);
        assert_eq!(complete_sections(&session), 1);
        assert_eq!(session.sections()[0].content, turn.reply);
    }

    #[tokio::test]
    async fn test_inline_create_with_one_field_asks_for_the_rest() {
        let builder = offline_builder();
        let mut session = Session::new();

        let turn = builder
            .handle_message(&mut session, "create resume experience: worked at Acme")
            .await;

        let ctx = session.context();
        assert_eq!(
            ctx.missing_fields,
            vec![
                ResumeField::Education,
                ResumeField::Skills,
                ResumeField::Achievements,
                ResumeField::Objective,
            ]
        );
        assert_eq!(ctx.current_section, Some(ResumeField::Education));
        assert!(!ctx.is_complete);
        assert!(turn.reply.contains("✓ experience"));
        assert!(turn.reply.contains("- education:\nPlease include:"));
        assert!(turn.reply.ends_with("Let's start with your education. Please provide the details."));
        assert!(session.sections().is_empty());
    }

    #[tokio::test]
    async fn test_answering_last_missing_field_completes() {
        let builder = offline_builder();
        let mut session = Session::new();
        {
            let ctx = session.context_mut();
            ctx.kind = ContextKind::Resume;
            ctx.missing_fields = vec![ResumeField::Objective];
            ctx.current_section = Some(ResumeField::Objective);
            for field in &ResumeField::ALL[..4] {
                ctx.collected_data.append(*field, "something");
            }
        }

        let turn = builder
            .handle_message(&mut session, "Backend engineer role in fintech")
            .await;

        assert_eq!(turn.intent, Intent::FieldAnswer(ResumeField::Objective));
        let ctx = session.context();
        assert!(ctx.is_complete);
        assert!(ctx.missing_fields.is_empty());
        assert_eq!(ctx.current_section, None);
        assert_eq!(complete_sections(&session), 1);
        assert!(turn.reply.starts_with("Perfect! I've collected all the information."));
        assert!(turn.reply.contains("## Professional Summary\nBackend engineer role in fintech"));
    }

    #[tokio::test]
    async fn test_sequential_collection_walks_fields_in_order() {
        let builder = offline_builder();
        let mut session = Session::new();
        builder
            .handle_message(&mut session, "create resume experience: worked at Acme")
            .await;

        let turn = builder.handle_message(&mut session, "BTech CS, 2018").await;
        assert_eq!(turn.reply, next_field_reply(ResumeField::Skills));
        assert_eq!(session.context().current_section, Some(ResumeField::Skills));

        builder.handle_message(&mut session, "Rust, Go").await;
        builder.handle_message(&mut session, "Cut p99 latency by 40%").await;
        let turn = builder.handle_message(&mut session, "Staff backend role").await;

        let ctx = session.context();
        assert!(ctx.is_complete);
        assert!(ctx.collected_data.is_complete());
        assert!(turn.reply.contains("- worked at Acme"));
        assert!(turn.reply.contains("- Cut p99 latency by 40%"));
        assert_eq!(session.messages().len(), 10);
    }

    #[tokio::test]
    async fn test_field_answers_accumulate_in_submission_order() {
        let builder = offline_builder();
        let mut session = Session::new();

        // Two collection passes that both leave education missing.
        builder
            .handle_message(&mut session, "create resume experience: Acme")
            .await;
        builder.handle_message(&mut session, "BTech, 2018").await;
        builder
            .handle_message(&mut session, "create resume experience: Acme")
            .await;
        builder.handle_message(&mut session, "MTech, 2020").await;

        assert_eq!(
            session.context().collected_data.lines(ResumeField::Education),
            ["BTech, 2018", "MTech, 2020"]
        );
        assert_eq!(session.context().current_section, Some(ResumeField::Skills));
    }

    #[tokio::test]
    async fn test_second_create_merges_last_write_wins() {
        let builder = offline_builder();
        let mut session = Session::new();
        builder
            .handle_message(&mut session, "create resume experience: Acme skills: Rust")
            .await;
        builder
            .handle_message(&mut session, "create resume experience: Globex")
            .await;

        let data = &session.context().collected_data;
        assert_eq!(data.lines(ResumeField::Experience), ["Globex"]);
        assert_eq!(data.lines(ResumeField::Skills), ["Rust"]);
        assert_eq!(session.context().missing_fields.len(), 4);
    }

    #[tokio::test]
    async fn test_question_gets_canned_advice() {
        let builder = offline_builder();
        let mut session = Session::new();
        let turn = builder
            .handle_message(&mut session, "How should I format it?")
            .await;
        assert_eq!(turn.reply, QuestionTopic::Format.advice());
        assert_eq!(session.context().kind, ContextKind::Question);
    }

    #[tokio::test]
    async fn test_fallback_forwards_prompt_and_upserts_detected_section() {
        let (builder, generator) = builder_with(StubGenerator::replying("## Skills\n- Rust"));
        let mut session = Session::new();

        let turn = builder
            .handle_message(&mut session, "Rust and Go are my main skills")
            .await;

        assert_eq!(turn.intent, Intent::Generate(Some(ResumeField::Skills)));
        assert_eq!(turn.reply, "## Skills\n- Rust");
        let prompts = generator.prompts();
        assert!(prompts[0].starts_with(
            "Create a professional resume section for: Rust and Go are my main skills\n"
        ));
        assert!(prompts[0].contains("Clear section headings (##)"));
        assert_eq!(session.sections().len(), 1);
        assert_eq!(session.sections()[0].section_type, SectionType::Skills);
    }

    #[tokio::test]
    async fn test_fallback_maps_objective_to_summary() {
        let (builder, _) = builder_with(StubGenerator::replying("Summary text"));
        let mut session = Session::new();
        builder
            .handle_message(&mut session, "My objective is a platform role")
            .await;
        builder
            .handle_message(&mut session, "Rewrite my achievements")
            .await;

        assert_eq!(session.sections().len(), 1);
        assert_eq!(session.sections()[0].section_type, SectionType::Summary);
    }

    #[tokio::test]
    async fn test_fallback_without_detected_field_stores_no_section() {
        let (builder, _) = builder_with(StubGenerator::replying("Some text"));
        let mut session = Session::new();
        builder
            .handle_message(&mut session, "Make it sound more senior")
            .await;
        assert!(session.sections().is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_replies_with_canned_error_only() {
        let (builder, _) = builder_with(StubGenerator::failing("boom"));
        let mut session = Session::new();
        let before = session.context().clone();

        let turn = builder
            .handle_message(&mut session, "Polish my experience")
            .await;

        assert_eq!(turn.reply, GENERATION_FAILED_REPLY);
        assert_eq!(session.context(), &before);
        assert!(session.sections().is_empty());
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].content, GENERATION_FAILED_REPLY);
    }

    #[tokio::test]
    async fn test_missing_generator_behaves_like_failure() {
        let builder = offline_builder();
        let mut session = Session::new();
        let turn = builder.handle_message(&mut session, "Polish this").await;
        assert_eq!(turn.reply, GENERATION_FAILED_REPLY);
    }

    #[tokio::test]
    async fn test_greeting_mid_collection_leaves_collection_mode() {
        let (builder, generator) = builder_with(StubGenerator::replying("generated"));
        let mut session = Session::new();
        builder
            .handle_message(&mut session, "create resume experience: Acme")
            .await;
        builder.handle_message(&mut session, "hey").await;

        let turn = builder.handle_message(&mut session, "BTech CS").await;

        assert_eq!(turn.intent, Intent::Generate(None));
        assert_eq!(generator.prompts().len(), 1);
        assert!(session
            .context()
            .collected_data
            .lines(ResumeField::Education)
            .is_empty());
    }
}
