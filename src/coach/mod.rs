pub mod chatgpt;
pub mod offline;
pub mod ollama;
pub mod provider;

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::exam::{ExamSection, PracticeItem, SectionName};
pub use provider::{ErrorKind, GenerationOptions, TextGenerator};

/// One chat talking to the bot.
pub type SessionId = i64;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CoachError {
    #[error("there is nothing to send: the input is empty")]
    EmptyInput,
}

/// Learner input waiting to be answered. Only constructible with non-blank text.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRequest {
    section_context: Option<SectionName>,
    input_text: String,
}

const WRITING_FEEDBACK_INSTRUCTION: &str = "Give brief feedback on this B1 German writing task:";

impl FeedbackRequest {
    pub fn new(
        section_context: Option<SectionName>,
        input_text: &str,
    ) -> Result<Self, CoachError> {
        let input_text = input_text.trim();
        if input_text.is_empty() {
            return Err(CoachError::EmptyInput);
        }

        Ok(Self {
            section_context,
            input_text: input_text.to_string(),
        })
    }

    /// Wraps a learner's text in the request for writing feedback.
    pub fn writing_sample(section: SectionName, sample: &str) -> Result<Self, CoachError> {
        let sample = sample.trim();
        if sample.is_empty() {
            return Err(CoachError::EmptyInput);
        }

        Self::new(
            Some(section),
            &format!("{WRITING_FEEDBACK_INSTRUCTION}\n\n{sample}"),
        )
    }

    pub fn section_context(&self) -> Option<SectionName> {
        self.section_context
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackResult {
    Success { response_text: String },
    Failure { reason: ErrorKind },
}

pub fn build_prompt(request: &FeedbackRequest) -> String {
    let section_line = request
        .section_context()
        .map(|section| {
            format!("The question relates to the {section} part of the exam.\n")
        })
        .unwrap_or_default();

    format!(
        "You are an exam-preparation assistant for the German Goethe-Zertifikat B1 exam.
Provide a short, clear and precise answer to help the student prepare.
{section_line}
Question: {}

Answer in English or German, matching the language of the question.
Keep it brief: no more than three sentences.
Focus on:
- Exam strategies
- Key vocabulary
- Grammar rules
- Time management
- Common mistakes",
        request.input_text()
    )
}

/// Uniform pick from the section's practice items.
pub fn pick_practice_item<'a, R: Rng + ?Sized>(
    section: &'a ExamSection,
    rng: &mut R,
) -> &'a PracticeItem {
    section
        .practice_items
        .choose(rng)
        .expect("every exam section carries at least one practice item")
}

const LISTENING_DRILLS: [&str; 2] = ["Hörverstehen Übung 1", "Dialoge verstehen"];
const WRITING_DRILLS: [&str; 2] = ["Formeller Brief üben", "E-Mail an Freund schreiben"];

/// Drills worth suggesting after answering `question`.
pub fn follow_up_exercises(question: &str) -> &'static [&'static str] {
    let question = question.to_lowercase();
    if question.contains("hören") || question.contains("listening") {
        &LISTENING_DRILLS
    } else if question.contains("schreiben") || question.contains("writing") {
        &WRITING_DRILLS
    } else {
        &[]
    }
}

/// Hands out practice items and forwards learner input to the text generator.
pub struct Coach {
    generator: Box<dyn TextGenerator>,
    options: GenerationOptions,
    timeout: Duration,
    in_flight: Mutex<HashSet<SessionId>>,
}

/// Marks a session as waiting for an answer until dropped.
pub struct InFlight<'a> {
    coach: &'a Coach,
    session: SessionId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.coach.sessions().remove(&self.session);
    }
}

impl Coach {
    pub fn new(
        generator: Box<dyn TextGenerator>,
        options: GenerationOptions,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            options,
            timeout,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashSet<SessionId>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the session's single request slot, or `None` if a request is
    /// still outstanding for it.
    pub fn try_begin(&self, session: SessionId) -> Option<InFlight<'_>> {
        if !self.sessions().insert(session) {
            debug!("Session {session} already has a request in flight");
            return None;
        }
        Some(InFlight {
            coach: self,
            session,
        })
    }

    pub async fn request_feedback(&self, request: &FeedbackRequest) -> FeedbackResult {
        let prompt = build_prompt(request);
        debug!("Requesting feedback: {:?}", request.input_text());

        let generation = self.generator.generate(&prompt, &self.options);
        match tokio::time::timeout(self.timeout, generation).await {
            Ok(Ok(response_text)) => FeedbackResult::Success { response_text },
            Ok(Err(failure)) => {
                warn!("Feedback request failed: {failure}");
                FeedbackResult::Failure {
                    reason: failure.kind(),
                }
            }
            Err(_) => {
                warn!("Feedback request timed out after {:?}", self.timeout);
                FeedbackResult::Failure {
                    reason: ErrorKind::ProviderUnavailable,
                }
            }
        }
    }

    /// Validates raw learner input, then asks for feedback on it.
    pub async fn ask(
        &self,
        section: Option<SectionName>,
        input_text: &str,
    ) -> Result<FeedbackResult, CoachError> {
        let request = FeedbackRequest::new(section, input_text)?;
        Ok(self.request_feedback(&request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::provider::{MockTextGenerator, ProviderFailure};
    use super::*;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use tokio::time::Instant;

    fn options() -> GenerationOptions {
        GenerationOptions {
            model: "deepseek-r1:8b".to_string(),
            temperature: 0.3,
        }
    }

    fn coach_with(generator: impl TextGenerator + 'static) -> Coach {
        Coach::new(Box::new(generator), options(), Duration::from_secs(5))
    }

    struct HangingGenerator;

    #[async_trait]
    impl TextGenerator for HangingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, ProviderFailure> {
            std::future::pending().await
        }
    }

    #[test]
    fn same_seed_picks_the_same_items() {
        let section = SectionName::Reading.section();
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            assert_eq!(
                pick_practice_item(section, &mut first),
                pick_practice_item(section, &mut second)
            );
        }
    }

    #[test]
    fn picks_are_roughly_uniform() {
        const DRAWS: usize = 8000;
        let mut rng = StdRng::seed_from_u64(2024);

        for section in crate::exam::list_sections() {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for _ in 0..DRAWS {
                *counts
                    .entry(pick_practice_item(section, &mut rng).prompt_text)
                    .or_default() += 1;
            }

            let expected = DRAWS / section.practice_items.len();
            assert_eq!(counts.len(), section.practice_items.len());
            for (prompt, count) in counts {
                assert!(
                    count > expected * 8 / 10 && count < expected * 12 / 10,
                    "{prompt:?} drawn {count} times, expected about {expected}"
                );
            }
        }
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(FeedbackRequest::new(None, ""), Err(CoachError::EmptyInput));
        assert_eq!(
            FeedbackRequest::new(None, " \n\t "),
            Err(CoachError::EmptyInput)
        );
        assert_eq!(
            FeedbackRequest::writing_sample(SectionName::Writing, "   "),
            Err(CoachError::EmptyInput)
        );
    }

    #[tokio::test]
    async fn blank_input_never_reaches_the_provider() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().times(0);
        let coach = coach_with(generator);

        assert_eq!(coach.ask(None, "   ").await, Err(CoachError::EmptyInput));
    }

    #[tokio::test]
    async fn success_is_returned_unmodified() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt, options| {
                prompt.contains("Question: Wie verbessere ich meinen Brief?")
                    && options.temperature == 0.3
                    && options.model == "deepseek-r1:8b"
            })
            .times(1)
            .returning(|_, _| Ok("Use more subordinate clauses.".to_string()));
        let coach = coach_with(generator);

        let result = coach
            .ask(Some(SectionName::Writing), "  Wie verbessere ich meinen Brief? ")
            .await
            .unwrap();
        assert_eq!(
            result,
            FeedbackResult::Success {
                response_text: "Use more subordinate clauses.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn provider_failures_keep_their_kind() {
        let failures: [(fn() -> ProviderFailure, ErrorKind); 2] = [
            (
                || ProviderFailure::Error("model not found".to_string()),
                ErrorKind::ProviderError,
            ),
            (
                || ProviderFailure::Unavailable("connection refused".to_string()),
                ErrorKind::ProviderUnavailable,
            ),
        ];

        for (failure, kind) in failures {
            let mut generator = MockTextGenerator::new();
            generator
                .expect_generate()
                .times(1)
                .returning(move |_, _| Err(failure()));
            let coach = coach_with(generator);

            let request = FeedbackRequest::new(None, "Hallo").unwrap();
            assert_eq!(
                coach.request_feedback(&request).await,
                FeedbackResult::Failure { reason: kind }
            );
        }
    }

    #[tokio::test]
    async fn hung_provider_times_out_as_unavailable() {
        let timeout = Duration::from_millis(50);
        let coach = Coach::new(Box::new(HangingGenerator), options(), timeout);
        let request = FeedbackRequest::new(None, "Hallo").unwrap();

        let started = Instant::now();
        let result = coach.request_feedback(&request).await;

        assert_eq!(
            result,
            FeedbackResult::Failure {
                reason: ErrorKind::ProviderUnavailable
            }
        );
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn session_can_ask_again_once_the_first_request_resolved() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(2)
            .returning(|_, _| Ok("Gut gemacht.".to_string()));
        let coach = coach_with(generator);
        let request = FeedbackRequest::new(None, "Ist mein Satz richtig?").unwrap();

        {
            let _slot = coach.try_begin(42).unwrap();
            assert!(coach.try_begin(42).is_none(), "second request must wait");
            assert!(coach.try_begin(7).is_some(), "other sessions are unaffected");
            assert!(matches!(
                coach.request_feedback(&request).await,
                FeedbackResult::Success { .. }
            ));
        }

        let _slot = coach.try_begin(42).expect("slot released after the first call");
        assert!(matches!(
            coach.request_feedback(&request).await,
            FeedbackResult::Success { .. }
        ));
    }

    #[test]
    fn writing_samples_carry_the_feedback_instruction() {
        let request =
            FeedbackRequest::writing_sample(SectionName::Writing, "Liebe Sarah, ...").unwrap();
        assert!(request
            .input_text()
            .starts_with("Give brief feedback on this B1 German writing task:"));
        assert!(request.input_text().ends_with("Liebe Sarah, ..."));
    }

    #[test]
    fn prompt_names_role_section_and_focus() {
        let request =
            FeedbackRequest::new(Some(SectionName::Listening), "Wie höre ich besser?").unwrap();
        let prompt = build_prompt(&request);

        assert!(prompt.contains("exam-preparation assistant"));
        assert!(prompt.contains("Hören (Listening)"));
        assert!(prompt.contains("Question: Wie höre ich besser?"));
        for focus in [
            "Exam strategies",
            "Key vocabulary",
            "Grammar rules",
            "Time management",
            "Common mistakes",
        ] {
            assert!(prompt.contains(focus), "missing {focus}");
        }
        assert!(!build_prompt(&FeedbackRequest::new(None, "x").unwrap()).contains("relates to"));
    }

    #[test]
    fn follow_ups_depend_on_the_topic() {
        assert_eq!(
            follow_up_exercises("Wie kann ich im Hören besser werden?"),
            &LISTENING_DRILLS
        );
        assert_eq!(follow_up_exercises("Tips for WRITING?"), &WRITING_DRILLS);
        assert!(follow_up_exercises("Wie viele Punkte brauche ich?").is_empty());
    }
}
