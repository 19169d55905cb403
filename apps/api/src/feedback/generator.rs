//! Feedback generation: pluggable, trait-based source of the coaching sentence
//! appended to every verdict.
//!
//! Default: `RuleBasedFeedback` (deterministic, no network).
//! With an API key: `LlmFeedbackGenerator`.
//!
//! Callers never see a generator failure: [`resolve_guidance`] bounds the call
//! with a timeout and substitutes the rule-based sentence on any error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::feedback::prompts::{
    build_feedback_prompt, FALLBACK_GENERAL, FALLBACK_TECHNICAL_NO_LOGIC,
    FALLBACK_TECHNICAL_WITH_LOGIC, FEEDBACK_MAX_TOKENS, LOGIC_WORDS,
};
use crate::interview::models::InterviewType;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Feedback generation timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub transcript: String,
    pub interview_type: InterviewType,
}

/// Coaching sentence plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guidance {
    pub text: String,
    pub source: String, // generator backend name, or "fallback"
}

#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn generate(&self, request: &FeedbackRequest) -> Result<String, FeedbackError>;

    /// Backend label reported alongside the guidance.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// Rule-based backend
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic local feedback. Also the fallback for every other backend.
pub struct RuleBasedFeedback;

#[async_trait]
impl FeedbackGenerator for RuleBasedFeedback {
    async fn generate(&self, request: &FeedbackRequest) -> Result<String, FeedbackError> {
        Ok(fallback_feedback(request).to_string())
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

pub fn fallback_feedback(request: &FeedbackRequest) -> &'static str {
    match request.interview_type {
        InterviewType::Technical => {
            let transcript = request.transcript.to_lowercase();
            if LOGIC_WORDS.iter().any(|w| transcript.contains(w)) {
                FALLBACK_TECHNICAL_WITH_LOGIC
            } else {
                FALLBACK_TECHNICAL_NO_LOGIC
            }
        }
        InterviewType::Hr => FALLBACK_GENERAL,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM backend
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmFeedbackGenerator(pub LlmClient);

#[async_trait]
impl FeedbackGenerator for LlmFeedbackGenerator {
    async fn generate(&self, request: &FeedbackRequest) -> Result<String, FeedbackError> {
        let prompt = build_feedback_prompt(
            request.interview_type.as_str(),
            &request.question,
            &request.transcript,
        );
        let text = self
            .0
            .call_text(&prompt, PLAIN_TEXT_SYSTEM, FEEDBACK_MAX_TOKENS)
            .await?;
        Ok(text)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Timeout + fallback
// ────────────────────────────────────────────────────────────────────────────

/// Asks the generator once, bounded by `timeout`. Errors degrade to the
/// rule-based sentence and are only logged.
pub async fn resolve_guidance(
    generator: &dyn FeedbackGenerator,
    request: &FeedbackRequest,
    timeout: Duration,
) -> Guidance {
    let outcome = match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(FeedbackError::Timeout(timeout)),
    };

    match outcome {
        Ok(text) => {
            debug!("Guidance from {} backend", generator.backend());
            Guidance {
                text,
                source: generator.backend().to_string(),
            }
        }
        Err(e) => {
            warn!("Feedback generator unavailable, using fallback: {e}");
            Guidance {
                text: fallback_feedback(request).to_string(),
                source: "fallback".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(interview_type: InterviewType, transcript: &str) -> FeedbackRequest {
        FeedbackRequest {
            question: "Reverse a linked list.".to_string(),
            transcript: transcript.to_string(),
            interview_type,
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl FeedbackGenerator for FailingGenerator {
        async fn generate(&self, _request: &FeedbackRequest) -> Result<String, FeedbackError> {
            Err(FeedbackError::Llm(LlmError::EmptyContent))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl FeedbackGenerator for SlowGenerator {
        async fn generate(&self, _request: &FeedbackRequest) -> Result<String, FeedbackError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }

        fn backend(&self) -> &'static str {
            "slow"
        }
    }

    #[test]
    fn test_technical_without_logic_words() {
        let r = request(InterviewType::Technical, "I just did it quickly.");
        assert_eq!(fallback_feedback(&r), FALLBACK_TECHNICAL_NO_LOGIC);
    }

    #[test]
    fn test_technical_with_logic_word_case_insensitive() {
        let r = request(InterviewType::Technical, "My APPROACH was a two-pointer walk.");
        assert_eq!(fallback_feedback(&r), FALLBACK_TECHNICAL_WITH_LOGIC);
    }

    #[test]
    fn test_hr_always_general() {
        let r = request(InterviewType::Hr, "My approach to conflict is to listen.");
        assert_eq!(fallback_feedback(&r), FALLBACK_GENERAL);
    }

    #[tokio::test]
    async fn test_rule_based_backend_label() {
        let r = request(InterviewType::Hr, "");
        let g = resolve_guidance(&RuleBasedFeedback, &r, Duration::from_secs(1)).await;
        assert_eq!(g.source, "rule_based");
        assert_eq!(g.text, FALLBACK_GENERAL);
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let r = request(InterviewType::Technical, "steps: first sort");
        let g = resolve_guidance(&FailingGenerator, &r, Duration::from_secs(1)).await;
        assert_eq!(g.source, "fallback");
        assert_eq!(g.text, FALLBACK_TECHNICAL_WITH_LOGIC);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let r = request(InterviewType::Technical, "no idea");
        let g = resolve_guidance(&SlowGenerator, &r, Duration::from_secs(2)).await;
        assert_eq!(g.source, "fallback");
        assert_eq!(g.text, FALLBACK_TECHNICAL_NO_LOGIC);
    }

    #[test]
    fn test_prompt_includes_question_and_transcript() {
        let prompt = build_feedback_prompt("technical", "Q?", "my answer");
        assert_eq!(
            prompt,
            r#"Analyze this technical interview response for "Q?": "my answer". Provide feedback, emphasizing clarity of logic for technical answers."#
        );
    }
}
