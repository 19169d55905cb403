//! Question source: static banks plus LLM generation for technical interviews.
//!
//! `AppState` holds an `Arc<dyn QuestionSource>`: `LlmQuestionSource` when an
//! API key is configured, `StaticQuestionSource` otherwise.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::interview::models::{HrType, InterviewSetup, InterviewType, DEFAULT_DOMAIN};
use crate::interview::prompts::{build_questions_prompt, QUESTIONS_MAX_TOKENS};
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::LlmClient;

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Ordered questions for an interview. Never empty.
    async fn questions(&self, setup: &InterviewSetup) -> Vec<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// Static banks
// ────────────────────────────────────────────────────────────────────────────

pub fn hr_questions(hr_type: HrType) -> &'static [&'static str] {
    match hr_type {
        HrType::General => &[
            "Tell me about yourself and your background.",
            "What are your greatest strengths and how do they relate to this position?",
            "Why do you want to work with our company?",
        ],
        HrType::Freshers => &[
            "Describe your academic journey and key projects.",
            "How have you prepared for this role as a fresher?",
            "What challenges did you face in your projects and how did you overcome them?",
        ],
        HrType::Behavioral => &[
            "Give an example of a time you worked in a team to achieve a goal.",
            "Describe a situation where you faced a conflict and how you resolved it.",
            "Tell me about a time you demonstrated leadership.",
        ],
    }
}

const TECHNICAL_BANK: &[(&str, &[&str])] = &[
    (
        "web-development",
        &[
            "Implement a JavaScript function to debounce user input for a search bar, explaining your logic.",
            "Write a RESTful API endpoint using Node.js to fetch user data, including error handling.",
            "Explain how to optimize a React application for performance, with a focus on rendering.",
        ],
    ),
    (
        "data-science",
        &[
            "Write a Python function to preprocess a dataset with missing values, explaining your approach.",
            "Implement a linear regression model using scikit-learn and explain how you evaluate its performance.",
            "Describe how to tune hyperparameters for a machine learning model, with a code example.",
        ],
    ),
    (
        "civil-engineering",
        &[
            "Design a function to calculate the load-bearing capacity of a concrete beam, explaining your steps.",
            "Write a script to analyze structural stability using finite element analysis principles.",
            "Explain the logic behind selecting materials for a sustainable bridge design.",
        ],
    ),
    (
        "marketing",
        &[
            "Create a JavaScript function to analyze click-through rates for a digital campaign, explaining your logic.",
            "Write a script to automate A/B testing for email marketing, including metrics to track.",
            "Explain how to design a social media campaign using data-driven insights, with a code snippet.",
        ],
    ),
    (
        "mechanical",
        &[
            "Write a Python function to simulate stress analysis on a mechanical component, explaining your approach.",
            "Implement a script to calculate thermodynamic efficiency for a heat engine, with clear logic.",
            "Explain how to optimize a mechanical design for weight reduction, including a code example.",
        ],
    ),
];

/// Static technical questions for a domain. Unknown domains get web development.
pub fn technical_questions(domain: &str) -> &'static [&'static str] {
    let lookup = |d: &str| {
        TECHNICAL_BANK
            .iter()
            .find(|(name, _)| *name == d)
            .map(|(_, qs)| *qs)
    };
    lookup(domain)
        .or_else(|| lookup(DEFAULT_DOMAIN))
        .unwrap_or(&[])
}

fn static_questions(setup: &InterviewSetup) -> Vec<String> {
    let bank = match setup.interview_type {
        InterviewType::Hr => hr_questions(setup.hr_type.unwrap_or_default()),
        InterviewType::Technical => technical_questions(setup.domain_or_default()),
    };
    bank.iter().map(|q| q.to_string()).collect()
}

/// Serves every request from the built-in banks.
pub struct StaticQuestionSource;

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn questions(&self, setup: &InterviewSetup) -> Vec<String> {
        static_questions(setup)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed source
// ────────────────────────────────────────────────────────────────────────────

/// Generates technical questions via the LLM. HR interviews always use the
/// static banks. Any LLM failure falls back to the static technical bank.
pub struct LlmQuestionSource(pub LlmClient);

#[async_trait]
impl QuestionSource for LlmQuestionSource {
    async fn questions(&self, setup: &InterviewSetup) -> Vec<String> {
        if setup.interview_type == InterviewType::Hr {
            return static_questions(setup);
        }

        let domain = setup.domain_or_default();
        let prompt = build_questions_prompt(setup.interview_type.as_str(), domain);

        match self
            .0
            .call_text(&prompt, PLAIN_TEXT_SYSTEM, QUESTIONS_MAX_TOKENS)
            .await
        {
            Ok(text) => {
                let questions = split_questions(&text);
                if questions.is_empty() {
                    warn!("LLM returned no questions for {domain}; using static bank");
                    return static_questions(setup);
                }
                info!("Generated {} questions for {domain}", questions.len());
                questions
            }
            Err(e) => {
                warn!("Question generation failed for {domain}: {e}; using static bank");
                static_questions(setup)
            }
        }
    }
}

/// One question per non-blank line.
fn split_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(interview_type: InterviewType, hr: Option<HrType>, domain: Option<&str>) -> InterviewSetup {
        InterviewSetup {
            interview_type,
            hr_type: hr,
            domain: domain.map(str::to_string),
            duration_minutes: 10,
        }
    }

    #[tokio::test]
    async fn test_hr_defaults_to_general() {
        let qs = StaticQuestionSource
            .questions(&setup(InterviewType::Hr, None, None))
            .await;
        assert_eq!(qs.len(), 3);
        assert_eq!(qs[0], "Tell me about yourself and your background.");
    }

    #[tokio::test]
    async fn test_hr_behavioral_bank() {
        let qs = StaticQuestionSource
            .questions(&setup(InterviewType::Hr, Some(HrType::Behavioral), None))
            .await;
        assert!(qs[2].contains("leadership"));
    }

    #[tokio::test]
    async fn test_technical_domain_bank() {
        let qs = StaticQuestionSource
            .questions(&setup(InterviewType::Technical, None, Some("data-science")))
            .await;
        assert_eq!(qs.len(), 3);
        assert!(qs[0].contains("missing values"));
    }

    #[test]
    fn test_unknown_domain_falls_back_to_web_development() {
        assert_eq!(
            technical_questions("astrophysics"),
            technical_questions("web-development")
        );
    }

    #[test]
    fn test_every_bank_has_three_questions() {
        for (_, qs) in TECHNICAL_BANK {
            assert_eq!(qs.len(), 3);
        }
        for hr in [HrType::General, HrType::Freshers, HrType::Behavioral] {
            assert_eq!(hr_questions(hr).len(), 3);
        }
    }

    #[test]
    fn test_split_questions_drops_blank_lines() {
        let text = "1. First question?\n\n   \n2. Second question?\n";
        assert_eq!(
            split_questions(text),
            vec!["1. First question?", "2. Second question?"]
        );
    }
}
