// LLM prompt constants for answer feedback.

pub const FEEDBACK_MAX_TOKENS: u32 = 150;

/// Replace `{interview_type}`, `{question}` and `{transcript}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Analyze this {interview_type} interview response for "{question}": "{transcript}". Provide feedback, emphasizing clarity of logic for technical answers."#;

pub fn build_feedback_prompt(interview_type: &str, question: &str, transcript: &str) -> String {
    FEEDBACK_PROMPT_TEMPLATE
        .replace("{interview_type}", interview_type)
        .replace("{question}", question)
        .replace("{transcript}", transcript)
}

/// Words that signal a technical answer walked through its reasoning.
pub const LOGIC_WORDS: &[&str] = &[
    "approach",
    "logic",
    "reasoning",
    "solution",
    "steps",
    "implement",
    "code",
];

pub const FALLBACK_TECHNICAL_NO_LOGIC: &str =
    "Explain your logic more clearly, including the steps or reasoning behind your solution.";
pub const FALLBACK_TECHNICAL_WITH_LOGIC: &str =
    "Good explanation of logic, but consider adding a specific code example or optimization strategy.";
pub const FALLBACK_GENERAL: &str =
    "Response is clear, but try to provide more specific examples to strengthen your answer.";
