// LLM prompt constants for question generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Token ceiling for a generated question list.
pub const QUESTIONS_MAX_TOKENS: u32 = 200;

/// Replace `{interview_type}` and `{domain}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = "Generate 3 {interview_type} interview questions for {domain}, \
    focusing on coding tasks with clear logic explanation. \
    Put each question on its own line.";

pub fn build_questions_prompt(interview_type: &str, domain: &str) -> String {
    QUESTIONS_PROMPT_TEMPLATE
        .replace("{interview_type}", interview_type)
        .replace("{domain}", domain)
}
