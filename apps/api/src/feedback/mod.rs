// Answer feedback: the external coaching collaborator, its local fallback,
// and the HTTP surface for scoring single answers.

pub mod generator;
pub mod handlers;
pub mod prompts;
