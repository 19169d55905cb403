// Shared prompt fragments. Each module that calls the LLM keeps its own
// prompts.rs alongside it; cross-cutting pieces live here.

/// System prompt fragment for short plain-text answers.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an experienced interview coach. \
    Respond in plain text only. \
    Do NOT use markdown formatting. \
    Do NOT include greetings, apologies, or meta commentary.";
