// Interview flow: setup models, question sourcing, and the per-session
// state machine that sequences questions and scores each answer.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod questions;
pub mod session;
