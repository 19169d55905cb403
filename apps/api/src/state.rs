use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::feedback::generator::FeedbackGenerator;
use crate::interview::questions::QuestionSource;
use crate::interview::session::InterviewSession;

/// In-memory interview sessions keyed by id.
pub type SessionStore = Arc<RwLock<HashMap<Uuid, InterviewSession>>>;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable feedback backend. LLM when an API key is set, rule-based otherwise.
    pub feedback: Arc<dyn FeedbackGenerator>,
    /// Pluggable question source. Same selection rule as `feedback`.
    pub questions: Arc<dyn QuestionSource>,
    pub sessions: SessionStore,
}
