mod config;
mod errors;
mod feedback;
mod interview;
mod llm_client;
mod routes;
mod scoring;
mod state;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::feedback::generator::{FeedbackGenerator, LlmFeedbackGenerator, RuleBasedFeedback};
use crate::interview::questions::{LlmQuestionSource, QuestionSource, StaticQuestionSource};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Pick backends: LLM when a key is configured, local rules otherwise
    let feedback: Arc<dyn FeedbackGenerator>;
    let questions: Arc<dyn QuestionSource>;
    match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.llm_max_attempts);
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            feedback = Arc::new(LlmFeedbackGenerator(llm.clone()));
            questions = Arc::new(LlmQuestionSource(llm));
        }
        None => {
            info!("ANTHROPIC_API_KEY not set; using rule-based feedback and static questions");
            feedback = Arc::new(RuleBasedFeedback);
            questions = Arc::new(StaticQuestionSource);
        }
    }
    info!(
        "Feedback backend: {} (timeout {:?})",
        feedback.backend(),
        config.feedback_timeout
    );

    let state = AppState {
        config: config.clone(),
        feedback,
        questions,
        sessions: Arc::new(RwLock::new(HashMap::new())),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
