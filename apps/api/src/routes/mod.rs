pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers as feedback;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Single-answer scoring
        .route("/api/v1/answers/score", post(feedback::handle_score_answer))
        .route("/api/v1/feedback", post(feedback::handle_feedback))
        // Interview flow
        .route("/api/v1/questions", post(interview::handle_questions))
        .route("/api/v1/interviews", post(interview::handle_create_interview))
        .route("/api/v1/interviews/:id", get(interview::handle_get_interview))
        .route(
            "/api/v1/interviews/:id/replay",
            post(interview::handle_replay),
        )
        .route(
            "/api/v1/interviews/:id/recording/start",
            post(interview::handle_start_recording),
        )
        .route(
            "/api/v1/interviews/:id/recording/stop",
            post(interview::handle_stop_recording),
        )
        .route(
            "/api/v1/interviews/:id/upload",
            post(interview::handle_upload),
        )
        .route(
            "/api/v1/interviews/:id/submit",
            post(interview::handle_submit),
        )
        .with_state(state)
}
