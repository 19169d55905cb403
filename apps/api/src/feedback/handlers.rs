//! Axum route handlers for one-off answer scoring and feedback.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::feedback::generator::{resolve_guidance, FeedbackRequest, Guidance};
use crate::interview::models::InterviewType;
use crate::scoring::{score_answer, ScoringInput, ScoringResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreAnswerRequest {
    pub transcript: String,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub question: Option<String>,
    pub interview_type: InterviewType,
}

#[derive(Debug, Serialize)]
pub struct ScoreAnswerResponse {
    pub result: ScoringResult,
    pub guidance: Guidance,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub source: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/answers/score
///
/// Scores a single answer outside any interview session. Guidance comes
/// from the configured generator, or the rule-based fallback.
pub async fn handle_score_answer(
    State(state): State<AppState>,
    Json(request): Json<ScoreAnswerRequest>,
) -> Result<Json<ScoreAnswerResponse>, AppError> {
    let input = ScoringInput::new(request.transcript, request.duration_seconds)?;

    let feedback_request = FeedbackRequest {
        question: request.question.unwrap_or_default(),
        transcript: input.transcript().to_string(),
        interview_type: request.interview_type,
    };
    let guidance = resolve_guidance(
        state.feedback.as_ref(),
        &feedback_request,
        state.config.feedback_timeout,
    )
    .await;

    let result = score_answer(&input, Some(&guidance.text));
    info!(
        "Scored answer: bucket={} overall={} summary={}",
        result.duration_bucket,
        result.overall,
        result.verdict.summary.as_str()
    );

    Ok(Json(ScoreAnswerResponse { result, guidance }))
}

/// POST /api/v1/feedback
///
/// Returns only the coaching sentence for an answer.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let guidance = resolve_guidance(
        state.feedback.as_ref(),
        &request,
        state.config.feedback_timeout,
    )
    .await;

    Ok(Json(FeedbackResponse {
        feedback: guidance.text,
        source: guidance.source,
    }))
}
