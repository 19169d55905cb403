//! Axum route handlers for questions and interview sessions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::generator::{resolve_guidance, FeedbackRequest};
use crate::interview::models::{InterviewSetup, InterviewType};
use crate::interview::session::{
    AnsweredQuestion, InterviewSession, RecordingOutcome, Submission,
};
use crate::scoring::{score_answer, ScoringInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

/// An answer whose transcript and duration were resolved by the client.
#[derive(Debug, Deserialize)]
pub struct AnswerPayload {
    pub transcript: String,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

impl AnswerPayload {
    fn into_input(self) -> Result<ScoringInput, AppError> {
        Ok(ScoringInput::new(self.transcript, self.duration_seconds)?)
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: InterviewSession,
    pub current_question: Option<String>,
    pub average_overall: Option<f64>,
}

impl From<&InterviewSession> for SessionView {
    fn from(session: &InterviewSession) -> Self {
        Self {
            current_question: session.current_question().map(str::to_string),
            average_overall: session.average_overall(),
            session: session.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordingResponse {
    pub recording: RecordingOutcome,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub answer: AnsweredQuestion,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/questions
pub async fn handle_questions(
    State(state): State<AppState>,
    Json(setup): Json<InterviewSetup>,
) -> Result<Json<QuestionsResponse>, AppError> {
    setup.validate()?;
    let questions = state.questions.questions(&setup).await;
    Ok(Json(QuestionsResponse { questions }))
}

/// POST /api/v1/interviews
///
/// Fetches the question list and opens a session on the first question.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(setup): Json<InterviewSetup>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    setup.validate()?;
    let questions = state.questions.questions(&setup).await;
    let session = InterviewSession::new(setup, questions);
    let view = SessionView::from(&session);

    info!(
        "Interview {} started ({}, {} questions)",
        session.id,
        session.setup.interview_type.as_str(),
        session.questions.len()
    );
    state.sessions.write().await.insert(session.id, session);

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(SessionView::from(session)))
}

/// POST /api/v1/interviews/:id/replay
pub async fn handle_replay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    with_session(&state, id, |session| {
        session.replay()?;
        Ok(SessionView::from(&*session))
    })
    .await
}

/// POST /api/v1/interviews/:id/recording/start
pub async fn handle_start_recording(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    with_session(&state, id, |session| {
        session.start_recording()?;
        Ok(SessionView::from(&*session))
    })
    .await
}

/// POST /api/v1/interviews/:id/recording/stop
pub async fn handle_stop_recording(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerPayload>,
) -> Result<Json<RecordingResponse>, AppError> {
    let input = payload.into_input()?;
    with_session(&state, id, |session| {
        let recording = session.stop_recording(input)?;
        Ok(RecordingResponse {
            recording,
            session: SessionView::from(&*session),
        })
    })
    .await
}

/// POST /api/v1/interviews/:id/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerPayload>,
) -> Result<Json<SessionView>, AppError> {
    let input = payload.into_input()?;
    with_session(&state, id, |session| {
        session.upload(input)?;
        Ok(SessionView::from(&*session))
    })
    .await
}

/// POST /api/v1/interviews/:id/submit
///
/// Scores the answer under review and advances the session. The session lock
/// is released while guidance is fetched; the `Submitted` state blocks any
/// other action in the meantime. The remaining work runs on its own task so a
/// dropped request still records the answer.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let (submission, interview_type) = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        (session.begin_submit()?, session.setup.interview_type)
    };

    tokio::spawn(finish_submission(state, id, submission, interview_type))
        .await
        .map_err(|e| anyhow::anyhow!("Submission task for interview {id} failed: {e}"))?
}

async fn finish_submission(
    state: AppState,
    id: Uuid,
    submission: Submission,
    interview_type: InterviewType,
) -> Result<Json<SubmitResponse>, AppError> {
    let feedback_request = FeedbackRequest {
        question: submission.question.clone(),
        transcript: submission.answer.input.transcript().to_string(),
        interview_type,
    };
    let guidance = resolve_guidance(
        state.feedback.as_ref(),
        &feedback_request,
        state.config.feedback_timeout,
    )
    .await;

    let result = score_answer(&submission.answer.input, Some(&guidance.text));
    let answer = AnsweredQuestion {
        question_index: submission.question_index,
        question: submission.question,
        source: submission.answer.source,
        guidance,
        result,
    };

    with_session(&state, id, |session| {
        session.complete_submission(answer.clone())?;
        Ok(SubmitResponse {
            answer,
            session: SessionView::from(&*session),
        })
    })
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Interview {id} not found"))
}

/// Runs `f` against one session under the store's write lock.
async fn with_session<T, F>(state: &AppState, id: Uuid, f: F) -> Result<Json<T>, AppError>
where
    F: FnOnce(&mut InterviewSession) -> Result<T, AppError>,
{
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    f(session).map(Json)
}
