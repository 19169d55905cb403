//! Interview session state machine.
//!
//! AwaitingStart | Reviewing --replay--> same state
//! AwaitingStart | Reviewing --start_recording--> Recording
//! Recording --stop_recording--> Reviewing | AwaitingStart (rejected) | next question
//! AwaitingStart | Reviewing --upload--> Reviewing
//! Reviewing --begin_submit--> Submitted --complete_submission--> next question | Completed
//!
//! Scoring itself happens outside the session: `begin_submit` hands out the
//! pending answer, the caller scores it, and `complete_submission` records it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::feedback::generator::Guidance;
use crate::interview::models::InterviewSetup;
use crate::scoring::duration::{bucket_duration, DurationBucket};
use crate::scoring::{ScoringInput, ScoringResult};

pub const REPLAYS_PER_QUESTION: u32 = 2;
pub const ATTEMPTS_PER_QUESTION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingStart,
    Recording,
    Reviewing,
    Submitted,
    Completed,
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Cannot {action} while the session is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("No recording attempts left for this question")]
    AttemptsExhausted,

    #[error("No replays left for this question")]
    ReplaysExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Recording,
    Upload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingAnswer {
    pub input: ScoringInput,
    pub source: AnswerSource,
}

/// A scored answer, kept in question order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnsweredQuestion {
    pub question_index: usize,
    pub question: String,
    pub source: AnswerSource,
    pub guidance: Guidance,
    pub result: ScoringResult,
}

/// What happened when a recording was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordingOutcome {
    Accepted { bucket: DurationBucket },
    Rejected { bucket: DurationBucket, attempts_left: u32 },
    /// Rejected with no attempts left; the session moved on.
    Skipped { bucket: DurationBucket },
}

/// Everything needed to score the answer under review.
#[derive(Debug, Clone)]
pub struct Submission {
    pub question_index: usize,
    pub question: String,
    pub answer: PendingAnswer,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewSession {
    pub id: Uuid,
    pub setup: InterviewSetup,
    pub questions: Vec<String>,
    pub current_index: usize,
    pub state: SessionState,
    pub replays_left: u32,
    pub attempts_left: u32,
    pub pending: Option<PendingAnswer>,
    pub answers: Vec<AnsweredQuestion>,
    pub skipped: Vec<usize>,
    pub total_spoken_secs: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(setup: InterviewSetup, questions: Vec<String>) -> Self {
        let now = Utc::now();
        let state = if questions.is_empty() {
            SessionState::Completed
        } else {
            SessionState::AwaitingStart
        };
        Self {
            id: Uuid::new_v4(),
            setup,
            questions,
            current_index: 0,
            state,
            replays_left: REPLAYS_PER_QUESTION,
            attempts_left: ATTEMPTS_PER_QUESTION,
            pending: None,
            answers: Vec::new(),
            skipped: Vec::new(),
            total_spoken_secs: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn current_question(&self) -> Option<&str> {
        if self.state == SessionState::Completed {
            return None;
        }
        self.questions.get(self.current_index).map(String::as_str)
    }

    /// Mean overall score across answered questions.
    pub fn average_overall(&self) -> Option<f64> {
        if self.answers.is_empty() {
            return None;
        }
        let sum: f64 = self.answers.iter().map(|a| a.result.overall).sum();
        Some(sum / self.answers.len() as f64)
    }

    pub fn replay(&mut self) -> Result<u32, SessionError> {
        self.expect_state(
            "replay the question",
            &[
                SessionState::AwaitingStart,
                SessionState::Reviewing,
            ],
        )?;
        if self.replays_left == 0 {
            return Err(SessionError::ReplaysExhausted);
        }
        self.replays_left -= 1;
        self.touch();
        Ok(self.replays_left)
    }

    pub fn start_recording(&mut self) -> Result<(), SessionError> {
        self.expect_state(
            "start recording",
            &[
                SessionState::AwaitingStart,
                SessionState::Reviewing,
            ],
        )?;
        self.consume_attempt()?;
        self.pending = None;
        self.state = SessionState::Recording;
        self.touch();
        Ok(())
    }

    /// Accepts the recording unless it is missing, too short, or too long.
    pub fn stop_recording(
        &mut self,
        input: ScoringInput,
    ) -> Result<RecordingOutcome, SessionError> {
        self.expect_state("stop recording", &[SessionState::Recording])?;

        self.total_spoken_secs += input.duration_seconds().unwrap_or(0.0);
        let (bucket, _) = bucket_duration(input.duration_seconds());

        let outcome = if bucket.is_out_of_range() || bucket == DurationBucket::Missing {
            if self.attempts_left > 0 {
                self.state = SessionState::AwaitingStart;
                RecordingOutcome::Rejected {
                    bucket,
                    attempts_left: self.attempts_left,
                }
            } else {
                info!(
                    "Session {}: no attempts left on question {}, skipping",
                    self.id, self.current_index
                );
                self.skipped.push(self.current_index);
                self.advance();
                RecordingOutcome::Skipped { bucket }
            }
        } else {
            self.pending = Some(PendingAnswer {
                input,
                source: AnswerSource::Recording,
            });
            self.state = SessionState::Reviewing;
            RecordingOutcome::Accepted { bucket }
        };

        self.touch();
        Ok(outcome)
    }

    /// Uploaded answers are accepted whatever their length.
    pub fn upload(&mut self, input: ScoringInput) -> Result<(), SessionError> {
        self.expect_state(
            "upload an answer",
            &[
                SessionState::AwaitingStart,
                SessionState::Reviewing,
            ],
        )?;
        self.consume_attempt()?;
        self.pending = Some(PendingAnswer {
            input,
            source: AnswerSource::Upload,
        });
        self.state = SessionState::Reviewing;
        self.touch();
        Ok(())
    }

    pub fn begin_submit(&mut self) -> Result<Submission, SessionError> {
        self.expect_state("submit", &[SessionState::Reviewing])?;
        let answer = self.pending.take().ok_or(SessionError::InvalidTransition {
            action: "submit",
            state: self.state,
        })?;
        let question = self.questions[self.current_index].clone();
        self.state = SessionState::Submitted;
        self.touch();
        Ok(Submission {
            question_index: self.current_index,
            question,
            answer,
        })
    }

    pub fn complete_submission(&mut self, answered: AnsweredQuestion) -> Result<(), SessionError> {
        self.expect_state("record a scored answer", &[SessionState::Submitted])?;
        debug!(
            "Session {}: question {} scored {}",
            self.id, answered.question_index, answered.result.overall
        );
        self.answers.push(answered);
        self.advance();
        self.touch();
        Ok(())
    }

    fn advance(&mut self) {
        self.pending = None;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.replays_left = REPLAYS_PER_QUESTION;
            self.attempts_left = ATTEMPTS_PER_QUESTION;
            self.state = SessionState::AwaitingStart;
        } else {
            info!("Session {} completed", self.id);
            self.state = SessionState::Completed;
        }
    }

    fn consume_attempt(&mut self) -> Result<(), SessionError> {
        if self.attempts_left == 0 {
            return Err(SessionError::AttemptsExhausted);
        }
        self.attempts_left -= 1;
        Ok(())
    }

    fn expect_state(
        &self,
        action: &'static str,
        allowed: &[SessionState],
    ) -> Result<(), SessionError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
