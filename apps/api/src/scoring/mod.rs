//! Answer Scoring Engine: turns a transcript and its duration into factor
//! scores, a weighted 0–10 overall score, and a verdict.
//!
//! Pure and synchronous: no I/O, no shared mutable state. The only input that
//! comes from outside is the optional guidance sentence, which callers resolve
//! beforehand through `feedback`.

pub mod clarity;
pub mod duration;
pub mod keywords;
pub mod structure;
pub mod tables;
pub mod verdict;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::clarity::{score_clarity, ClarityInfo};
use crate::scoring::duration::{bucket_duration, DurationBucket};
use crate::scoring::keywords::{score_keywords, BucketMatch};
use crate::scoring::structure::{score_structure, SectionPresence};
use crate::scoring::tables::ScoringTables;
use crate::scoring::verdict::{build_verdict, overall_score, Verdict, VerdictInputs};

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A single answer to be scored. Construct through [`ScoringInput::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringInput {
    transcript: String,
    duration_seconds: Option<f64>,
}

impl ScoringInput {
    /// Rejects negative or non-finite durations. `None` is a missing recording.
    pub fn new(
        transcript: impl Into<String>,
        duration_seconds: Option<f64>,
    ) -> Result<Self, ScoringError> {
        if let Some(secs) = duration_seconds {
            if !secs.is_finite() {
                return Err(ScoringError::InvalidInput(
                    "duration_seconds must be a finite number".to_string(),
                ));
            }
            if secs < 0.0 {
                return Err(ScoringError::InvalidInput(format!(
                    "duration_seconds cannot be negative (got {secs})"
                )));
            }
        }

        Ok(Self {
            transcript: transcript.into(),
            duration_seconds,
        })
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }
}

/// Full scoring output. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub duration_seconds: f64,
    pub duration_bucket: DurationBucket,
    pub length_score: f64,
    pub keyword_score: f64,
    pub structure_score: f64,
    pub clarity_score: f64,
    /// 0–10, one decimal.
    pub overall: f64,
    pub keyword_details: Vec<BucketMatch>,
    pub structure_parts: Vec<SectionPresence>,
    pub clarity_info: ClarityInfo,
    pub verdict: Verdict,
    pub verdict_text: String,
}

/// Lower-cases, collapses whitespace runs to one space, and trims.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scores an answer against the reference tables.
pub fn score_answer(input: &ScoringInput, guidance: Option<&str>) -> ScoringResult {
    score_answer_with(&ScoringTables::default(), input, guidance)
}

pub fn score_answer_with(
    tables: &ScoringTables,
    input: &ScoringInput,
    guidance: Option<&str>,
) -> ScoringResult {
    let normalized = normalize(&input.transcript);
    let secs = input.duration_seconds.unwrap_or(0.0);

    let (duration_bucket, length_score) = bucket_duration(input.duration_seconds);
    let keywords = score_keywords(&normalized, tables.keyword_buckets);
    let structure = score_structure(&normalized, tables.structure_hints);
    let clarity = score_clarity(&normalized, tables.fillers);

    let overall = overall_score(
        &tables.weights,
        length_score,
        keywords.score,
        structure.score,
        clarity.score,
    );

    let verdict = build_verdict(&VerdictInputs {
        bucket: duration_bucket,
        secs,
        keywords: &keywords,
        structure: &structure,
        clarity: &clarity.info,
        guidance,
    });
    let verdict_text = verdict.text();

    ScoringResult {
        duration_seconds: secs,
        duration_bucket,
        length_score,
        keyword_score: keywords.score,
        structure_score: structure.score,
        clarity_score: clarity.score,
        overall,
        keyword_details: keywords.details,
        structure_parts: structure.parts,
        clarity_info: clarity.info,
        verdict,
        verdict_text,
    }
}
