//! Constant lookup tables for answer scoring.
//!
//! Everything here is read-only process-wide data. Scorers take the table
//! slices as arguments so alternate tables can be swapped in for tests.

use serde::{Deserialize, Serialize};

/// Lower bound of an acceptable recording, in seconds.
pub const ABS_MIN_SECS: f64 = 30.0;
/// Upper bound of an acceptable recording, in seconds.
pub const ABS_MAX_SECS: f64 = 180.0;
pub const MIN_IDEAL_SECS: f64 = 45.0;
pub const MAX_IDEAL_SECS: f64 = 75.0;

/// Named keyword groups. Coverage is the fraction of groups with at least one hit.
pub type KeywordBuckets = &'static [(&'static str, &'static [&'static str])];

pub const KEYWORD_BUCKETS: KeywordBuckets = &[
    (
        "Projects",
        &[
            "project",
            "resume analyzer",
            "disaster monitoring",
            "interview simulator",
            "ai-dms",
        ],
    ),
    (
        "Skills/Stack",
        &[
            "python",
            "react",
            "tailwind",
            "flask",
            "nlp",
            "transformer",
            "bert",
            "spacy",
            "pandas",
            "full-stack",
            "javascript",
            "sql",
            "docker",
        ],
    ),
    (
        "Impact/Outcome",
        &[
            "real-world",
            "production",
            "scale",
            "impact",
            "value",
            "deployed",
            "scalable",
        ],
    ),
    (
        "Experience",
        &[
            "internship",
            "infosys",
            "team",
            "hackathon",
            "collaborat",
            "mentor",
        ],
    ),
    (
        "Goal/Intent",
        &[
            "looking for",
            "apply",
            "role",
            "contribute",
            "grow",
            "from day one",
        ],
    ),
    (
        "Coding",
        &[
            "algorithm",
            "data structure",
            "code",
            "implement",
            "function",
            "class",
            "method",
            "optimize",
        ],
    ),
];

/// The structural parts of a well-formed answer, in verdict order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureSection {
    Intro,
    Experience,
    Skills,
    Goal,
    Logic,
}

impl StructureSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureSection::Intro => "intro",
            StructureSection::Experience => "experience",
            StructureSection::Skills => "skills",
            StructureSection::Goal => "goal",
            StructureSection::Logic => "logic",
        }
    }
}

pub type StructureHints = &'static [(StructureSection, &'static [&'static str])];

pub const STRUCTURE_HINTS: StructureHints = &[
    (
        StructureSection::Intro,
        &["hi", "hello", "i'm", "i am", "my name"],
    ),
    (
        StructureSection::Experience,
        &["project", "built", "developed", "worked on", "led"],
    ),
    (
        StructureSection::Skills,
        &[
            "python",
            "react",
            "tailwind",
            "nlp",
            "machine learning",
            "ai",
            "full-stack",
            "backend",
            "javascript",
            "sql",
            "docker",
        ],
    ),
    (
        StructureSection::Goal,
        &["looking for", "apply", "role", "contribute", "grow"],
    ),
    (
        StructureSection::Logic,
        &["approach", "logic", "reasoning", "solution", "steps"],
    ),
];

pub const FILLERS: &[&str] = &[
    "um",
    "uh",
    "like",
    "you know",
    "sort of",
    "kind of",
    "basically",
    "actually",
];

/// Per-factor weights for the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub length: f64,
    pub keywords: f64,
    pub structure: f64,
    pub clarity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            length: 0.20,
            keywords: 0.35,
            structure: 0.25,
            clarity: 0.20,
        }
    }
}

/// A full set of scoring tables.
#[derive(Debug, Clone, Copy)]
pub struct ScoringTables {
    pub keyword_buckets: KeywordBuckets,
    pub structure_hints: StructureHints,
    pub fillers: &'static [&'static str],
    pub weights: ScoringWeights,
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            keyword_buckets: KEYWORD_BUCKETS,
            structure_hints: STRUCTURE_HINTS,
            fillers: FILLERS,
            weights: ScoringWeights::default(),
        }
    }
}

/// Rounds `value` to `places` decimal digits, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
