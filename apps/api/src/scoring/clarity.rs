use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::tables::{round_to, FILLERS};

/// Floor applied to the clarity score no matter how many fillers appear.
const CLARITY_FLOOR: f64 = 0.3;
/// Score lost per unit of filler density.
const DENSITY_PENALTY: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClarityInfo {
    pub filler_count: usize,
    /// Fillers per token, rounded to 4 decimals.
    pub filler_density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClarityReport {
    pub score: f64,
    pub info: ClarityInfo,
}

static FILLER_PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

/// Word boundaries are ASCII-only: accented letters count as non-word characters.
fn whole_word_pattern(filler: &str) -> Regex {
    Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(filler)))
        .expect("escaped filler is always a valid pattern")
}

fn count_whole_word(normalized: &str, filler: &str) -> usize {
    let cached = FILLER_PATTERNS
        .get_or_init(|| FILLERS.iter().map(|f| (*f, whole_word_pattern(f))).collect());

    match cached.iter().find(|(f, _)| *f == filler) {
        Some((_, re)) => re.find_iter(normalized).count(),
        None => whole_word_pattern(filler).find_iter(normalized).count(),
    }
}

/// Penalizes filler density: `max(0.3, 1 - 8 * fillers / tokens)`.
pub fn score_clarity(normalized: &str, fillers: &[&str]) -> ClarityReport {
    let tokens = normalized.split(' ').count().max(1);
    let filler_count: usize = fillers
        .iter()
        .map(|f| count_whole_word(normalized, f))
        .sum();

    let density = filler_count as f64 / tokens as f64;
    let score = (1.0 - DENSITY_PENALTY * density).max(CLARITY_FLOOR);

    ClarityReport {
        score: round_to(score, 2),
        info: ClarityInfo {
            filler_count,
            filler_density: round_to(density, 4),
        },
    }
}
