//! Aggregation of the factor scores and the human-readable verdict.

use serde::{Deserialize, Serialize};

use crate::scoring::clarity::ClarityInfo;
use crate::scoring::duration::DurationBucket;
use crate::scoring::keywords::KeywordCoverage;
use crate::scoring::structure::StructureReport;
use crate::scoring::tables::{round_to, ScoringWeights};

/// One-line summary attached to every verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryLabel {
    Solid,
    #[serde(rename = "Good but can be tighter")]
    GoodButCanBeTighter,
    #[serde(rename = "Needs more specifics")]
    NeedsMoreSpecifics,
}

impl SummaryLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLabel::Solid => "Solid",
            SummaryLabel::GoodButCanBeTighter => "Good but can be tighter",
            SummaryLabel::NeedsMoreSpecifics => "Needs more specifics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub lines: Vec<String>,
    pub summary: SummaryLabel,
}

impl Verdict {
    /// Bullet lines followed by a blank line and the summary.
    pub fn text(&self) -> String {
        format!(
            "{}\n\nSummary: {}",
            self.lines.join("\n"),
            self.summary.as_str()
        )
    }
}

/// Weighted 0–10 score, rounded to one decimal.
pub fn overall_score(
    weights: &ScoringWeights,
    length: f64,
    keywords: f64,
    structure: f64,
    clarity: f64,
) -> f64 {
    let weighted = weights.length * length
        + weights.keywords * keywords
        + weights.structure * structure
        + weights.clarity * clarity;
    round_to(weighted * 10.0, 1)
}

/// Everything the verdict needs from the individual scorers.
pub struct VerdictInputs<'a> {
    pub bucket: DurationBucket,
    pub secs: f64,
    pub keywords: &'a KeywordCoverage,
    pub structure: &'a StructureReport,
    pub clarity: &'a ClarityInfo,
    pub guidance: Option<&'a str>,
}

pub fn build_verdict(inputs: &VerdictInputs<'_>) -> Verdict {
    let mut lines = Vec::with_capacity(5);
    let bucket = inputs.bucket;

    if bucket.is_short() {
        lines.push(format!(
            "• Answer was {} ({:.1}s). Add one concrete impact example.",
            bucket.label().to_lowercase(),
            inputs.secs
        ));
    } else if bucket.is_long() {
        lines.push(format!(
            "• Answer was {} ({:.1}s). Trim repetition and emphasize outcomes.",
            bucket.label().to_lowercase(),
            inputs.secs
        ));
    } else {
        lines.push(format!("• Good pacing at {:.1}s.", inputs.secs));
    }

    let kw_score = inputs.keywords.score;
    if kw_score >= 0.8 {
        lines.push(
            "• Excellent coverage across projects, skills, outcomes, experience, and goals."
                .to_string(),
        );
    } else if kw_score >= 0.6 {
        lines.push("• Good coverage; add one more outcome/result to strengthen impact.".to_string());
    } else {
        let missing = inputs.keywords.missing_buckets();
        lines.push(format!(
            "• Content is thin; explicitly mention one project, the stack, and the result (missing: {}).",
            missing.join(", ")
        ));
    }

    let missing_sections = inputs.structure.missing();
    if missing_sections.is_empty() {
        lines.push("• Clean structure: intro → experience → skills → goal.".to_string());
    } else {
        let names: Vec<&str> = missing_sections.iter().map(|s| s.as_str()).collect();
        lines.push(format!(
            "• Improve structure; missing parts: {}",
            names.join(", ")
        ));
    }

    match inputs.clarity.filler_count {
        0 => lines.push("• Clear delivery with no filler words.".to_string()),
        1..=2 => lines.push("• Mostly clear; reduce minor fillers.".to_string()),
        n => lines.push(format!("• Reduce fillers ({n}) to sound more confident.")),
    }

    if let Some(guidance) = inputs.guidance {
        lines.push(format!("• AI Guidance: {guidance}"));
    }

    let summary = summarize(bucket, kw_score, missing_sections.is_empty());

    Verdict { lines, summary }
}

/// The order of these checks decides boundary cases and must not change.
fn summarize(bucket: DurationBucket, kw_score: f64, structure_complete: bool) -> SummaryLabel {
    if kw_score >= 0.6 && structure_complete && bucket == DurationBucket::Ideal {
        SummaryLabel::Solid
    } else if bucket.label().starts_with("Slightly") || kw_score >= 0.6 {
        SummaryLabel::GoodButCanBeTighter
    } else {
        SummaryLabel::NeedsMoreSpecifics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::keywords::BucketMatch;
    use crate::scoring::structure::SectionPresence;
    use crate::scoring::tables::StructureSection;

    fn coverage(score: f64, missing: &[&str]) -> KeywordCoverage {
        KeywordCoverage {
            score,
            details: missing
                .iter()
                .map(|b| BucketMatch {
                    bucket: b.to_string(),
                    matched: vec![],
                })
                .collect(),
        }
    }

    fn structure(missing: &[StructureSection]) -> StructureReport {
        let all = [
            StructureSection::Intro,
            StructureSection::Experience,
            StructureSection::Skills,
            StructureSection::Goal,
            StructureSection::Logic,
        ];
        StructureReport {
            score: 0.0,
            parts: all
                .iter()
                .map(|s| SectionPresence {
                    section: *s,
                    present: !missing.contains(s),
                })
                .collect(),
        }
    }

    fn clarity(filler_count: usize) -> ClarityInfo {
        ClarityInfo {
            filler_count,
            filler_density: 0.0,
        }
    }

    #[test]
    fn test_overall_full_marks() {
        let w = ScoringWeights::default();
        assert_eq!(overall_score(&w, 1.0, 1.0, 1.0, 1.0), 10.0);
        assert_eq!(overall_score(&w, 0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_overall_weighted() {
        // 10 * (0.2*1 + 0.35*0.17 + 0.25*0.2 + 0.2*0.3) = 3.695 → 3.7
        let w = ScoringWeights::default();
        assert_eq!(overall_score(&w, 1.0, 0.17, 0.2, 0.3), 3.7);
    }

    #[test]
    fn test_summary_solid() {
        assert_eq!(summarize(DurationBucket::Ideal, 0.6, true), SummaryLabel::Solid);
    }

    #[test]
    fn test_summary_solid_requires_complete_structure() {
        assert_eq!(
            summarize(DurationBucket::Ideal, 0.9, false),
            SummaryLabel::GoodButCanBeTighter
        );
    }

    #[test]
    fn test_summary_slightly_bucket_is_tighter_even_with_low_keywords() {
        assert_eq!(
            summarize(DurationBucket::SlightlyLong, 0.1, false),
            SummaryLabel::GoodButCanBeTighter
        );
        assert_eq!(
            summarize(DurationBucket::SlightlyShort, 0.1, true),
            SummaryLabel::GoodButCanBeTighter
        );
    }

    #[test]
    fn test_summary_needs_specifics() {
        assert_eq!(
            summarize(DurationBucket::Ideal, 0.59, true),
            SummaryLabel::NeedsMoreSpecifics
        );
        assert_eq!(
            summarize(DurationBucket::TooShort, 0.5, true),
            SummaryLabel::NeedsMoreSpecifics
        );
        assert_eq!(
            summarize(DurationBucket::Missing, 0.0, false),
            SummaryLabel::NeedsMoreSpecifics
        );
    }

    #[test]
    fn test_verdict_lines_in_order() {
        let kw = coverage(0.33, &["Impact/Outcome", "Coding"]);
        let st = structure(&[StructureSection::Goal, StructureSection::Logic]);
        let cl = clarity(3);
        let verdict = build_verdict(&VerdictInputs {
            bucket: DurationBucket::SlightlyShort,
            secs: 40.0,
            keywords: &kw,
            structure: &st,
            clarity: &cl,
            guidance: Some("Be concrete."),
        });

        assert_eq!(
            verdict.lines,
            vec![
                "• Answer was slightly short (40.0s). Add one concrete impact example.",
                "• Content is thin; explicitly mention one project, the stack, and the result (missing: Impact/Outcome, Coding).",
                "• Improve structure; missing parts: goal, logic",
                "• Reduce fillers (3) to sound more confident.",
                "• AI Guidance: Be concrete.",
            ]
        );
        assert_eq!(verdict.summary, SummaryLabel::GoodButCanBeTighter);
    }

    #[test]
    fn test_verdict_positive_path() {
        let kw = coverage(0.83, &["Coding"]);
        let st = structure(&[]);
        let cl = clarity(0);
        let verdict = build_verdict(&VerdictInputs {
            bucket: DurationBucket::Ideal,
            secs: 60.0,
            keywords: &kw,
            structure: &st,
            clarity: &cl,
            guidance: None,
        });

        assert_eq!(verdict.lines.len(), 4);
        assert_eq!(verdict.lines[0], "• Good pacing at 60.0s.");
        assert!(verdict.lines[1].contains("Excellent coverage"));
        assert!(verdict.lines[2].starts_with("• Clean structure"));
        assert_eq!(verdict.lines[3], "• Clear delivery with no filler words.");
        assert_eq!(verdict.summary, SummaryLabel::Solid);
        assert!(verdict.text().ends_with("\n\nSummary: Solid"));
    }

    #[test]
    fn test_long_answer_and_minor_fillers() {
        let kw = coverage(0.67, &["Coding", "Projects"]);
        let st = structure(&[]);
        let cl = clarity(2);
        let verdict = build_verdict(&VerdictInputs {
            bucket: DurationBucket::TooLong,
            secs: 200.0,
            keywords: &kw,
            structure: &st,
            clarity: &cl,
            guidance: None,
        });
        assert_eq!(
            verdict.lines[0],
            "• Answer was too long (200.0s). Trim repetition and emphasize outcomes."
        );
        assert_eq!(
            verdict.lines[1],
            "• Good coverage; add one more outcome/result to strengthen impact."
        );
        assert_eq!(verdict.lines[3], "• Mostly clear; reduce minor fillers.");
        assert_eq!(verdict.summary, SummaryLabel::GoodButCanBeTighter);
    }
}
