use serde::{Deserialize, Serialize};

use crate::scoring::tables::{round_to, KeywordBuckets};

/// Keywords from one bucket that appeared in the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketMatch {
    pub bucket: String,
    pub matched: Vec<String>,
}

impl BucketMatch {
    pub fn is_hit(&self) -> bool {
        !self.matched.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCoverage {
    pub score: f64,
    pub details: Vec<BucketMatch>,
}

impl KeywordCoverage {
    /// Buckets with no matched keyword, in table order.
    pub fn missing_buckets(&self) -> Vec<&str> {
        self.details
            .iter()
            .filter(|d| !d.is_hit())
            .map(|d| d.bucket.as_str())
            .collect()
    }
}

/// Fraction of keyword buckets touched by the normalized answer.
///
/// Matching is plain substring containment, so "code" also hits inside
/// "decode". The denominator is the size of whatever table is passed in.
pub fn score_keywords(normalized: &str, buckets: KeywordBuckets) -> KeywordCoverage {
    let details: Vec<BucketMatch> = buckets
        .iter()
        .map(|(bucket, keywords)| BucketMatch {
            bucket: bucket.to_string(),
            matched: keywords
                .iter()
                .filter(|kw| normalized.contains(*kw))
                .map(|kw| kw.to_string())
                .collect(),
        })
        .collect();

    let hits = details.iter().filter(|d| d.is_hit()).count();
    let score = if buckets.is_empty() {
        0.0
    } else {
        round_to(hits as f64 / buckets.len() as f64, 2)
    };

    KeywordCoverage { score, details }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::normalize;
    use crate::scoring::tables::KEYWORD_BUCKETS;

    #[test]
    fn test_no_hits_scores_zero() {
        let coverage = score_keywords("", KEYWORD_BUCKETS);
        assert_eq!(coverage.score, 0.0);
        assert_eq!(coverage.details.len(), 6);
        assert_eq!(coverage.missing_buckets().len(), 6);
    }

    #[test]
    fn test_substring_match_counts() {
        let coverage = score_keywords("i can decode anything", KEYWORD_BUCKETS);
        let coding = coverage
            .details
            .iter()
            .find(|d| d.bucket == "Coding")
            .unwrap();
        assert_eq!(coding.matched, vec!["code"]);
        assert_eq!(coverage.score, 0.17);
    }

    #[test]
    fn test_details_keep_table_order() {
        let text = normalize("Scalable systems at production scale");
        let coverage = score_keywords(&text, KEYWORD_BUCKETS);
        let impact = &coverage.details[2];
        assert_eq!(impact.bucket, "Impact/Outcome");
        assert_eq!(impact.matched, vec!["production", "scale", "scalable"]);
    }

    #[test]
    fn test_denominator_is_live_table_size() {
        const TWO: KeywordBuckets = &[("A", &["alpha"]), ("B", &["beta"])];
        assert_eq!(score_keywords("alpha", TWO).score, 0.5);
    }

    #[test]
    fn test_adding_a_hit_never_decreases_score() {
        let base = normalize("I built a project in Python");
        let before = score_keywords(&base, KEYWORD_BUCKETS).score;
        let after = score_keywords(&format!("{base} during my internship"), KEYWORD_BUCKETS).score;
        assert!(after >= before);
        assert_eq!(before, 0.33);
        assert_eq!(after, 0.5);
    }
}
