use serde::{Deserialize, Serialize};

use crate::scoring::tables::{ABS_MAX_SECS, ABS_MIN_SECS, MAX_IDEAL_SECS, MIN_IDEAL_SECS};

/// Length category of a recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationBucket {
    Missing,
    #[serde(rename = "Too Short")]
    TooShort,
    #[serde(rename = "Slightly Short")]
    SlightlyShort,
    Ideal,
    #[serde(rename = "Slightly Long")]
    SlightlyLong,
    #[serde(rename = "Too Long")]
    TooLong,
}

impl DurationBucket {
    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::Missing => "Missing",
            DurationBucket::TooShort => "Too Short",
            DurationBucket::SlightlyShort => "Slightly Short",
            DurationBucket::Ideal => "Ideal",
            DurationBucket::SlightlyLong => "Slightly Long",
            DurationBucket::TooLong => "Too Long",
        }
    }

    pub fn is_short(&self) -> bool {
        matches!(self, DurationBucket::TooShort | DurationBucket::SlightlyShort)
    }

    pub fn is_long(&self) -> bool {
        matches!(self, DurationBucket::TooLong | DurationBucket::SlightlyLong)
    }

    /// Outside the acceptable recording window entirely.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, DurationBucket::TooShort | DurationBucket::TooLong)
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a recording length to its bucket and length score.
///
/// `None` and `0` both mean no recording was made. Checks run in a fixed
/// order so every input lands in exactly one bucket.
pub fn bucket_duration(secs: Option<f64>) -> (DurationBucket, f64) {
    let secs = match secs {
        Some(s) if s != 0.0 => s,
        _ => return (DurationBucket::Missing, 0.0),
    };

    if secs < ABS_MIN_SECS {
        return (DurationBucket::TooShort, 0.2);
    }
    if secs > ABS_MAX_SECS {
        return (DurationBucket::TooLong, 0.2);
    }
    if (MIN_IDEAL_SECS..=MAX_IDEAL_SECS).contains(&secs) {
        return (DurationBucket::Ideal, 1.0);
    }
    if secs < MIN_IDEAL_SECS {
        let gap = MIN_IDEAL_SECS - secs;
        return (DurationBucket::SlightlyShort, (1.0 - gap / 30.0).max(0.4));
    }
    let gap = secs - MAX_IDEAL_SECS;
    (DurationBucket::SlightlyLong, (1.0 - gap / 45.0).max(0.4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_duration() {
        assert_eq!(bucket_duration(None), (DurationBucket::Missing, 0.0));
        assert_eq!(bucket_duration(Some(0.0)), (DurationBucket::Missing, 0.0));
    }

    #[test]
    fn test_ideal_bounds_inclusive() {
        assert_eq!(bucket_duration(Some(45.0)), (DurationBucket::Ideal, 1.0));
        assert_eq!(bucket_duration(Some(75.0)), (DurationBucket::Ideal, 1.0));
        assert_eq!(bucket_duration(Some(60.0)).0, DurationBucket::Ideal);
    }

    #[test]
    fn test_out_of_range_scores_0_2() {
        assert_eq!(bucket_duration(Some(29.0)), (DurationBucket::TooShort, 0.2));
        assert_eq!(bucket_duration(Some(181.0)), (DurationBucket::TooLong, 0.2));
    }

    #[test]
    fn test_slightly_short_linear_penalty() {
        let (bucket, score) = bucket_duration(Some(40.0));
        assert_eq!(bucket, DurationBucket::SlightlyShort);
        assert!((score - (1.0 - 5.0 / 30.0)).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_slightly_short_floor() {
        // 30s: 1 - 15/30 = 0.5, still above the floor
        let (bucket, score) = bucket_duration(Some(30.0));
        assert_eq!(bucket, DurationBucket::SlightlyShort);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_slightly_long_penalty_and_floor() {
        let (bucket, score) = bucket_duration(Some(90.0));
        assert_eq!(bucket, DurationBucket::SlightlyLong);
        assert!((score - (1.0 - 15.0 / 45.0)).abs() < 1e-9);

        let (bucket, score) = bucket_duration(Some(180.0));
        assert_eq!(bucket, DurationBucket::SlightlyLong);
        assert_eq!(score, 0.4);
    }

    #[test]
    fn test_every_duration_maps_to_one_bucket() {
        let mut secs = 0.25;
        while secs < 400.0 {
            let (bucket, score) = bucket_duration(Some(secs));
            assert!((0.0..=1.0).contains(&score));
            let expected = if secs < 30.0 {
                DurationBucket::TooShort
            } else if secs < 45.0 {
                DurationBucket::SlightlyShort
            } else if secs <= 75.0 {
                DurationBucket::Ideal
            } else if secs <= 180.0 {
                DurationBucket::SlightlyLong
            } else {
                DurationBucket::TooLong
            };
            assert_eq!(bucket, expected, "secs={secs}");
            secs += 0.25;
        }
    }

    #[test]
    fn test_bucket_serializes_as_label() {
        let json = serde_json::to_string(&DurationBucket::SlightlyShort).unwrap();
        assert_eq!(json, r#""Slightly Short""#);
        assert_eq!(DurationBucket::TooLong.to_string(), "Too Long");
    }
}
