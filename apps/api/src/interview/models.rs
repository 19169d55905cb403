use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Technical,
    Hr,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Technical => "technical",
            InterviewType::Hr => "hr",
        }
    }
}

/// HR interview flavor. Selects the static question bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HrType {
    #[default]
    General,
    Freshers,
    Behavioral,
}

pub const DEFAULT_DOMAIN: &str = "web-development";
pub const MIN_SESSION_MINUTES: u32 = 1;
pub const MAX_SESSION_MINUTES: u32 = 15;
const DEFAULT_SESSION_MINUTES: u32 = 10;

fn default_session_minutes() -> u32 {
    DEFAULT_SESSION_MINUTES
}

/// Choices made before an interview starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSetup {
    pub interview_type: InterviewType,
    #[serde(default)]
    pub hr_type: Option<HrType>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Length of the client-side interview timer. Stored on the session and
    /// echoed back in its `setup`; the server does not enforce it.
    #[serde(default = "default_session_minutes")]
    pub duration_minutes: u32,
}

impl InterviewSetup {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&self.duration_minutes) {
            return Err(AppError::Validation(format!(
                "duration_minutes must be between {MIN_SESSION_MINUTES} and {MAX_SESSION_MINUTES}"
            )));
        }
        if let Some(domain) = &self.domain {
            if domain.trim().is_empty() {
                return Err(AppError::Validation("domain cannot be blank".to_string()));
            }
        }
        Ok(())
    }

    pub fn domain_or_default(&self) -> &str {
        self.domain.as_deref().unwrap_or(DEFAULT_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(minutes: u32) -> InterviewSetup {
        InterviewSetup {
            interview_type: InterviewType::Technical,
            hr_type: None,
            domain: None,
            duration_minutes: minutes,
        }
    }

    #[test]
    fn test_interview_type_serde() {
        let t: InterviewType = serde_json::from_str(r#""hr""#).unwrap();
        assert_eq!(t, InterviewType::Hr);
        assert_eq!(
            serde_json::to_string(&InterviewType::Technical).unwrap(),
            r#""technical""#
        );
    }

    #[test]
    fn test_hr_type_serde() {
        let t: HrType = serde_json::from_str(r#""behavioral""#).unwrap();
        assert_eq!(t, HrType::Behavioral);
        assert_eq!(HrType::default(), HrType::General);
    }

    #[test]
    fn test_setup_defaults() {
        let s: InterviewSetup = serde_json::from_str(r#"{"interview_type":"technical"}"#).unwrap();
        assert_eq!(s.duration_minutes, 10);
        assert_eq!(s.hr_type, None);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_duration_bounds() {
        assert!(setup(1).validate().is_ok());
        assert!(setup(15).validate().is_ok());
        assert!(setup(0).validate().is_err());
        assert!(setup(16).validate().is_err());
    }

    #[test]
    fn test_blank_domain_rejected() {
        let mut s = setup(5);
        s.domain = Some("  ".to_string());
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_default_domain() {
        assert_eq!(setup(5).domain_or_default(), "web-development");
    }
}
