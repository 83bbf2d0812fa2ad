use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{PreferredType, RevealType};

/// Inquiry form submitted from a city page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InquirySubmission {
    #[serde(default, alias = "coupleName")]
    pub name: Option<String>,
    #[validate(email)]
    #[serde(alias = "coupleEmail")]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub message: String,
    #[serde(default, alias = "preferredType")]
    pub preferred_type: PreferredType,
    /// State slug, e.g. `new-york`
    #[validate(custom(function = "not_blank"))]
    pub state: String,
    /// City slug or display name
    #[validate(custom(function = "not_blank"))]
    pub city: String,
    #[serde(default = "default_source")]
    pub source: String,
}

impl InquirySubmission {
    /// Name with blank input treated as absent
    pub fn couple_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

fn default_source() -> String {
    "city_page".to_string()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Contact reveal analytics event from a listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRevealRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "profileId")]
    pub profile_id: String,
    #[serde(alias = "revealType")]
    pub reveal_type: RevealType,
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "stateProvince")]
    pub state_province: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_defaults() {
        let submission: InquirySubmission = serde_json::from_value(serde_json::json!({
            "email": "couple@example.com",
            "message": "We are getting married in June",
            "state": "texas",
            "city": "austin",
        }))
        .unwrap();

        assert_eq!(submission.preferred_type, PreferredType::Either);
        assert_eq!(submission.source, "city_page");
        assert!(submission.couple_name().is_none());
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_submission_rejects_bad_email() {
        let submission: InquirySubmission = serde_json::from_value(serde_json::json!({
            "email": "not-an-email",
            "message": "hello",
            "preferredType": "clergy",
            "state": "texas",
            "city": "austin",
        }))
        .unwrap();

        assert_eq!(submission.preferred_type, PreferredType::Clergy);
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_submission_rejects_empty_message() {
        let submission: InquirySubmission = serde_json::from_value(serde_json::json!({
            "name": "  ",
            "email": "couple@example.com",
            "message": "",
            "state": "texas",
            "city": "austin",
        }))
        .unwrap();

        assert!(submission.couple_name().is_none());
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_submission_rejects_whitespace_fields() {
        let mut submission: InquirySubmission = serde_json::from_value(serde_json::json!({
            "email": "couple@example.com",
            "message": "   \n\t",
            "state": "texas",
            "city": "austin",
        }))
        .unwrap();

        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("message"));

        submission.message = "Hello".to_string();
        submission.city = "  ".to_string();
        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("city"));
    }
}
