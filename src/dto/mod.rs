use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    /// Caller's Gemini API key, forwarded upstream and never stored
    #[serde(default)]
    pub api_key: Option<String>,
    /// Body of the email to reply to
    #[serde(default)]
    pub email_content: Option<String>,
    /// Desired tone of the reply, e.g. "formal"
    #[serde(default)]
    pub tone: Option<String>,
}

/// Returns the value when it is present and not whitespace only.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let req: EmailRequest = serde_json::from_str(
            r#"{"apiKey":"AIza123","emailContent":"Hi there","tone":"friendly"}"#,
        )
        .unwrap();
        assert_eq!(req.api_key.as_deref(), Some("AIza123"));
        assert_eq!(req.email_content.as_deref(), Some("Hi there"));
        assert_eq!(req.tone.as_deref(), Some("friendly"));
    }

    #[test]
    fn absent_fields_are_none() {
        let req: EmailRequest = serde_json::from_str("{}").unwrap();
        assert!(req.api_key.is_none());
        assert!(req.email_content.is_none());
        assert!(req.tone.is_none());
    }

    #[test]
    fn blank_values_are_treated_as_absent() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some(" \t\n")), None);
        assert_eq!(non_blank(Some(" key ")), Some(" key "));
    }
}
