//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Response fields are optional at every level: a reply missing part of the
//! candidate path is a "no text" outcome, not a deserialization failure.

use serde::{Deserialize, Serialize};

/// Error codes Gemini uses when the key itself is rejected.
pub const UNAUTHORIZED_CODES: [&str; 2] = ["API_KEY_INVALID", "PERMISSION_DENIED"];

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one text part.
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    pub message: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub reason: Option<String>,
}

/// Envelope of a non-2xx reply.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it is non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

impl ApiError {
    /// True when the status or any detail reason names a rejected key.
    pub fn is_unauthorized(&self) -> bool {
        std::iter::once(self.status.as_deref())
            .chain(self.details.iter().map(|d| d.reason.as_deref()))
            .flatten()
            .any(|code| UNAUTHORIZED_CODES.contains(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_envelope_nesting() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hi".into())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn first_text_of_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"Hello"},{"text":"ignored"}],"role":"model"},"finishReason":"STOP"},
                {"content":{"parts":[{"text":"second"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text(), Some("Hello"));
    }

    #[test]
    fn missing_or_empty_paths_have_no_text() {
        for raw in [
            "{}",
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{}}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        ] {
            let resp: GenerateContentResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(resp.first_text(), None, "{raw}");
        }
    }

    #[test]
    fn invalid_key_reason_in_details() {
        let env: ErrorEnvelope = serde_json::from_str(
            r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.",
                "status":"INVALID_ARGUMENT",
                "details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_INVALID","domain":"googleapis.com"}]}}"#,
        )
        .unwrap();
        assert!(env.error.is_unauthorized());
    }

    #[test]
    fn permission_denied_status() {
        let env: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#).unwrap();
        assert!(env.error.is_unauthorized());
    }

    #[test]
    fn other_error_codes_are_not_unauthorized() {
        let env: ErrorEnvelope = serde_json::from_str(
            r#"{"error":{"code":400,"message":"Invalid JSON payload","status":"INVALID_ARGUMENT"}}"#,
        )
        .unwrap();
        assert!(!env.error.is_unauthorized());
    }
}
