pub mod gemini;

use crate::{config::GeminiConfig, dto::EmailRequest};

use gemini::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use reqwest::StatusCode;

const INSTRUCTION: &str = "Generate an email reply with the same email content language for the following email content, \
without a subject line or anything besides email content, just email body nothing else.";

pub struct EmailGeneratorService {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("API_KEY_INVALID: Invalid or missing API key")]
    Unauthorized,

    #[error("Bad request to Gemini API: {0}")]
    BadRequest(String),

    #[error("Gemini API Error [{status}]: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Gemini API Error: {0}")]
    Upstream(String),

    #[error("No text content in response")]
    NoTextContent,

    #[error("Error parsing Gemini response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Holds a reqwest error with its URL stripped, since the URL carries the key.
    #[error("Error calling Gemini API: {0}")]
    Transport(reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

/// Builds the instruction sent upstream. The tone line is left out when no tone is given.
pub fn build_prompt(content: &str, tone: Option<&str>) -> String {
    let mut prompt = String::from(INSTRUCTION);
    if let Some(tone) = tone.filter(|t| !t.is_empty()) {
        prompt.push_str("\nTone: ");
        prompt.push_str(tone);
    }
    prompt.push_str("\n\nOriginal email content: ");
    prompt.push_str(content);
    prompt
}

fn mask_key(key: &str) -> String {
    format!("{}***", key.chars().take(4).collect::<String>())
}

impl EmailGeneratorService {
    pub fn new(config: GeminiConfig) -> Result<Self, GeneratorError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GeneratorError::Client)?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn generate(&self, request: &EmailRequest) -> Result<String, GeneratorError> {
        let api_key = request.api_key.as_deref().unwrap_or_default();
        let content = request.email_content.as_deref().unwrap_or_default();
        let prompt = build_prompt(content, request.tone.as_deref());

        tracing::info!("Calling Gemini API at {}", self.endpoint);
        tracing::debug!("Using API key {}", mask_key(api_key));

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::Transport(e.without_url()))?;
        tracing::info!("Received response from Gemini API with status {}", status);

        if !status.is_success() {
            tracing::error!("Gemini API returned {}: {}", status, body);
            return Err(classify_status(status, body));
        }

        extract_reply(&body)
    }
}

/// Maps a non-2xx reply to an error using the status code and the structured error codes.
fn classify_status(status: StatusCode, body: String) -> GeneratorError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return GeneratorError::Unauthorized;
    }

    let envelope = serde_json::from_str::<ErrorEnvelope>(&body).ok();
    if envelope.as_ref().is_some_and(|e| e.error.is_unauthorized()) {
        return GeneratorError::Unauthorized;
    }

    if status == StatusCode::BAD_REQUEST {
        return GeneratorError::BadRequest(body);
    }

    let message = envelope
        .and_then(|e| e.error.message)
        .or_else(|| status.canonical_reason().map(ToString::to_string))
        .unwrap_or_default();
    GeneratorError::Status { status, message }
}

fn extract_reply(body: &str) -> Result<String, GeneratorError> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Error parsing response: {e}, response was: {body}");
        e
    })?;

    if let Some(error) = response.error {
        if error.is_unauthorized() {
            return Err(GeneratorError::Unauthorized);
        }
        return Err(GeneratorError::Upstream(error.message.unwrap_or_default()));
    }

    response
        .first_text()
        .map(ToString::to_string)
        .ok_or(GeneratorError::NoTextContent)
}

impl GeneratorError {
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
