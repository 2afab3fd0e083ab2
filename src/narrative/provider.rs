//! OpenAI-compatible narrative collaborator.
//!
//! Works with the OpenAI API and any chat-completions-compatible endpoint
//! (a local model behind the same route included). The provider is handed in
//! explicitly by the caller; there is no ambient configuration.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Failure kinds of the narrative path. Every one of them routes the caller
/// to the deterministic fallback; none propagate out of report generation.
#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("collaborator returned an empty reply")]
    EmptyReply,

    #[error("collaborator reply was not the expected JSON shape: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

/// A free-form text completion service. The single seam the generators need;
/// tests substitute canned or failing implementations.
pub trait NarrativeProvider {
    fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, NarrativeError>;
}

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "failed to build HTTP client with custom timeout, using default client");
                Client::new()
            });
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl NarrativeProvider for OpenAiProvider {
    fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, NarrativeError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.6,
            max_tokens,
        };

        let response: ChatResponse = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(NarrativeError::EmptyReply)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_tolerates_trailing_slash() {
        let provider = OpenAiProvider::new("sk-test").with_base_url("http://localhost:8080/v1/");
        assert_eq!(provider.chat_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn chat_response_with_missing_content_is_tolerated() {
        let raw = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).expect("response should parse");
        assert!(response.choices[0].message.content.is_none());
    }
}
