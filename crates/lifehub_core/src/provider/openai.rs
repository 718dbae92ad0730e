//! Chat-completions provider over HTTP.
//!
//! Uses a blocking `reqwest` client bounded by the configured timeout, so a
//! slow provider turns into `ProviderError::Timeout` instead of a hung call.

use crate::config::ProviderConfig;
use crate::provider::{ProviderError, SuggestionProvider};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const PROVIDER_ID: &str = "openai";
const MAX_TOKENS: u32 = 120;
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Suggestion provider backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiSuggestionProvider {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiSuggestionProvider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ProviderError::Http(err.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
        })
    }
}

impl SuggestionProvider for OpenAiSuggestionProvider {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.model.as_str(),
            messages: vec![ChatMessage {
                role: "system",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ProviderError::Status {
                code: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: ChatCompletionResponse = response.json().map_err(|err| {
            if err.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Decode(err.to_string())
            }
        })?;

        Ok(extract_text(parsed))
    }
}

fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Http(err.to_string())
    }
}

/// First choice's message text, or empty when the provider sent none.
fn extract_text(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
