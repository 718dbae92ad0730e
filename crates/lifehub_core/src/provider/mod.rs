//! External text-generation providers for grocery suggestions.
//!
//! # Responsibility
//! - Define the provider contract used by the grocery service.
//! - Separate transport failures (`ProviderError`) from unusable replies,
//!   which are reported by `scoring::grocery::parse_suggestion_response`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod openai;

pub use openai::OpenAiSuggestionProvider;

/// Provider call failures. Callers degrade to the heuristic on any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The call exceeded the configured timeout.
    Timeout,
    /// Connection or request failure before a status was received.
    Http(String),
    /// Non-success HTTP status.
    Status { code: u16, body: String },
    /// Response body was not the expected shape.
    Decode(String),
}

impl ProviderError {
    /// Short stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout => "provider_timeout",
            Self::Http(_) => "provider_http",
            Self::Status { .. } => "provider_status",
            Self::Decode(_) => "provider_decode",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "provider request timed out"),
            Self::Http(message) => write!(f, "provider request failed: {message}"),
            Self::Status { code, body } => write!(f, "provider returned status {code}: {body}"),
            Self::Decode(message) => write!(f, "provider response could not be decoded: {message}"),
        }
    }
}

impl Error for ProviderError {}

/// Text-generation collaborator: prompt in, free text out.
pub trait SuggestionProvider: Send + Sync {
    /// Stable identifier used in logs.
    fn provider_id(&self) -> &str;
    fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
