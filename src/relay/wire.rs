//! Request and response bodies exchanged between the chat client and the relay.

use crate::model::Markup;
use serde::{Deserialize, Serialize};

/// Body of `POST /ask-gemini`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// Prompt to forward upstream
    pub prompt: String,

    /// Also return the reply formatted as HTML
    #[serde(default)]
    pub format: bool,
}

impl AskRequest {
    /// Create a request for a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            format: false,
        }
    }

    /// Ask the relay to format the reply.
    pub fn formatted(mut self) -> Self {
        self.format = true;
        self
    }
}

/// Successful answer to `POST /ask-gemini`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    /// Raw reply text
    pub text: String,

    /// Reply formatted as HTML, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<Markup>,
}

/// Body of `POST /format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRequest {
    /// Raw reply text
    pub text: String,

    /// Escape HTML-significant characters (defaults to the relay setting)
    #[serde(default)]
    pub escape: Option<bool>,
}

/// Answer to `POST /format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatResponse {
    /// Formatted markup
    pub html: Markup,
}

/// Error body returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
}

impl ErrorBody {
    /// Create an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
