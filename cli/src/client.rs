//! Upstream client for the Gemini `generateContent` API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chatfmt::relay::{GenerateContentRequest, GenerateContentResponse, RelayConfig};
use chatfmt::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Boxed future returned by [`ReplySource::generate`].
pub type ReplyFuture<'a> = Pin<Box<dyn Future<Output = chatfmt::Result<String>> + Send + 'a>>;

/// Anything that can turn a prompt into raw reply text.
pub trait ReplySource: Send + Sync {
    /// Generate a reply for one prompt.
    fn generate<'a>(&'a self, prompt: &'a str) -> ReplyFuture<'a>;
}

/// Gemini REST client.
pub struct GeminiClient {
    config: RelayConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Create a client; fails if the config cannot reach the upstream.
    pub fn new(config: RelayConfig) -> chatfmt::Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    /// Send one prompt and return the reply text.
    pub async fn generate_text(&self, prompt: &str) -> chatfmt::Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let url = self.config.generate_url();
        log::debug!("POST {} ({} prompt bytes)", url, prompt.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Invalid response body: {}", e)))?;

        body.reply_text()
            .map(str::to_string)
            .ok_or(Error::EmptyReply)
    }
}

impl ReplySource for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> ReplyFuture<'a> {
        Box::pin(self.generate_text(prompt))
    }
}

fn classify_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Transport(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        Error::Transport(format!("Connection failed: {}", e))
    } else {
        Error::Transport(format!("Network error: {}", e))
    }
}
