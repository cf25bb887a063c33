//! Relay configuration.

use crate::error::{Error, Result};

/// Default Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Settings for the relay and its upstream client.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Gemini API key
    pub api_key: String,

    /// Model name, e.g. "gemini-2.5-flash"
    pub model: String,

    /// Base URL of the Gemini REST API
    pub base_url: String,

    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Escape HTML in formatted replies unless a request says otherwise
    pub escape_html: bool,
}

impl RelayConfig {
    /// Create a config with defaults and the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the upstream base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable HTML escaping of formatted replies.
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    /// Check that the config can be used to reach the upstream.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        if self.model.trim().is_empty() {
            return Err(Error::InvalidConfig("model must not be empty".to_string()));
        }
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Full `generateContent` URL for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim().trim_end_matches('/'),
            self.model.trim()
        )
    }

    /// Address to bind, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            escape_html: false,
        }
    }
}
