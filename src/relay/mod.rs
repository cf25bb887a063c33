//! Relay contract: the client-facing wire types, the upstream Gemini
//! payloads and the relay configuration.
//!
//! The transport itself (HTTP server and client) lives in the CLI crate; this
//! module only fixes the shapes both sides agree on.

mod config;
mod gemini;
mod wire;

pub use config::{RelayConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PORT};
pub use gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    SafetySetting,
};
pub use wire::{AskRequest, AskResponse, ErrorBody, FormatRequest, FormatResponse};

/// Route the chat client posts prompts to.
pub const ASK_ROUTE: &str = "/ask-gemini";

/// Route that formats caller-supplied text.
pub const FORMAT_ROUTE: &str = "/format";

/// Liveness route.
pub const HEALTH_ROUTE: &str = "/health";
