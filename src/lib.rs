//! # chatfmt
//!
//! Turns raw generative-model replies into pre-rendered HTML.
//!
//! Replies mix prose, `**bold**` markers, `*` bullet lines and fenced code
//! blocks. The formatter splits a reply on the fences, rewrites each prose
//! segment, wraps each code segment in a labelled block with a copy button,
//! and joins the pieces back in order.
//!
//! ## Quick Start
//!
//! ```
//! let html = chatfmt::format("Use **cargo**:\n* build\n* test");
//! assert_eq!(
//!     html.as_trusted_html(),
//!     "Use <strong>cargo</strong>:<br/>&emsp;build<br/>&emsp;test"
//! );
//! ```
//!
//! ## Trust boundary
//!
//! By default reply content is embedded as-is, so `<` and `&` coming from the
//! model reach the page unescaped. Use [`format_escaped`] or
//! [`EscapePolicy::Escape`] when the upstream is not trusted. Output is
//! always a [`Markup`], never a bare `String`, so the host has to choose its
//! render path explicitly.
//!
//! Formatting is not idempotent: feeding output back in treats the generated
//! markup as prose.
//!
//! ## Features
//!
//! - **Total**: every input, including unmatched fences, produces markup
//! - **Language tags**: a bare word on the first fenced line labels the block
//! - **History**: [`ChatHistory`] keeps past prompts with stable ids
//! - **Relay contract**: wire types for the prompt relay and Gemini upstream

pub mod error;
pub mod model;
pub mod parser;
pub mod relay;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{ChatHistory, CodeBlock, EntryId, HistoryEntry, Markup, RawSegment};
pub use parser::split_segments;
pub use relay::{AskRequest, AskResponse, RelayConfig};
pub use render::{EscapePolicy, FormatOptions, FormatResult, FormatStats, JsonFormat};

/// Format a reply with default options.
///
/// Empty and whitespace-only input produce empty markup.
///
/// # Example
///
/// ```
/// let html = chatfmt::format("a\nb");
/// assert_eq!(html.as_trusted_html(), "a<br/>b");
/// ```
pub fn format(raw: &str) -> Markup {
    render::to_html(raw, &FormatOptions::default())
}

/// Format a reply that may be absent.
///
/// # Example
///
/// ```
/// assert!(chatfmt::format_opt(None).is_empty());
/// ```
pub fn format_opt(raw: Option<&str>) -> Markup {
    raw.map(format).unwrap_or_default()
}

/// Format a reply, HTML-escaping its content first.
///
/// # Example
///
/// ```
/// let html = chatfmt::format_escaped("1 < 2");
/// assert_eq!(html.as_trusted_html(), "1 &lt; 2");
/// ```
pub fn format_escaped(raw: &str) -> Markup {
    render::to_html(raw, &FormatOptions::new().escaped())
}

/// Format a reply with custom options.
pub fn format_with_options(raw: &str, options: &FormatOptions) -> Markup {
    render::to_html(raw, options)
}

/// Split a reply and dump its segments as JSON.
///
/// # Example
///
/// ```
/// use chatfmt::{to_segments_json, JsonFormat};
///
/// let json = to_segments_json("x```sh\nls```", JsonFormat::Compact).unwrap();
/// assert!(json.contains(r#""language":"sh""#));
/// ```
pub fn to_segments_json(raw: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&split_segments(raw), format)
}

/// Builder for formatting replies.
///
/// # Example
///
/// ```
/// use chatfmt::Formatter;
///
/// let html = Formatter::new()
///     .escaped()
///     .with_copy_label("Copy code")
///     .without_copy_icon()
///     .format("```sh\necho <hi>\n```");
/// assert!(html.as_trusted_html().contains("echo &lt;hi&gt;"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    /// Create a new formatter builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape reply content before embedding.
    pub fn escaped(mut self) -> Self {
        self.options = self.options.escaped();
        self
    }

    /// Set the copy button label.
    pub fn with_copy_label(mut self, label: impl Into<String>) -> Self {
        self.options = self.options.with_copy_label(label);
        self
    }

    /// Drop the clipboard icon from code block headers.
    pub fn without_copy_icon(mut self) -> Self {
        self.options = self.options.with_copy_icon(false);
        self
    }

    /// Set the indentation markup used for bullets.
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.options = self.options.with_indent_unit(unit);
        self
    }

    /// Get the options this builder has accumulated.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format a reply.
    pub fn format(&self, raw: &str) -> Markup {
        render::to_html(raw, &self.options)
    }

    /// Format a reply and collect statistics.
    pub fn format_with_stats(&self, raw: &str) -> FormatResult {
        render::to_html_with_stats(raw, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty() {
        assert_eq!(format("").as_trusted_html(), "");
        assert_eq!(format_opt(None).as_trusted_html(), "");
        assert_eq!(format_opt(Some("")).as_trusted_html(), "");
    }

    #[test]
    fn test_format_opt_some() {
        assert_eq!(format_opt(Some("**b**")).as_trusted_html(), "<strong>b</strong>");
    }

    #[test]
    fn test_format_plain_identity() {
        for text in ["hello", "a * b", "x < y", "tabs\tand spaces", "*", "**"] {
            assert_eq!(format(text).as_trusted_html(), text);
        }
    }

    #[test]
    fn test_format_not_idempotent() {
        // Code bodies keep their markers verbatim; a second pass sees them as prose.
        let once = format("```\n**x**\n```");
        assert!(once.as_trusted_html().contains("**x**"));

        let twice = format(once.as_trusted_html());
        assert_ne!(twice, once);
        assert!(twice.as_trusted_html().contains("<strong>x</strong>"));
    }

    #[test]
    fn test_formatter_builder_defaults() {
        let formatter = Formatter::default();
        assert_eq!(formatter.options().escape, EscapePolicy::Trusted);
        assert!(formatter.options().copy_icon);
    }

    #[test]
    fn test_formatter_builder_chained() {
        let formatter = Formatter::new()
            .escaped()
            .with_copy_label("Copiar")
            .without_copy_icon()
            .with_indent_unit("--");

        assert!(formatter.options().escape.escapes());
        assert_eq!(formatter.options().copy_label, "Copiar");
        assert!(!formatter.options().copy_icon);

        let html = formatter.format("x\n* y");
        assert_eq!(html.as_trusted_html(), "x<br/>--y");
    }

    #[test]
    fn test_formatter_stats() {
        let result = Formatter::new().format_with_stats("a```b```c");
        assert_eq!(result.stats.text_segments, 2);
        assert_eq!(result.stats.code_segments, 1);
    }

    #[test]
    fn test_segments_json() {
        let json = to_segments_json("", JsonFormat::Compact).unwrap();
        assert_eq!(json, "[]");
    }
}
