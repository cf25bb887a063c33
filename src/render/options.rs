//! Formatting options and configuration.

/// Indentation inserted after the line break that replaces a bullet marker.
pub const DEFAULT_INDENT_UNIT: &str = "&emsp;";

/// Line-break marker.
pub const DEFAULT_LINE_BREAK: &str = "<br/>";

/// Label of the copy affordance in code block headers.
pub const DEFAULT_COPY_LABEL: &str = "Copy";

/// Options for formatting a reply into HTML.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Whether reply content is escaped before embedding
    pub escape: EscapePolicy,

    /// Markup inserted for one level of list indentation
    pub indent_unit: String,

    /// Markup inserted for a line break
    pub line_break: String,

    /// Text of the copy button in code block headers
    pub copy_label: String,

    /// Include the clipboard icon in the copy button
    pub copy_icon: bool,
}

impl FormatOptions {
    /// Create new format options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the escape policy.
    pub fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    /// Escape HTML-significant characters in reply content.
    pub fn escaped(mut self) -> Self {
        self.escape = EscapePolicy::Escape;
        self
    }

    /// Set the indentation markup used for bullets.
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Set the line-break markup.
    pub fn with_line_break(mut self, marker: impl Into<String>) -> Self {
        self.line_break = marker.into();
        self
    }

    /// Set the copy button label.
    pub fn with_copy_label(mut self, label: impl Into<String>) -> Self {
        self.copy_label = label.into();
        self
    }

    /// Enable or disable the clipboard icon.
    pub fn with_copy_icon(mut self, include: bool) -> Self {
        self.copy_icon = include;
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            escape: EscapePolicy::Trusted,
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            line_break: DEFAULT_LINE_BREAK.to_string(),
            copy_label: DEFAULT_COPY_LABEL.to_string(),
            copy_icon: true,
        }
    }
}

/// How reply content is treated before it is embedded in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// Trust the upstream: `<`, `&` and friends pass through unchanged
    #[default]
    Trusted,
    /// HTML-escape text and code content before embedding
    Escape,
}

impl EscapePolicy {
    /// Check if content is escaped.
    pub fn escapes(&self) -> bool {
        matches!(self, EscapePolicy::Escape)
    }
}
