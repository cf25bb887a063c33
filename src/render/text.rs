//! Text segment rules: bold spans, bullet markers and line breaks.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use super::{FormatOptions, FormatStats};

// Bold spans never cross a line terminator (`\n`, `\r`, U+2028, U+2029).
static BOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").unwrap());
static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\*\s*").unwrap());

/// Rewrites prose segments into inline HTML.
///
/// Rules run in a fixed order because later rules consume characters the
/// earlier ones leave behind:
///
/// 1. `**X**` becomes `<strong>X</strong>` (shortest match, single line)
/// 2. a newline followed by an optional-whitespace `*` bullet becomes a line
///    break plus one indentation unit
/// 3. every remaining newline becomes a line break
pub struct TextPipeline {
    options: FormatOptions,
}

impl TextPipeline {
    /// Create a pipeline with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Process one text segment.
    pub fn process(&self, text: &str) -> String {
        self.process_counting(text, None)
    }

    /// Process one text segment, adding rule hits to `stats`.
    pub fn process_with_stats(&self, text: &str, stats: &mut FormatStats) -> String {
        self.process_counting(text, Some(stats))
    }

    fn process_counting(&self, text: &str, mut stats: Option<&mut FormatStats>) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut result = if self.options.escape.escapes() {
            html_escape::encode_text(text).into_owned()
        } else {
            text.to_string()
        };

        if let Some(stats) = stats.as_deref_mut() {
            stats.bold_count += BOLD_REGEX.find_iter(&result).count() as u32;
        }
        result = self.apply_bold(&result);

        if let Some(stats) = stats.as_deref_mut() {
            stats.bullet_count += BULLET_REGEX.find_iter(&result).count() as u32;
        }
        result = self.apply_bullets(&result);

        if let Some(stats) = stats.as_deref_mut() {
            stats.line_break_count += result.matches('\n').count() as u32;
        }
        self.apply_line_breaks(&result)
    }

    fn apply_bold(&self, text: &str) -> String {
        BOLD_REGEX
            .replace_all(text, "<strong>${1}</strong>")
            .into_owned()
    }

    fn apply_bullets(&self, text: &str) -> String {
        let replacement = format!("{}{}", self.options.line_break, self.options.indent_unit);
        BULLET_REGEX
            .replace_all(text, NoExpand(&replacement))
            .into_owned()
    }

    fn apply_line_breaks(&self, text: &str) -> String {
        text.replace('\n', &self.options.line_break)
    }
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}
