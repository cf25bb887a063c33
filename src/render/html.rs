//! HTML rendering for model replies.

use crate::model::{Markup, RawSegment};
use crate::parser::split_segments;

use super::code::render_code_block;
use super::{FormatOptions, FormatResult, FormatStats, TextPipeline};

/// Convert a raw reply to HTML.
pub fn to_html(raw: &str, options: &FormatOptions) -> Markup {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(raw)
}

/// Convert a raw reply to HTML with statistics.
pub fn to_html_with_stats(raw: &str, options: &FormatOptions) -> FormatResult {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_with_stats(raw)
}

/// HTML renderer.
///
/// Rendering is a pipeline of independent steps: split the reply on fences,
/// classify each piece, transform it, and join the results in order.
pub struct HtmlRenderer {
    options: FormatOptions,
    text: TextPipeline,
    stats: Option<FormatStats>,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: FormatOptions) -> Self {
        Self {
            text: TextPipeline::new(options.clone()),
            options,
            stats: None,
        }
    }

    /// Render a reply to HTML.
    pub fn render(mut self, raw: &str) -> Markup {
        Markup::trusted(self.render_internal(raw))
    }

    /// Render a reply to HTML with formatting statistics.
    pub fn render_with_stats(mut self, raw: &str) -> FormatResult {
        self.stats = Some(FormatStats::new());
        let html = self.render_internal(raw);
        FormatResult::new(Markup::trusted(html), self.stats.unwrap_or_default())
    }

    /// Render already-split segments.
    pub fn render_segments(mut self, segments: &[RawSegment]) -> Markup {
        let mut output = String::new();
        for segment in segments {
            self.render_segment(&mut output, segment);
        }
        Markup::trusted(output)
    }

    fn render_internal(&mut self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let mut output = String::with_capacity(raw.len() + raw.len() / 4);
        for segment in split_segments(raw) {
            self.render_segment(&mut output, &segment);
        }
        output
    }

    fn render_segment(&mut self, output: &mut String, segment: &RawSegment) {
        match segment {
            RawSegment::Text { content } => match self.stats.as_mut() {
                Some(stats) => {
                    stats.text_segments += 1;
                    output.push_str(&self.text.process_with_stats(content, stats));
                }
                None => output.push_str(&self.text.process(content)),
            },
            RawSegment::Code(block) => {
                if let Some(stats) = self.stats.as_mut() {
                    stats.code_segments += 1;
                    if block.has_language() {
                        stats.tagged_code_segments += 1;
                    }
                }
                render_code_block(output, block, &self.options);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_options() -> FormatOptions {
        FormatOptions::new().with_copy_icon(false)
    }

    #[test]
    fn test_empty_and_whitespace() {
        let options = FormatOptions::default();
        assert!(to_html("", &options).is_empty());
        assert!(to_html("   ", &options).is_empty());
        assert!(to_html("\n\t\n", &options).is_empty());
    }

    #[test]
    fn test_pre_code_post_order() {
        let html = to_html("pre```js\nconsole.log(1)\n```post", &plain_options());
        let html = html.as_trusted_html();

        assert!(html.starts_with("pre<div class=\"code-block\">"));
        assert!(html.contains(r#"<span class="language-label">js</span>"#));
        assert!(html.contains(r#"<code class="language-js">console.log(1)</code>"#));
        assert!(html.ends_with("</div>post"));
    }

    #[test]
    fn test_unterminated_fence() {
        let html = to_html("a```b", &plain_options());
        let html = html.as_trusted_html();
        assert!(html.starts_with("a<div class=\"code-block\">"));
        assert!(html.contains(r#"<code class="language-">b</code>"#));
    }

    #[test]
    fn test_stats() {
        let raw = "Intro **bold**\n* one\n* two\n```rust\nfn x() {}\n```\nafter\n```\nplain\n```";
        let result = to_html_with_stats(raw, &FormatOptions::default());

        assert_eq!(result.stats.text_segments, 3);
        assert_eq!(result.stats.code_segments, 2);
        assert_eq!(result.stats.tagged_code_segments, 1);
        assert_eq!(result.stats.bold_count, 1);
        assert_eq!(result.stats.bullet_count, 2);
        assert!(result.stats.line_break_count >= 2);
    }

    #[test]
    fn test_stats_do_not_change_markup() {
        let raw = "**a**\n* b```sh\nls```c";
        let plain = to_html(raw, &plain_options());
        let counted = to_html_with_stats(raw, &plain_options());
        assert_eq!(counted.html, plain);
        assert_eq!(counted.stats.segment_count(), 3);
    }

    #[test]
    fn test_render_segments_matches_render() {
        let raw = "x\n* y```py\nprint(1)```z";
        let segments = split_segments(raw);
        let from_segments = HtmlRenderer::new(plain_options()).render_segments(&segments);
        let direct = HtmlRenderer::new(plain_options()).render(raw);
        assert_eq!(from_segments, direct);
    }
}
