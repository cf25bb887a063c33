//! Code block rendering.

use crate::model::CodeBlock;

use super::FormatOptions;

/// Bootstrap "clipboard" icon shown in the copy button.
const CLIPBOARD_ICON: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" class="bi bi-clipboard" viewBox="0 0 16 16">"#,
    r#"<path d="M4 1.5H3a2 2 0 0 0-2 2V14a2 2 0 0 0 2 2h10a2 2 0 0 0 2-2V3.5a2 2 0 0 0-2-2h-1v1h1a1 1 0 0 1 1 1V14a1 1 0 0 1-1 1H3a1 1 0 0 1-1-1V3.5a1 1 0 0 1 1-1h1z"/>"#,
    r#"<path d="M9.5 1a.5.5 0 0 1 .5.5v1a.5.5 0 0 1-.5.5h-3a.5.5 0 0 1-.5-.5v-1a.5.5 0 0 1 .5-.5zm-3-1A1.5 1.5 0 0 0 5 1.5v1A1.5 1.5 0 0 0 6.5 4h3A1.5 1.5 0 0 0 11 2.5v-1A1.5 1.5 0 0 0 9.5 0z"/>"#,
    "</svg>"
);

/// Render a code block as a header (language label, copy button) followed by
/// a `<pre><code>` region tagged with the language.
///
/// The shell is emitted even when the body is empty.
pub fn render_code_block(output: &mut String, block: &CodeBlock, options: &FormatOptions) {
    output.push_str(r#"<div class="code-block"><div class="code-header">"#);

    output.push_str(r#"<span class="language-label">"#);
    output.push_str(&block.language);
    output.push_str("</span>");

    output.push_str(r#"<button class="copy-button">"#);
    if options.copy_icon {
        output.push_str(CLIPBOARD_ICON);
    }
    output.push_str(&html_escape::encode_text(&options.copy_label));
    output.push_str("</button></div>");

    output.push_str(r#"<pre><code class="language-"#);
    output.push_str(&block.language);
    output.push_str(r#"">"#);
    if options.escape.escapes() {
        output.push_str(&html_escape::encode_text(&block.body));
    } else {
        output.push_str(&block.body);
    }
    output.push_str("</code></pre></div>");
}
