//! Rendering module for converting replies to HTML and JSON.

mod code;
mod html;
mod json;
mod options;
mod result;
mod text;

pub use code::render_code_block;
pub use html::{to_html, to_html_with_stats, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{
    EscapePolicy, FormatOptions, DEFAULT_COPY_LABEL, DEFAULT_INDENT_UNIT, DEFAULT_LINE_BREAK,
};
pub use result::{FormatResult, FormatStats};
pub use text::TextPipeline;
