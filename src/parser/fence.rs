//! Fence splitting and code-segment classification.

use crate::model::{CodeBlock, RawSegment};

/// The code fence delimiter.
pub const FENCE: &str = "```";

/// Split a reply into alternating text and code segments.
///
/// Pieces at even positions are text, pieces at odd positions are code. An
/// unmatched trailing fence leaves the final piece as an unterminated code
/// segment; no smarter fence matching is attempted.
///
/// # Example
///
/// ```
/// use chatfmt::parser::split_segments;
///
/// let segments = split_segments("pre```js\nconsole.log(1)\n```post");
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].as_code().unwrap().language, "js");
/// ```
pub fn split_segments(raw: &str) -> Vec<RawSegment> {
    if raw.is_empty() {
        return Vec::new();
    }

    let segments: Vec<RawSegment> = raw
        .split(FENCE)
        .enumerate()
        .map(|(index, piece)| {
            if index % 2 == 0 {
                RawSegment::text(piece)
            } else {
                RawSegment::Code(classify_code(piece))
            }
        })
        .collect();

    log::debug!(
        "split reply into {} segments ({} code)",
        segments.len(),
        segments.iter().filter(|s| s.is_code()).count()
    );
    segments
}

/// Separate the language tag from a raw code segment.
///
/// The first line is a language tag only when it is made entirely of ASCII
/// word characters and a newline follows it.
pub fn classify_code(piece: &str) -> CodeBlock {
    let trimmed = trim_blank(piece);

    match trimmed.split_once('\n') {
        Some((first, rest)) if is_language_tag(first) => CodeBlock::new(first, trim_blank(rest)),
        _ => CodeBlock::new("", trimmed),
    }
}

/// Trim whitespace and byte order marks from both ends.
fn trim_blank(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn is_language_tag(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
