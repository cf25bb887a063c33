//! JSON rendering of reply segments.

use crate::error::Result;
use crate::model::RawSegment;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert split segments to JSON.
pub fn to_json(segments: &[RawSegment], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(segments)?,
        JsonFormat::Compact => serde_json::to_string(segments)?,
    };
    Ok(json)
}
