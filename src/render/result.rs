//! Formatting result with statistics.

use crate::model::Markup;
use serde::{Deserialize, Serialize};

/// Result of formatting a reply, including markup and statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatResult {
    /// The rendered markup
    pub html: Markup,

    /// Formatting statistics
    pub stats: FormatStats,
}

impl FormatResult {
    /// Create a new format result.
    pub fn new(html: Markup, stats: FormatStats) -> Self {
        Self { html, stats }
    }
}

/// Statistics collected while formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatStats {
    /// Number of text segments
    pub text_segments: u32,

    /// Number of code segments
    pub code_segments: u32,

    /// Code segments that carried a language tag
    pub tagged_code_segments: u32,

    /// Bold spans converted
    pub bold_count: u32,

    /// Bullet markers converted
    pub bullet_count: u32,

    /// Plain line breaks converted
    pub line_break_count: u32,
}

impl FormatStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of segments.
    pub fn segment_count(&self) -> u32 {
        self.text_segments + self.code_segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_count() {
        let stats = FormatStats {
            text_segments: 2,
            code_segments: 1,
            bold_count: 4,
            ..Default::default()
        };
        assert_eq!(stats.segment_count(), 3);
        assert_eq!(FormatStats::new().segment_count(), 0);
    }

    #[test]
    fn test_result_serializes_markup_as_string() {
        let result = FormatResult::new(Markup::trusted("<br/>"), FormatStats::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["html"], "<br/>");
        assert_eq!(json["stats"]["bold_count"], 0);
    }
}
