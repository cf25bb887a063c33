//! Segment types produced by splitting a reply on code fences.

use serde::{Deserialize, Serialize};

/// A fenced code block, with the language tag already separated from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag from the first line of the fence (empty if none)
    pub language: String,

    /// Code body, trimmed
    pub body: String,
}

impl CodeBlock {
    /// Create a code block from a language tag and body.
    pub fn new(language: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            body: body.into(),
        }
    }

    /// Check if the block carries a language tag.
    pub fn has_language(&self) -> bool {
        !self.language.is_empty()
    }

    /// Number of lines in the body.
    pub fn line_count(&self) -> usize {
        if self.body.is_empty() {
            0
        } else {
            self.body.lines().count()
        }
    }
}

/// One piece of a reply, alternately prose and code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawSegment {
    /// Prose between fences, untransformed
    Text {
        /// Raw text content
        content: String,
    },
    /// Content between a pair of fences
    Code(CodeBlock),
}

impl RawSegment {
    /// Create a text segment.
    pub fn text(content: impl Into<String>) -> Self {
        RawSegment::Text {
            content: content.into(),
        }
    }

    /// Check if this is a text segment.
    pub fn is_text(&self) -> bool {
        matches!(self, RawSegment::Text { .. })
    }

    /// Check if this is a code segment.
    pub fn is_code(&self) -> bool {
        matches!(self, RawSegment::Code(_))
    }

    /// Get the code block if this is a code segment.
    pub fn as_code(&self) -> Option<&CodeBlock> {
        match self {
            RawSegment::Code(block) => Some(block),
            RawSegment::Text { .. } => None,
        }
    }

    /// Get the text content if this is a text segment.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawSegment::Text { content } => Some(content),
            RawSegment::Code(_) => None,
        }
    }
}
