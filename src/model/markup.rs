//! Pre-rendered HTML markup.
//!
//! Formatter output is wrapped in [`Markup`] instead of a bare `String` so a
//! host has to pick a render path explicitly: inject it as trusted HTML, or
//! show it escaped as literal text. It has no `Display` impl.

use serde::{Deserialize, Serialize};

/// HTML markup intended for direct injection into a display surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap an HTML string the caller vouches for.
    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Check if the markup is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the markup in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the markup for an unescaped render path.
    pub fn as_trusted_html(&self) -> &str {
        &self.0
    }

    /// Take the markup for an unescaped render path.
    pub fn into_trusted_html(self) -> String {
        self.0
    }

    /// Escape the markup so it displays literally.
    pub fn to_escaped_text(&self) -> String {
        html_escape::encode_text(&self.0).into_owned()
    }
}
