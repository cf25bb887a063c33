//! Data types shared by the formatter, the history store and the relay.
//!
//! Segments are the intermediate form between a raw reply and its HTML;
//! [`Markup`] is the tagged output; [`ChatHistory`] is the caller-owned list
//! of past prompts.

mod history;
mod markup;
mod segment;

pub use history::{ChatHistory, EntryId, HistoryEntry};
pub use markup::Markup;
pub use segment::{CodeBlock, RawSegment};
