//! Caller-owned chat history.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Prompts longer than this are shortened in previews.
const PREVIEW_MAX_CHARS: usize = 18;
/// Characters kept when a preview is shortened.
const PREVIEW_KEEP_CHARS: usize = 15;

/// Stable identifier of a history entry.
///
/// Positions shift as entries are added and removed; ids do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A prompt the user sent, with the reply once it arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Stable id
    pub id: EntryId,

    /// Prompt text as sent
    pub prompt: String,

    /// Raw reply text, if one was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,

    /// When the prompt was first recorded
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Short label for sidebars and listings.
    pub fn preview(&self) -> String {
        if self.prompt.chars().count() > PREVIEW_MAX_CHARS {
            let head: String = self.prompt.chars().take(PREVIEW_KEEP_CHARS).collect();
            format!("{}...", head)
        } else {
            self.prompt.clone()
        }
    }
}

/// Ordered list of past prompts, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatHistory {
    entries: Vec<HistoryEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected: Option<EntryId>,

    #[serde(default)]
    next_id: u64,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a prompt at the front of the history.
    ///
    /// A prompt identical to an existing one is not duplicated; the existing
    /// entry's id is returned instead. Fails with [`Error::HistoryFull`] once
    /// the last id (`u64::MAX`) is taken.
    pub fn record(&mut self, prompt: impl Into<String>) -> Result<EntryId> {
        let prompt = prompt.into();
        if let Some(existing) = self.entries.iter().find(|e| e.prompt == prompt) {
            return Ok(existing.id);
        }

        let id = EntryId(self.next_id);
        if self.position(id).is_some() {
            return Err(Error::HistoryFull);
        }
        self.next_id = self.next_id.saturating_add(1);
        self.entries.insert(
            0,
            HistoryEntry {
                id,
                prompt,
                reply: None,
                created_at: Utc::now(),
            },
        );
        log::debug!("recorded history entry {} ({} total)", id, self.entries.len());
        Ok(id)
    }

    /// Attach a reply to an entry.
    pub fn set_reply(&mut self, id: EntryId, reply: impl Into<String>) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::UnknownEntry(id.0))?;
        entry.reply = Some(reply.into());
        Ok(())
    }

    /// Remove the entry at `index`.
    pub fn delete(&mut self, index: usize) -> Result<HistoryEntry> {
        if index >= self.entries.len() {
            return Err(Error::HistoryIndex(index, self.entries.len()));
        }
        let removed = self.entries.remove(index);
        if self.selected == Some(removed.id) {
            self.selected = None;
        }
        Ok(removed)
    }

    /// Remove the entry with the given id.
    pub fn delete_id(&mut self, id: EntryId) -> Result<HistoryEntry> {
        let index = self.position(id).ok_or(Error::UnknownEntry(id.0))?;
        self.delete(index)
    }

    /// Select the entry at `index` as the one being viewed.
    pub fn select(&mut self, index: usize) -> Result<&HistoryEntry> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get(index)
            .ok_or(Error::HistoryIndex(index, len))?;
        self.selected = Some(entry.id);
        Ok(entry)
    }

    /// The currently selected entry, if any.
    pub fn selected(&self) -> Option<&HistoryEntry> {
        let id = self.selected?;
        self.entries.iter().find(|e| e.id == id)
    }

    /// Start a new chat: nothing selected, history kept.
    pub fn new_chat(&mut self) {
        self.selected = None;
    }

    /// Get the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Current position of an entry.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut history: ChatHistory = serde_json::from_str(json)?;
        // Hand-edited files may carry ids at or past next_id.
        let max_id = history
            .entries
            .iter()
            .map(|e| e.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        history.next_id = history.next_id.max(max_id);
        Ok(history)
    }

    /// Write the history to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a history file; a missing file is an empty history.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_newest_first() {
        let mut history = ChatHistory::new();
        history.record("first").unwrap();
        history.record("second").unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().prompt, "second");
        assert_eq!(history.get(1).unwrap().prompt, "first");
    }

    #[test]
    fn test_record_deduplicates() {
        let mut history = ChatHistory::new();
        let a = history.record("same").unwrap();
        history.record("other").unwrap();
        let b = history.record("same").unwrap();

        assert_eq!(a, b);
        assert_eq!(history.len(), 2);
        // Re-sending does not move the entry to the front
        assert_eq!(history.get(0).unwrap().prompt, "other");
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut history = ChatHistory::new();
        history.record("only").unwrap();
        let result = history.delete(3);
        assert!(matches!(result, Err(Error::HistoryIndex(3, 1))));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_selection_follows_id() {
        let mut history = ChatHistory::new();
        history.record("a").unwrap();
        history.record("b").unwrap();
        history.record("c").unwrap();

        // Select "a" (index 2), then delete "c" in front of it
        history.select(2).unwrap();
        history.delete(0).unwrap();

        assert_eq!(history.selected().unwrap().prompt, "a");
        assert_eq!(history.position(history.selected().unwrap().id), Some(1));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut history = ChatHistory::new();
        history.record("a").unwrap();
        history.select(0).unwrap();
        history.delete(0).unwrap();
        assert!(history.selected().is_none());
    }

    #[test]
    fn test_new_chat_keeps_entries() {
        let mut history = ChatHistory::new();
        history.record("a").unwrap();
        history.select(0).unwrap();
        history.new_chat();
        assert!(history.selected().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_set_reply_unknown_entry() {
        let mut history = ChatHistory::new();
        let id = history.record("a").unwrap();
        history.set_reply(id, "reply").unwrap();
        assert_eq!(history.get(0).unwrap().reply.as_deref(), Some("reply"));

        let result = history.set_reply(EntryId(99), "nope");
        assert!(matches!(result, Err(Error::UnknownEntry(99))));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut history = ChatHistory::new();
        let a = history.record("a").unwrap();
        history.delete(0).unwrap();
        let b = history.record("b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_preview() {
        let mut history = ChatHistory::new();
        history.record("Suggest places for road trip.").unwrap();
        history.record("short prompt").unwrap();
        history.record("exactly eighteen!!").unwrap();

        assert_eq!(history.get(2).unwrap().preview(), "Suggest places ...");
        assert_eq!(history.get(1).unwrap().preview(), "short prompt");
        assert_eq!(history.get(0).unwrap().preview(), "exactly eighteen!!");
    }

    #[test]
    fn test_delete_id() {
        let mut history = ChatHistory::new();
        let a = history.record("a").unwrap();
        history.record("b").unwrap();

        let removed = history.delete_id(a).unwrap();
        assert_eq!(removed.prompt, "a");
        assert_eq!(history.len(), 1);
        assert!(matches!(history.delete_id(a), Err(Error::UnknownEntry(_))));
    }

    #[test]
    fn test_from_json_max_id_does_not_overflow() {
        let json = r#"{
            "entries": [
                {"id": 18446744073709551615, "prompt": "x", "created_at": "2024-01-01T00:00:00Z"}
            ],
            "next_id": 0
        }"#;
        let mut history = ChatHistory::from_json(json).unwrap();
        assert_eq!(history.len(), 1);

        // The only id left is taken, so recording fails instead of wrapping
        assert!(matches!(history.record("y"), Err(Error::HistoryFull)));
        assert_eq!(history.record("x").unwrap(), EntryId(u64::MAX));
    }

    #[test]
    fn test_record_takes_last_id_then_fails() {
        let json = r#"{"entries": [], "next_id": 18446744073709551615}"#;
        let mut history = ChatHistory::from_json(json).unwrap();

        assert_eq!(history.record("last").unwrap(), EntryId(u64::MAX));
        assert!(matches!(history.record("more"), Err(Error::HistoryFull)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_from_json_repairs_next_id() {
        let json = r#"{
            "entries": [
                {"id": 7, "prompt": "x", "created_at": "2024-01-01T00:00:00Z"}
            ],
            "next_id": 0
        }"#;
        let mut history = ChatHistory::from_json(json).unwrap();
        let id = history.record("y").unwrap();
        assert_eq!(id, EntryId(8));
    }
}
