use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::command::ModificationCommand;
use crate::error::{NotemodError, Result};

pub const SKIP_TAG_PREFIX: &str = "conjugation_skip:";
pub const DONE_TAG_PREFIX: &str = "conjugation_done:";

/// Tag marking a field the user explicitly opted out of.
pub fn skip_tag(field: &str) -> String {
    format!("{SKIP_TAG_PREFIX}{field}")
}

/// Tag marking a field that has already been processed.
pub fn done_tag(field: &str) -> String {
    format!("{DONE_TAG_PREFIX}{field}")
}

// ---------------------------------------------------------------------------
// NoteTags
// ---------------------------------------------------------------------------

/// Tags already present on a note. Opaque strings; read-only input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteTags(BTreeSet<String>);

impl NoteTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of tag strings, e.g. `["a", "b"]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let tags: Vec<String> = serde_json::from_str(json).map_err(NotemodError::InvalidTags)?;
        Ok(tags.into_iter().collect())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for NoteTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Note
// ---------------------------------------------------------------------------

/// A flashcard note as the flashcard tool exposes it to filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: NoteTags,
}

impl Note {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Apply commands in order; later writes to the same field win.
    ///
    /// `SetFieldIfNotEmpty` writes only a non-empty value into a field that
    /// was empty before the batch started. Returns how many commands changed
    /// the note.
    pub fn apply(&mut self, commands: &[ModificationCommand]) -> usize {
        let before = self.fields.clone();
        let mut changed = 0;
        for cmd in commands {
            let applied = match cmd {
                ModificationCommand::SetField { field, value } => {
                    self.fields.insert(field.clone(), value.clone()).as_ref() != Some(value)
                }
                ModificationCommand::SetFieldIfNotEmpty { field, value } => {
                    let was_empty = before.get(field).map_or(true, |v| v.is_empty());
                    if value.is_empty() || !was_empty {
                        tracing::debug!(field = %field, "keeping existing field content");
                        false
                    } else {
                        self.fields.insert(field.clone(), value.clone()).as_ref() != Some(value)
                    }
                }
                ModificationCommand::AddTag { tag } => self.tags.insert(tag.clone()),
            };
            if applied {
                changed += 1;
            }
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
