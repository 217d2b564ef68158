//! Note modification commands: the JSON contract between filters and the
//! flashcard tool that applies them.
//!
//! Wire forms, one key per object:
//!
//! ```text
//! {"set_field": {"<field>": "<value>"}}
//! {"set_field_if_not_empty": {"<field>": "<value>"}}
//! {"add_tag": "<tag>"}
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{NotemodError, Result};

// ---------------------------------------------------------------------------
// ModificationCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModificationCommand {
    SetField { field: String, value: String },
    /// Downstream, an empty value never overwrites the note's current content.
    SetFieldIfNotEmpty { field: String, value: String },
    AddTag { tag: String },
}

impl ModificationCommand {
    pub fn set_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetField {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn set_field_if_not_empty(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetFieldIfNotEmpty {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn add_tag(tag: impl Into<String>) -> Self {
        Self::AddTag { tag: tag.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetField { .. } => "set_field",
            Self::SetFieldIfNotEmpty { .. } => "set_field_if_not_empty",
            Self::AddTag { .. } => "add_tag",
        }
    }

    /// The note field this command writes, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::SetField { field, .. } | Self::SetFieldIfNotEmpty { field, .. } => Some(field),
            Self::AddTag { .. } => None,
        }
    }
}

impl fmt::Display for ModificationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetField { field, value } | Self::SetFieldIfNotEmpty { field, value } => {
                write!(f, "{} {field}={value:?}", self.kind())
            }
            Self::AddTag { tag } => write!(f, "add_tag {tag}"),
        }
    }
}

impl Serialize for ModificationCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::SetField { field, value } | Self::SetFieldIfNotEmpty { field, value } => {
                let mut payload = BTreeMap::new();
                payload.insert(field.as_str(), value.as_str());
                map.serialize_entry(self.kind(), &payload)?;
            }
            Self::AddTag { tag } => map.serialize_entry(self.kind(), tag)?,
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Loose shape of one command object as produced by a filter script.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCommand {
    #[serde(default)]
    set_field: Option<BTreeMap<String, String>>,
    #[serde(default)]
    set_field_if_not_empty: Option<BTreeMap<String, String>>,
    #[serde(default)]
    add_tag: Option<String>,
}

impl RawCommand {
    fn into_commands(self, index: usize) -> Result<Vec<ModificationCommand>> {
        let keys = [
            self.set_field.is_some(),
            self.set_field_if_not_empty.is_some(),
            self.add_tag.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        if keys != 1 {
            return Err(NotemodError::InvalidCommand {
                index,
                reason: format!("has {keys} top-level keys instead of one"),
            });
        }

        let commands = match (self.set_field, self.set_field_if_not_empty, self.add_tag) {
            (Some(fields), _, _) => fields
                .into_iter()
                .map(|(field, value)| ModificationCommand::SetField { field, value })
                .collect(),
            (_, Some(fields), _) => fields
                .into_iter()
                .map(|(field, value)| ModificationCommand::SetFieldIfNotEmpty { field, value })
                .collect(),
            (_, _, Some(tag)) => vec![ModificationCommand::AddTag { tag }],
            (None, None, None) => unreachable!("exactly one key was counted above"),
        };
        Ok(commands)
    }
}

/// Parse a filter's stdout into commands.
///
/// Blank output is an empty command list. Field maps holding several
/// entries expand to one command per entry, in key order.
pub fn parse_commands(json: &str) -> Result<Vec<ModificationCommand>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut commands = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        let raw_cmd: RawCommand =
            serde_json::from_value(value).map_err(|e| NotemodError::InvalidCommand {
                index,
                reason: e.to_string(),
            })?;
        commands.extend(raw_cmd.into_commands(index)?);
    }
    Ok(commands)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
