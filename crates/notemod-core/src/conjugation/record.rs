use serde::{Deserialize, Serialize};

use crate::error::{NotemodError, Result};

/// One entry of a verb's conjugation table, as emitted by `sd-conjugate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationRecord {
    #[serde(default)]
    pub pronoun: String,
    #[serde(default)]
    pub paradigm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<String>,
    #[serde(default)]
    pub word: String,
    #[serde(default, rename = "isIrregular")]
    pub is_irregular: bool,
}

impl ConjugationRecord {
    pub fn tense(&self) -> &str {
        self.tense.as_deref().unwrap_or("")
    }
}

/// Parse a JSON array of conjugation records.
pub fn parse_table(json: &str) -> Result<Vec<ConjugationRecord>> {
    serde_json::from_str(json).map_err(NotemodError::MalformedTable)
}
