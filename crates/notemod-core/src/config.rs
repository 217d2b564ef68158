use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::conjugation::{default_rules, ConjugationRule};
use crate::error::{NotemodError, Result};

// ---------------------------------------------------------------------------
// RulesConfig
// ---------------------------------------------------------------------------

/// Rule table for the conjugation filter, optionally read from YAML:
///
/// ```yaml
/// rules:
///   - field: PreteriteYo
///     pronoun: yo
///     paradigm: preteritIndicative
///     probability: 0.3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<ConjugationRule>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl RulesConfig {
    pub fn from_yaml(data: &str) -> Result<Self> {
        let cfg: RulesConfig = serde_yaml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml(&data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(NotemodError::InvalidRules("no rules defined".into()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.field.trim().is_empty() {
                return Err(NotemodError::InvalidRules("rule with empty field name".into()));
            }
            if !seen.insert(rule.field.as_str()) {
                return Err(NotemodError::InvalidRules(format!(
                    "field '{}' is defined more than once",
                    rule.field
                )));
            }
            if !(0.0..=1.0).contains(&rule.probability) {
                return Err(NotemodError::InvalidRules(format!(
                    "field '{}' has probability {} outside [0, 1]",
                    rule.field, rule.probability
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
