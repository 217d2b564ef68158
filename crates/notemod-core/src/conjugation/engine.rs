use std::fmt;

use rand::Rng;

use super::record::ConjugationRecord;
use super::rule::ConjugationRule;
use crate::command::ModificationCommand;
use crate::note::{done_tag, skip_tag, NoteTags};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// How previously handled fields are recognised and whether card
/// generation is thinned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Deterministic: every matched field is set unless the note carries
    /// `conjugation_skip:<field>`.
    Skip,
    /// Probabilistic: every matched field is tagged `conjugation_done:<field>`
    /// and set with the rule's probability (always, for irregular forms).
    Done,
}

impl Policy {
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Skip => "skip",
            Policy::Done => "done",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(Policy::Skip),
            "done" => Ok(Policy::Done),
            other => Err(format!("unknown policy '{other}': expected 'skip' or 'done'")),
        }
    }
}

// ---------------------------------------------------------------------------
// ConjugationEngine
// ---------------------------------------------------------------------------

pub struct ConjugationEngine {
    rules: Vec<ConjugationRule>,
}

impl ConjugationEngine {
    pub fn new(rules: Vec<ConjugationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ConjugationRule] {
        &self.rules
    }

    /// Evaluate every rule in order and concatenate their commands.
    ///
    /// `rng` is only drawn from under [`Policy::Done`], once per matched rule.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        policy: Policy,
        table: &[ConjugationRecord],
        tags: &NoteTags,
        rng: &mut R,
    ) -> Vec<ModificationCommand> {
        let mut commands = Vec::new();
        for rule in &self.rules {
            match policy {
                Policy::Skip => commands.extend(apply_skip_policy(rule, table, tags)),
                Policy::Done => commands.extend(apply_done_policy(rule, table, tags, rng)),
            }
        }
        commands
    }
}

/// Deterministic decision for one rule.
pub fn apply_skip_policy(
    rule: &ConjugationRule,
    table: &[ConjugationRecord],
    tags: &NoteTags,
) -> Option<ModificationCommand> {
    if tags.contains(&skip_tag(&rule.field)) {
        tracing::info!(field = %rule.field, "conjugation is skipped via tag");
        return None;
    }

    let Some(record) = rule.find_match(table) else {
        tracing::debug!(field = %rule.field, "no matching conjugation");
        return None;
    };
    Some(ModificationCommand::set_field_if_not_empty(
        &rule.field,
        &record.word,
    ))
}

/// Probabilistic decision for one rule: the done tag, then maybe the value.
pub fn apply_done_policy<R: Rng + ?Sized>(
    rule: &ConjugationRule,
    table: &[ConjugationRecord],
    tags: &NoteTags,
    rng: &mut R,
) -> Vec<ModificationCommand> {
    let tag = done_tag(&rule.field);
    if tags.contains(&tag) {
        tracing::info!(field = %rule.field, "conjugation already done");
        return Vec::new();
    }

    let Some(record) = rule.find_match(table) else {
        tracing::debug!(field = %rule.field, "no matching conjugation");
        return Vec::new();
    };

    let mut commands = vec![ModificationCommand::add_tag(tag)];

    // Irregular forms are always surfaced.
    let probability = if record.is_irregular {
        1.0
    } else {
        rule.probability
    };
    let sample: f64 = rng.gen();
    if sample < probability {
        commands.push(ModificationCommand::set_field_if_not_empty(
            &rule.field,
            &record.word,
        ));
    } else {
        tracing::info!(
            field = %rule.field,
            probability,
            "regular conjugation card not generated"
        );
    }
    commands
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
