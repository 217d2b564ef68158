//! Spanish verb conjugation: turn a verb's conjugation table into field
//! commands for a note, one decision per configured rule.

pub mod engine;
pub mod record;
pub mod rule;
pub mod source;

pub use engine::{apply_done_policy, apply_skip_policy, ConjugationEngine, Policy};
pub use record::{parse_table, ConjugationRecord};
pub use rule::{default_rules, ConjugationRule};
pub use source::{ConjugationSource, SdConjugate, StaticSource, SD_CONJUGATE};
