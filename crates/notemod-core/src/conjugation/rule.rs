use serde::{Deserialize, Serialize};

use super::record::ConjugationRecord;

// ---------------------------------------------------------------------------
// ConjugationRule
// ---------------------------------------------------------------------------

/// Maps one note field to a cell of the conjugation table.
///
/// Each filter left as `None` matches any value. Filters compare by exact
/// string equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjugationRule {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronoun: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paradigm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tense: Option<String>,
    /// Chance in [0, 1] that a regular form is written to the note.
    #[serde(default = "default_probability")]
    pub probability: f64,
}

fn default_probability() -> f64 {
    1.0
}

impl ConjugationRule {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pronoun: None,
            paradigm: None,
            tense: None,
            probability: default_probability(),
        }
    }

    pub fn pronoun(mut self, pronoun: impl Into<String>) -> Self {
        self.pronoun = Some(pronoun.into());
        self
    }

    pub fn paradigm(mut self, paradigm: impl Into<String>) -> Self {
        self.paradigm = Some(paradigm.into());
        self
    }

    pub fn tense(mut self, tense: impl Into<String>) -> Self {
        self.tense = Some(tense.into());
        self
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn matches(&self, record: &ConjugationRecord) -> bool {
        filter_accepts(self.pronoun.as_deref(), &record.pronoun)
            && filter_accepts(self.paradigm.as_deref(), &record.paradigm)
            && filter_accepts(self.tense.as_deref(), record.tense())
    }

    /// First record of `table` accepted by every filter.
    pub fn find_match<'a>(&self, table: &'a [ConjugationRecord]) -> Option<&'a ConjugationRecord> {
        table.iter().find(|record| self.matches(record))
    }
}

fn filter_accepts(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |expected| expected == value)
}

// ---------------------------------------------------------------------------
// Built-in Spanish table
// ---------------------------------------------------------------------------

macro_rules! rule {
    ($field:expr, $prob:expr, $pronoun:expr, $paradigm:expr $(, tense: $tense:expr)?) => {
        ConjugationRule::new($field)
            .probability($prob)
            .pronoun($pronoun)
            .paradigm($paradigm)
            $(.tense($tense))?
    };
}

const YO: &str = "yo";
const TU: &str = "tú";
const EL: &str = "él/ella/Ud.";
const NOSOTROS: &str = "nosotros";
const VOSOTROS: &str = "vosotros";
const ELLOS: &str = "ellos/ellas/Uds.";

const PRESENT: &str = "presentIndicative";
const PRETERIT: &str = "preteritIndicative";
const IMPERFECT: &str = "imperfectIndicative";
const IMPERATIVE: &str = "imperative";

/// Field rules for a Spanish verb note, in output order.
pub fn default_rules() -> Vec<ConjugationRule> {
    vec![
        rule!("IndicativePresentYo", 0.05, YO, PRESENT),
        rule!("IndicativePresentTu", 0.30, TU, PRESENT),
        rule!("IndicativePresentEl", 0.30, EL, PRESENT),
        rule!("IndicativePresentNosotros", 0.10, NOSOTROS, PRESENT),
        rule!("IndicativePresentVosotros", 0.10, VOSOTROS, PRESENT),
        rule!("IndicativePresentEllos", 0.15, ELLOS, PRESENT),
        rule!("ImperativeAffirmativeTu", 0.10, TU, IMPERATIVE, tense: "affirmative"),
        rule!("ImperativeAffirmativeUsted", 0.10, "Ud.", IMPERATIVE, tense: "affirmative"),
        rule!("PreteriteYo", 0.30, YO, PRETERIT),
        rule!("PreteriteTu", 0.10, TU, PRETERIT),
        rule!("PreteriteEl", 0.30, EL, PRETERIT),
        rule!("PreteriteNosotros", 0.05, NOSOTROS, PRETERIT),
        rule!("PreteriteVosotros", 0.05, VOSOTROS, PRETERIT),
        rule!("PreteriteEllos", 0.20, ELLOS, PRETERIT),
        rule!("ImperfectYo", 0.15, YO, IMPERFECT),
        rule!("ImperfectTu", 0.20, TU, IMPERFECT),
        rule!("ImperfectEl", 0.15, EL, IMPERFECT),
        rule!("ImperfectNosotros", 0.15, NOSOTROS, IMPERFECT),
        rule!("ImperfectVosotros", 0.15, VOSOTROS, IMPERFECT),
        rule!("ImperfectEllos", 0.20, ELLOS, IMPERFECT),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
