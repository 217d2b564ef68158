use crate::command::ModificationCommand;

pub const GENDER_FIELD: &str = "Gender";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    /// Grammar label written into the note.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Masculine => "Maskulinum",
            Gender::Feminine => "Femininum",
            Gender::Neuter => "Neutrum",
        }
    }
}

/// Gender of a German noun written with its definite article, e.g. `die Frage`.
pub fn deduce_gender(word: &str) -> Option<Gender> {
    if word.starts_with("der") {
        Some(Gender::Masculine)
    } else if word.starts_with("die") {
        Some(Gender::Feminine)
    } else if word.starts_with("das") {
        Some(Gender::Neuter)
    } else {
        None
    }
}

pub fn gender_commands(word: Option<&str>, field: &str) -> Vec<ModificationCommand> {
    word.and_then(deduce_gender)
        .map(|gender| ModificationCommand::set_field(field, gender.as_str()))
        .into_iter()
        .collect()
}
