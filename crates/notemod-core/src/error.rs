use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotemodError {
    #[error("conjugator executable not found: {0}")]
    ConjugatorNotFound(String),

    #[error("failed to spawn conjugator: {0}")]
    ConjugatorSpawnFailed(String),

    #[error("unexpected exit status of {program}: {status}{}", stderr_suffix(.stderr))]
    ConjugatorFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("malformed conjugation table: {0}")]
    MalformedTable(#[source] serde_json::Error),

    #[error("tags must be a JSON array of strings: {0}")]
    InvalidTags(#[source] serde_json::Error),

    #[error("invalid rule configuration: {0}")]
    InvalidRules(String),

    #[error("invalid note modification command #{index}: {reason}")]
    InvalidCommand { index: usize, reason: String },

    #[error("unexpected number of images found in the field: {0}")]
    ImageCount(usize),

    #[error("unsupported character in XML attribute: {0:?}")]
    UnsupportedChar(char),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\nstderr: {stderr}")
    }
}

pub type Result<T> = std::result::Result<T, NotemodError>;
