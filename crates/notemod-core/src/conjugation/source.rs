//! Where conjugation tables come from.
//!
//! Production runs the external `sd-conjugate` executable with the verb as
//! its only argument and reads a JSON array of records from its stdout.
//! Any non-zero exit is a hard failure.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::record::{parse_table, ConjugationRecord};
use crate::error::{NotemodError, Result};

/// Default executable name, looked up on `PATH`.
pub const SD_CONJUGATE: &str = "sd-conjugate";

const STDERR_EXCERPT_CHARS: usize = 500;

pub trait ConjugationSource {
    fn fetch_conjugations(&self, verb: &str) -> Result<Vec<ConjugationRecord>>;
}

// ---------------------------------------------------------------------------
// SdConjugate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SdConjugate {
    program: PathBuf,
}

impl SdConjugate {
    /// Resolve `program` (a bare name searched on `PATH`, or a path).
    pub fn locate(program: &str) -> Result<Self> {
        let program = which::which(program)
            .map_err(|_| NotemodError::ConjugatorNotFound(program.to_string()))?;
        Ok(Self { program })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ConjugationSource for SdConjugate {
    fn fetch_conjugations(&self, verb: &str) -> Result<Vec<ConjugationRecord>> {
        tracing::debug!(program = %self.program.display(), verb, "running conjugator");

        let output = Command::new(&self.program)
            .arg(verb)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| NotemodError::ConjugatorSpawnFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NotemodError::ConjugatorFailed {
                program: self.program.display().to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().chars().take(STDERR_EXCERPT_CHARS).collect(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let table = parse_table(&stdout)?;
        tracing::debug!(records = table.len(), "conjugation table received");
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// StaticSource
// ---------------------------------------------------------------------------

/// A fixed table returned for any verb.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<ConjugationRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<ConjugationRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::new(parse_table(&data)?))
    }
}

impl ConjugationSource for StaticSource {
    fn fetch_conjugations(&self, _verb: &str) -> Result<Vec<ConjugationRecord>> {
        Ok(self.records.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
