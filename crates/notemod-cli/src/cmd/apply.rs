use crate::output::print_json;
use anyhow::Context;
use notemod_core::{parse_commands, Note};
use std::io::Read;
use std::path::Path;

/// Applies the command array on stdin to the note in `note_path` and prints
/// the resulting note.
pub fn run(note_path: &Path) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(note_path)
        .with_context(|| format!("failed to read note {}", note_path.display()))?;
    let mut note: Note = serde_json::from_str(&data)
        .with_context(|| format!("malformed note {}", note_path.display()))?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read commands from stdin")?;
    let commands = parse_commands(&input).context("malformed note modification commands")?;

    for cmd in &commands {
        tracing::debug!(command = %cmd, "applying");
    }
    let changed = note.apply(&commands);
    tracing::info!(commands = commands.len(), changed, "applied commands");
    print_json(&note)
}
