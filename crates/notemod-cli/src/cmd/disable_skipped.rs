use crate::output::print_json;
use anyhow::Context;
use notemod_core::fields::disable_skipped_commands;
use std::collections::BTreeMap;
use std::io::Read;

/// Reads the note's fields as a JSON object from stdin.
pub fn run() -> anyhow::Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read note fields from stdin")?;
    let fields: BTreeMap<String, String> =
        serde_json::from_str(&input).context("note fields must be a JSON object of strings")?;

    print_json(&disable_skipped_commands(&fields))
}
