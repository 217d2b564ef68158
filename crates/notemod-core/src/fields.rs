use std::collections::BTreeMap;

use crate::command::ModificationCommand;
use crate::note::skip_tag;

/// Placeholder a user types into a field to opt out of filling it.
pub const SKIP_MARKER: &str = "-";

/// `set_field` commands from alternating `<field> <value>` arguments.
///
/// A trailing field without a value is ignored.
pub fn set_field_commands<S: AsRef<str>>(args: &[S]) -> Vec<ModificationCommand> {
    args.chunks_exact(2)
        .map(|pair| ModificationCommand::set_field(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}

/// For every field holding only the skip marker: tag it as skipped and
/// clear it.
pub fn disable_skipped_commands(fields: &BTreeMap<String, String>) -> Vec<ModificationCommand> {
    let mut commands = Vec::new();
    for (field, value) in fields {
        if value.trim() == SKIP_MARKER {
            tracing::debug!(field = %field, "field marked as skipped");
            commands.push(ModificationCommand::add_tag(skip_tag(field)));
            commands.push(ModificationCommand::set_field(field, ""));
        }
    }
    commands
}
