use crate::output::print_json;
use notemod_core::fields::set_field_commands;

pub fn run(pairs: &[String]) -> anyhow::Result<()> {
    if pairs.len() % 2 != 0 {
        tracing::warn!(field = %pairs[pairs.len() - 1], "ignoring field without a value");
    }
    print_json(&set_field_commands(pairs))
}
