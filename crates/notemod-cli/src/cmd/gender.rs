use crate::output::print_json;
use notemod_core::gender::gender_commands;

pub fn run(word: Option<&str>, field: &str) -> anyhow::Result<()> {
    print_json(&gender_commands(word, field))
}
