use crate::output::print_json;
use anyhow::Context;
use notemod_core::image::resize_image_commands;

pub fn run(field: &str, html: &str, height: &str, tag: &str) -> anyhow::Result<()> {
    let commands = resize_image_commands(field, html, height, tag)
        .with_context(|| format!("cannot resize image in field '{field}'"))?;
    print_json(&commands)
}
