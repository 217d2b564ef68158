use regex::Regex;
use std::sync::OnceLock;

use crate::command::ModificationCommand;
use crate::error::{NotemodError, Result};

static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static IMG_RE: OnceLock<Regex> = OnceLock::new();
static ATTR_RE: OnceLock<Regex> = OnceLock::new();
static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn comment_re() -> &'static Regex {
    COMMENT_RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").unwrap())
}

fn img_re() -> &'static Regex {
    IMG_RE.get_or_init(|| Regex::new(r#"(?is)<img\b((?:"[^"]*"|'[^']*'|[^'">])*)>"#).unwrap())
}

fn attr_re() -> &'static Regex {
    ATTR_RE.get_or_init(|| {
        Regex::new(r#"(?s)([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
            .unwrap()
    })
}

fn entity_re() -> &'static Regex {
    ENTITY_RE.get_or_init(|| {
        Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|(amp|lt|gt|quot|apos));").unwrap()
    })
}

/// `src` of every `<img>` tag in `html`, in document order.
///
/// Commented-out markup is ignored, as are tags without exactly one `src`
/// attribute.
pub fn extract_image_sources(html: &str) -> Vec<String> {
    let html = comment_re().replace_all(html, "");
    let mut sources = Vec::new();
    for tag in img_re().captures_iter(&html) {
        let attrs = tag.get(1).map_or("", |m| m.as_str());
        let srcs: Vec<&str> = attr_re()
            .captures_iter(attrs)
            .filter(|c| c[1].eq_ignore_ascii_case("src"))
            .map(|c| {
                c.get(2)
                    .or_else(|| c.get(3))
                    .or_else(|| c.get(4))
                    .map_or("", |m| m.as_str())
            })
            .collect();
        if srcs.len() != 1 {
            tracing::warn!(count = srcs.len(), "unexpected number of 'src' attributes in 'img' tag");
            continue;
        }
        sources.push(unescape_entities(srcs[0]));
    }
    sources
}

/// Decodes numeric character references and the five XML named entities.
/// Unknown or invalid references are left as written.
fn unescape_entities(value: &str) -> String {
    entity_re()
        .replace_all(value, |caps: &regex::Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                match &caps[3] {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    _ => Some('\''),
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Quotes and backslashes are rejected rather than escaped.
fn check_xml_attr(value: &str) -> Result<&str> {
    match value.chars().find(|c| matches!(c, '"' | '\'' | '\\')) {
        Some(c) => Err(NotemodError::UnsupportedChar(c)),
        None => Ok(value),
    }
}

/// Replace the single image in `html` with a bare tag of the given height
/// and tag the note. Anything else in the field is dropped.
pub fn resize_image_commands(
    field: &str,
    html: &str,
    height: &str,
    tag: &str,
) -> Result<Vec<ModificationCommand>> {
    let height = check_xml_attr(height)?;
    let sources = extract_image_sources(html);
    if sources.len() != 1 {
        return Err(NotemodError::ImageCount(sources.len()));
    }
    let src = check_xml_attr(&sources[0])?;

    Ok(vec![
        ModificationCommand::set_field(field, format!(r#"<img src="{src}" height="{height}">"#)),
        ModificationCommand::add_tag(tag),
    ])
}
