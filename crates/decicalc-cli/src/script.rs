//! Key scripts for the `press` command
//!
//! A script is a string of typed characters with named keys in angle
//! brackets, e.g. `12+7=<bs>`. Each key is looked up in the key map exactly
//! as a keyboard press would be.

use decicalc::core::CalcEvent;
use decicalc::keymap::{Key, KeyMap};
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// One parsed key and the event it is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Keystroke {
    /// The key as pressed
    pub key: Key,
    /// The bound event
    pub event: CalcEvent,
}

/// Parses a named key such as `enter` or `f9` (without brackets)
fn named_key(name: &str) -> Option<Key> {
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "enter" | "ret" | "return" => Some(Key::Enter),
        "bs" | "backspace" => Some(Key::Backspace),
        "del" | "delete" => Some(Key::Delete),
        "esc" | "escape" => Some(Key::Escape),
        _ => name
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(Key::F),
    }
}

/// Splits a script into keys
pub fn parse_keys(script: &str) -> CliResult<Vec<Key>> {
    let mut keys = Vec::new();
    let mut chars = script.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '<' => {
                let rest = chars.as_str();
                let Some(end) = rest.find('>') else {
                    return Err(CliError::invalid_key(format!("<{rest}")));
                };
                let name = &rest[..end];
                let key =
                    named_key(name).ok_or_else(|| CliError::invalid_key(format!("<{name}>")))?;
                keys.push(key);
                chars = rest[end + 1..].chars();
            }
            c => keys.push(Key::Char(c)),
        }
    }

    Ok(keys)
}

/// Parses a script and binds every key to an event
pub fn compile(script: &str, keymap: &KeyMap) -> CliResult<Vec<Keystroke>> {
    parse_keys(script)?
        .into_iter()
        .map(|key| {
            keymap
                .lookup(key)
                .map(|event| Keystroke { key, event })
                .ok_or_else(|| CliError::invalid_key(key_name(key)))
        })
        .collect()
}

/// Human-readable name of a key, in script syntax
#[must_use]
pub fn key_name(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_string(),
        Key::Enter => "<enter>".into(),
        Key::Backspace => "<bs>".into(),
        Key::Delete => "<del>".into(),
        Key::Escape => "<esc>".into(),
        Key::F(n) => format!("<f{n}>"),
    }
}
