//! Quoting of YAML reserved words used as mapping keys.
//!
//! YAML 1.1 parsers resolve bare `on`, `yes`, `off`, ... to booleans (and
//! `null` to null), which turns the `on:` trigger key of a workflow into
//! `true:`. Quoting those keys before parsing keeps them as strings.

use regex::Regex;
use std::sync::OnceLock;

const RESERVED_WORDS: [&str; 7] = ["true", "false", "null", "yes", "no", "on", "off"];

fn reserved_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternatives = RESERVED_WORDS
            .iter()
            .flat_map(|word| [word.to_string(), capitalize(word), word.to_uppercase()])
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"^([ \t]*)({}):", alternatives))
            .expect("reserved word pattern is a valid regex")
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Quote a reserved word when it is the key at the start of `line`.
///
/// Line endings and leading indentation are preserved.
pub fn normalize_line(line: &str) -> String {
    reserved_key_pattern()
        .replace(line, r#"${1}"${2}":"#)
        .into_owned()
}

/// Quote every line-leading reserved-word key in `text`.
pub fn normalize_document(text: &str) -> String {
    text.split_inclusive('\n').map(normalize_line).collect()
}
