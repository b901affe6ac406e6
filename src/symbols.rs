//! Spelling out code punctuation before synthesis
//!
//! Speech providers skip or mangle most symbols, which makes code hard to
//! follow by ear. Two optional passes help:
//! - `replace_symbols`: "!" becomes "bang", "{" becomes "left brace"
//! - `condense_repeated_chars`: "====" becomes "4 equals"

use regex::Regex;
use std::collections::HashMap;

/// Replace runs of the same character with count + name
/// e.g., "====" becomes "4 equals"
///
/// Only characters listed in `chars_to_condense` are collapsed, and only
/// when they repeat. A character with no entry in `symbols` is spoken as
/// itself.
pub fn condense_repeated_chars(
    text: &str,
    chars_to_condense: &str,
    symbols: &HashMap<u32, String>,
) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    // The regex crate has no backreferences, so runs are counted by hand
    while let Some(ch) = chars.next() {
        let mut run = 1;
        if chars_to_condense.contains(ch) {
            while chars.next_if_eq(&ch).is_some() {
                run += 1;
            }
        }

        if run == 1 {
            result.push(ch);
            continue;
        }

        let name = symbols.get(&(ch as u32)).cloned().unwrap_or_else(|| ch.to_string());
        result.push_str(&format!("{} {}", run, name));
    }

    result
}

/// Replace each symbol matched by `pattern` with its spoken name
///
/// Names are padded with spaces so they do not merge with neighbouring
/// words. Characters without a name are left alone.
pub fn replace_symbols(text: &str, pattern: &Regex, symbols: &HashMap<u32, String>) -> String {
    let replaced = pattern.replace_all(text, |caps: &regex::Captures| {
        let matched = &caps[0];
        match matched.chars().next().and_then(|ch| symbols.get(&(ch as u32))) {
            Some(name) => format!(" {} ", name),
            None => matched.to_string(),
        }
    });

    collapse_spaces(&replaced)
}

/// Collapse runs of spaces within each line, keeping line breaks
fn collapse_spaces(text: &str) -> String {
    text.lines()
        .map(|line| line.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
