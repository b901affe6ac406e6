//! Prompt line parsing

use super::CommandAction;
use std::collections::HashMap;

/// One classified prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A known command with its optional argument
    Run {
        action: CommandAction,
        arg: Option<String>,
    },
    /// A `:word` that is not in the keymap
    Unknown(String),
    /// A line of the snippet
    Text(String),
}

/// Classify a prompt line
///
/// Lines starting with `::` are snippet text with one colon removed.
pub fn parse_line(line: &str, keymap: &HashMap<&'static str, CommandAction>) -> Command {
    let trimmed = line.trim();

    if let Some(rest) = line.strip_prefix("::") {
        return Command::Text(format!(":{}", rest));
    }

    if trimmed != "." && !trimmed.starts_with(':') {
        return Command::Text(line.to_string());
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match keymap.get(word) {
        Some(&action) => Command::Run {
            action,
            arg: if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            },
        },
        None => Command::Unknown(word.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::create_default_keymap;

    #[test]
    fn test_plain_text() {
        let keymap = create_default_keymap();
        assert_eq!(
            parse_line("    return x", &keymap),
            Command::Text("    return x".to_string())
        );
        assert_eq!(parse_line("", &keymap), Command::Text(String::new()));
    }

    #[test]
    fn test_escaped_colon() {
        let keymap = create_default_keymap();
        assert_eq!(
            parse_line("::t map", &keymap),
            Command::Text(":t map".to_string())
        );
    }

    #[test]
    fn test_command_with_argument() {
        let keymap = create_default_keymap();
        assert_eq!(
            parse_line(":save  out/clip.mp3 ", &keymap),
            Command::Run {
                action: CommandAction::Save,
                arg: Some("out/clip.mp3".to_string())
            }
        );
    }
}
