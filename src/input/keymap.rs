//! Default prompt commands

use std::collections::HashMap;

/// Action identifier for prompt commands
///
/// Each variant is something the user can ask for at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    // Conversion
    Read,
    TestVoice,

    // Speech settings
    Language,
    Slow,
    Normal,

    // Snippet editing
    Paste,
    Clear,

    // Output
    Play,
    Save,
    Html,

    // Misc
    Status,
    Help,
    Quit,
}

/// Create the default command map
pub fn create_default_keymap() -> HashMap<&'static str, CommandAction> {
    let mut map = HashMap::new();

    // "." on its own line ends the snippet and reads it
    map.insert(".", CommandAction::Read);
    map.insert(":read", CommandAction::Read);
    map.insert(":test", CommandAction::TestVoice);

    map.insert(":lang", CommandAction::Language);
    map.insert(":slow", CommandAction::Slow);
    map.insert(":normal", CommandAction::Normal);

    map.insert(":paste", CommandAction::Paste);
    map.insert(":clear", CommandAction::Clear);

    map.insert(":play", CommandAction::Play);
    map.insert(":save", CommandAction::Save);
    map.insert(":html", CommandAction::Html);

    map.insert(":status", CommandAction::Status);
    map.insert(":help", CommandAction::Help);
    map.insert(":quit", CommandAction::Quit);
    map.insert(":q", CommandAction::Quit);

    map
}

/// Usage text printed by `:help`
pub const HELP_TEXT: &str = "\
How to use:
  1. Paste or type your code, one line at a time
  2. Adjust voice settings with :lang and :slow / :normal
  3. Enter '.' (or :read) to hear your code
  4. Save the audio with :save or :html

Commands:
  .  :read          read the snippet aloud
  :test             test the voice settings
  :lang [code]      show or set the language (en, es, fr, de)
  :slow  :normal    change speaking speed
  :paste            replace the snippet with the clipboard
  :clear            discard the snippet
  :play             replay the last audio
  :save [path]      save the last audio as mp3
  :html [path]      write an html page with a download link
  :status           show settings
  :help             show this help
  :quit  :q         exit

Start a line with '::' to enter a code line that begins with ':'.
Internet connection is required.";
