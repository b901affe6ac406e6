//! Interactive prompt input
//!
//! Each line typed at the prompt is either a `:command` or part of the
//! code snippet. `parse_line` classifies a line; `CommandHandler` runs it
//! against the application state.

pub mod command;
pub mod handler;
pub mod keymap;

pub use command::{parse_line, Command};
pub use handler::{CommandHandler, HandlerAction};
pub use keymap::{create_default_keymap, CommandAction};
