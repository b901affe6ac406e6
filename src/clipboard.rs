//! Clipboard integration

use crate::{CodespeakError, Result};
use arboard::Clipboard;
use log::debug;

/// Get text from system clipboard
pub fn get_from_clipboard() -> Result<String> {
    debug!("Getting text from clipboard");

    let mut clipboard = Clipboard::new()
        .map_err(|e| CodespeakError::Clipboard(format!("Failed to open clipboard: {}", e)))?;

    clipboard
        .get_text()
        .map_err(|e| CodespeakError::Clipboard(format!("Failed to get from clipboard: {}", e)))
}
