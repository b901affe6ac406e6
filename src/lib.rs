//! codespeak - read source code aloud
//!
//! Sends a code snippet to a text-to-speech provider and plays back or
//! saves the resulting MP3 audio.

pub mod clipboard;
pub mod download;
pub mod error;
pub mod input;
pub mod playback;
pub mod speech;
pub mod state;
pub mod symbols;

pub use error::{CodespeakError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
