//! Application state management
//!
//! `State` is owned by the caller (the CLI loop) and passed by reference.
//! It bundles configuration, the speech provider, the snippet being
//! edited and the single-slot session holding the last audio.

pub mod config;
pub mod session;

use crate::speech::{convert, AudioResult, SpeechBuffer, Synth};
use crate::symbols::{condense_repeated_chars, replace_symbols};
use crate::Result;
use config::Config;
use log::{info, warn};
use regex::Regex;
use session::SessionState;

/// Phrase spoken by the voice test
pub const TEST_PHRASE: &str = "This is a test of the voice settings.";

/// Main application state
pub struct State {
    /// Configuration loaded from ~/.codespeak.cfg
    pub config: Config,

    /// Speech provider that turns text into MP3 audio
    pub synth: Box<dyn Synth>,

    /// Most recent audio, replaced on every successful conversion
    pub session: SessionState,

    /// Snippet being entered at the interactive prompt
    pub snippet: SpeechBuffer,

    /// Language for this run; starts from config
    language: String,

    /// Slow speech for this run; starts from config
    slow: bool,

    /// Compiled symbol pattern, present only when symbol processing is on
    symbols_re: Option<Regex>,
}

impl State {
    /// Create application state from loaded config and a provider
    pub fn new(config: Config, synth: Box<dyn Synth>) -> Self {
        info!("Initializing state with {} provider", synth.name());
        info!("  Language: {}", config.language());
        info!("  Slow speech: {}", config.slow());
        info!("  Process symbols: {}", config.process_symbols());

        let symbols_re = if config.process_symbols() {
            config.symbols_regex().and_then(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Ignoring invalid symbols pattern: {}", e);
                    None
                }
            })
        } else {
            None
        };

        Self {
            language: config.language(),
            slow: config.slow(),
            config,
            synth,
            session: SessionState::new(),
            snippet: SpeechBuffer::new(),
            symbols_re,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Change the language for subsequent conversions
    pub fn set_language(&mut self, language: &str) {
        info!("Language set to {}", language);
        self.language = language.to_string();
        self.config.set_language(language);
    }

    /// Use `language` for this run without touching the saved config
    pub fn override_language(&mut self, language: &str) {
        info!("Language overridden to {} for this run", language);
        self.language = language.to_string();
    }

    pub fn slow(&self) -> bool {
        self.slow
    }

    /// Change the speaking speed for subsequent conversions
    pub fn set_slow(&mut self, slow: bool) {
        info!("Slow speech set to {}", slow);
        self.slow = slow;
        self.config.set_slow(slow);
    }

    /// Use `slow` for this run without touching the saved config
    pub fn override_slow(&mut self, slow: bool) {
        info!("Slow speech overridden to {} for this run", slow);
        self.slow = slow;
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<()> {
        self.config.save()
    }

    /// Convert text and store the audio in the session
    ///
    /// On failure the session keeps whatever it held before.
    pub fn read_aloud(&mut self, text: &str) -> Result<&AudioResult> {
        let prepared = self.prepare_text(text);
        let audio = convert(self.synth.as_mut(), &prepared, &self.language, self.slow)?;
        Ok(self.session.record(audio))
    }

    /// Convert the current snippet
    pub fn read_snippet(&mut self) -> Result<&AudioResult> {
        let text = self.snippet.contents().to_string();
        self.read_aloud(&text)
    }

    /// Speak the fixed test phrase with the current settings
    pub fn test_voice(&mut self) -> Result<&AudioResult> {
        self.read_aloud(TEST_PHRASE)
    }

    /// Apply the configured symbol passes
    fn prepare_text(&self, text: &str) -> String {
        let mut prepared = text.to_string();

        if self.config.repeated_symbols() {
            prepared = condense_repeated_chars(
                &prepared,
                &self.config.repeated_symbols_values(),
                &self.config.symbols,
            );
        }

        if let Some(re) = &self.symbols_re {
            prepared = replace_symbols(&prepared, re, &self.config.symbols);
        }

        prepared
    }
}
