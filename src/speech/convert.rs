//! Text to audio conversion
//!
//! `convert` is the single entry point the rest of the application uses to
//! turn a snippet into audio. It validates the request, makes exactly one
//! provider call and hands the buffered result back. It never touches
//! session state; storing the audio is up to the caller.

use super::Synth;
use crate::{CodespeakError, Result};
use log::{debug, error, info};

/// Language codes offered to the user
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "es", "fr", "de"];

/// Language used when none is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// Message for text that is empty after trimming
pub const EMPTY_TEXT_MESSAGE: &str = "text to convert cannot be empty";

/// A single conversion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: String,
    pub slow: bool,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, language: impl Into<String>, slow: bool) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            slow,
        }
    }

    /// Reject blank text
    ///
    /// The language is not checked against `SUPPORTED_LANGUAGES`; unknown
    /// codes go to the provider, which decides whether it can speak them.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(CodespeakError::Validation(EMPTY_TEXT_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Whether the language is one of the codes offered to the user
    pub fn is_supported_language(&self) -> bool {
        SUPPORTED_LANGUAGES.contains(&self.language.as_str())
    }
}

/// Encoded MP3 audio produced by one successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    bytes: Vec<u8>,
}

impl AudioResult {
    /// Wrap provider output. Returns `None` for an empty payload.
    pub fn new(bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(Self { bytes })
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Convert `text` to speech with the given provider
///
/// Blank text fails with `Validation` before the provider is contacted.
/// Every provider failure, including an empty payload, is reported as
/// `Synthesis`. There is no retry.
pub fn convert(synth: &mut dyn Synth, text: &str, language: &str, slow: bool) -> Result<AudioResult> {
    let request = SynthesisRequest::new(text, language, slow);
    request.validate()?;

    if !request.is_supported_language() {
        debug!("Language '{}' is not in the offered set, passing through", request.language);
    }

    info!(
        "Converting {} chars (language={}, slow={}) via {}",
        request.text.len(),
        request.language,
        request.slow,
        synth.name()
    );

    let bytes = synth
        .synthesize(&request.text, &request.language, request.slow)
        .map_err(|e| {
            error!("Speech provider failed: {}", e);
            match e {
                CodespeakError::Synthesis(msg) => CodespeakError::Synthesis(msg),
                other => CodespeakError::Synthesis(other.to_string()),
            }
        })?;

    let audio = AudioResult::new(bytes).ok_or_else(|| {
        error!("Speech provider returned no audio");
        CodespeakError::Synthesis("provider returned an empty audio stream".to_string())
    })?;

    debug!("Received {} bytes of audio", audio.len());
    Ok(audio)
}
