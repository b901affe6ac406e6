//! Speech provider abstraction
//!
//! A provider turns text into encoded audio. The only implementation that
//! ships is the Google Translate backend, but everything above this trait
//! works against `dyn Synth` so tests can substitute a stub.

use crate::state::config::Config;
use crate::Result;
use log::info;

/// Text-to-speech provider
pub trait Synth: Send {
    /// Short provider name for logs and status output
    fn name(&self) -> &str;

    /// Synthesize `text` in `language` and return the complete MP3 payload
    ///
    /// `slow` asks the provider for reduced speaking speed. The call blocks
    /// until the whole payload has been received.
    fn synthesize(&mut self, text: &str, language: &str, slow: bool) -> Result<Vec<u8>>;
}

/// Create the configured speech provider
pub fn create_synth(config: &Config) -> Result<Box<dyn Synth>> {
    use super::backends::google::GoogleSynth;

    let tld = config.tld();
    let synth = GoogleSynth::new(&tld, config.timeout())?;
    info!("Using {} speech provider (translate.google.{})", synth.name(), tld);
    Ok(Box::new(synth))
}
