//! Single-slot holder for the most recent audio

use crate::speech::AudioResult;
use log::debug;

/// Audio produced during this run
///
/// Holds at most one result. Each successful conversion replaces the
/// previous one; failures leave it untouched.
#[derive(Debug, Default)]
pub struct SessionState {
    last_audio: Option<AudioResult>,
    generated: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new result, replacing any previous one
    pub fn record(&mut self, audio: AudioResult) -> &AudioResult {
        debug!(
            "Storing {} bytes of audio (replacing {})",
            audio.len(),
            self.last_audio.as_ref().map_or(0, |a| a.len())
        );
        self.generated = true;
        self.last_audio.insert(audio)
    }

    pub fn last_audio(&self) -> Option<&AudioResult> {
        self.last_audio.as_ref()
    }

    /// True once any conversion has succeeded
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn clear(&mut self) {
        self.last_audio = None;
        self.generated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio(bytes: &[u8]) -> AudioResult {
        AudioResult::new(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert!(!session.is_generated());
        assert!(session.last_audio().is_none());
    }

    #[test]
    fn test_record_overwrites() {
        let mut session = SessionState::new();
        session.record(audio(b"first"));
        session.record(audio(b"second"));

        assert!(session.is_generated());
        assert_eq!(session.last_audio().unwrap().bytes(), b"second");
    }

    #[test]
    fn test_clear() {
        let mut session = SessionState::new();
        session.record(audio(b"x"));
        session.clear();
        assert!(!session.is_generated());
        assert!(session.last_audio().is_none());
    }
}
